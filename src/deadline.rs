//! A cooperative time budget for evaluating and solving an equation.

use std::time::{Duration, Instant};

/// The point in time after which a computation should give up.
///
/// Expensive loops call [`Deadline::check()`] so a pathological equation
/// stops burning CPU shortly after the caller has stopped waiting for it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Deadline {
    expires_at: Option<Instant>,
}

impl Deadline {
    /// A deadline which never expires.
    pub fn never() -> Self { Deadline { expires_at: None } }

    pub fn after(budget: Duration) -> Self {
        Deadline {
            expires_at: Instant::now().checked_add(budget),
        }
    }

    pub fn has_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Instant::now() >= expires_at,
            None => false,
        }
    }

    pub fn check(&self) -> Result<(), TimedOut> {
        if self.has_expired() {
            Err(TimedOut)
        } else {
            Ok(())
        }
    }
}

impl Default for Deadline {
    fn default() -> Self { Deadline::never() }
}

/// The computation ran out of time.
#[derive(Debug, Copy, Clone, PartialEq, thiserror::Error)]
#[error("computation timed out")]
pub struct TimedOut;
