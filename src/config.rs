//! Process configuration.

use crate::{deadline::Deadline, vocabulary::Vocabulary};
use clap::Parser;
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    time::Duration,
};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_SOLVE_TIMEOUT_MS: u64 = 5000;

/// Solve single-variable algebraic equations over HTTP
#[derive(Parser, Debug, Clone)]
#[command(name = "equation-solver")]
#[command(version)]
pub struct Args {
    /// Address to bind to
    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Time budget for solving a single equation, in milliseconds
    /// (0 = unlimited)
    #[arg(
        long,
        env = "SOLVE_TIMEOUT_MS",
        default_value_t = DEFAULT_SOLVE_TIMEOUT_MS
    )]
    pub solve_timeout_ms: u64,

    /// Verbosity level (repeat for more: -v, -vv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Read-only settings shared by every request.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub addr: SocketAddr,
    /// How long a single equation may take, if there is a limit.
    pub solve_timeout: Option<Duration>,
    pub vocabulary: Vocabulary,
}

impl Config {
    pub fn from_args(args: &Args) -> Self {
        let solve_timeout = match args.solve_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        };

        Config {
            addr: SocketAddr::new(args.host, args.port),
            solve_timeout,
            vocabulary: Vocabulary::default(),
        }
    }

    /// A fresh [`Deadline`] for a request starting now.
    pub fn deadline(&self) -> Deadline {
        match self.solve_timeout {
            Some(budget) => Deadline::after(budget),
            None => Deadline::never(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            addr: SocketAddr::new(
                IpAddr::V4(Ipv4Addr::UNSPECIFIED),
                DEFAULT_PORT,
            ),
            solve_timeout: Some(Duration::from_millis(
                DEFAULT_SOLVE_TIMEOUT_MS,
            )),
            vocabulary: Vocabulary::default(),
        }
    }
}
