//! The allow-list of names an equation may refer to.

use smol_str::SmolStr;

/// The name of the unknown every equation is solved for.
pub const UNKNOWN: &str = "x";

/// What a name in the source text resolves to.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Binding {
    /// The unknown being solved for.
    Unknown,
}

/// The fixed set of names which may appear in an equation.
///
/// Anything not listed here is rejected while parsing, before evaluation
/// begins. Growing the language means adding a [`Binding`] here, never
/// loosening the lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    unknown: SmolStr,
}

impl Vocabulary {
    pub fn new(unknown: impl Into<SmolStr>) -> Self {
        Vocabulary {
            unknown: unknown.into(),
        }
    }

    /// The name of the unknown.
    pub fn unknown(&self) -> &str { &self.unknown }

    /// Look up a name, returning `None` when it isn't on the allow-list.
    pub fn resolve(&self, name: &str) -> Option<Binding> {
        if name == self.unknown {
            Some(Binding::Unknown)
        } else {
            None
        }
    }
}

impl Default for Vocabulary {
    fn default() -> Self { Vocabulary::new(UNKNOWN) }
}
