//! Solve single-variable algebraic equations symbolically.
//!
//! Equations are written in a small arithmetic language over the unknown
//! `x`, evaluated exactly as rational functions, and solved for every value
//! of `x` which makes both sides equal.
//!
//! ```rust
//! use equation_solver::{
//!     deadline::Deadline, solve_equation, vocabulary::Vocabulary,
//! };
//!
//! let solutions = solve_equation(
//!     "x^2 - 1 = 0",
//!     &Vocabulary::default(),
//!     &Deadline::never(),
//! )
//! .unwrap();
//!
//! assert_eq!(solutions.to_string(), "[-1, 1]");
//! ```

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

pub mod config;
pub mod deadline;
mod equations;
pub mod errors;
mod expr;
pub mod logging;
pub mod ops;
mod parse;
pub mod poly;
pub mod radical;
pub mod server;
pub mod solve;
pub mod vocabulary;

pub use equations::{solve_equation, split, Equation, EquationError, Side};
pub use errors::{Error, ErrorKind};
pub use expr::{BinaryOperation, Expression};
pub use parse::{parse, ParseError, TokenKind};
pub use radical::Radical;
pub use solve::{SolutionSet, SolveError};
