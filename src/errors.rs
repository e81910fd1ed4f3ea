//! Everything which can go wrong while solving an equation, and how each
//! failure is presented to the caller.

use crate::{
    equations::EquationError, ops::EvaluationError, solve::SolveError,
    ParseError,
};

/// The distinct kinds of failure a caller can observe.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No equation was supplied, or it was empty.
    MissingInput,
    /// One side of the equation couldn't be parsed.
    SyntaxError,
    /// The equation mentions a name which isn't on the allow-list.
    DisallowedReference,
    /// An operator was applied to something it doesn't work on.
    TypeMismatch,
    /// Evaluation failed for some other reason (e.g. division by zero).
    InvalidValue,
    /// The equation was valid but the solver couldn't find its roots.
    SolveFailure,
    /// The computation ran out of time.
    Timeout,
    /// Something unexpected happened.
    InternalError,
}

impl ErrorKind {
    /// Could the caller fix this by sending a different equation?
    pub fn is_caller_error(self) -> bool { self != ErrorKind::InternalError }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("No equation provided")]
    MissingEquation,
    #[error("Empty equation provided")]
    EmptyEquation,
    #[error(transparent)]
    Equation(#[from] EquationError),
    #[error(transparent)]
    Solve(#[from] SolveError),
    #[error("computation timed out")]
    TimedOut,
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingEquation | Error::EmptyEquation => {
                ErrorKind::MissingInput
            },
            Error::Equation(EquationError::Parse { error, .. }) => match error
            {
                ParseError::DisallowedReference { .. } => {
                    ErrorKind::DisallowedReference
                },
                _ => ErrorKind::SyntaxError,
            },
            Error::Equation(EquationError::Evaluate { error, .. }) => {
                match error {
                    EvaluationError::NonIntegerExponent { .. }
                    | EvaluationError::NotCallable { .. } => {
                        ErrorKind::TypeMismatch
                    },
                    EvaluationError::DivisionByZero
                    | EvaluationError::ExponentTooLarge { .. }
                    | EvaluationError::DegreeTooLarge { .. } => {
                        ErrorKind::InvalidValue
                    },
                    EvaluationError::TimedOut(_) => ErrorKind::Timeout,
                }
            },
            Error::Solve(SolveError::TimedOut(_)) | Error::TimedOut => {
                ErrorKind::Timeout
            },
            Error::Solve(_) => ErrorKind::SolveFailure,
            Error::Internal(_) => ErrorKind::InternalError,
        }
    }

    /// The message shown to the caller.
    ///
    /// Internal errors get a generic message so implementation details never
    /// leak out.
    pub fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::MissingInput => self.to_string(),
            ErrorKind::SyntaxError => {
                format!("Syntax error in equation: {}", self)
            },
            ErrorKind::DisallowedReference => match self {
                Error::Equation(EquationError::Parse {
                    error: ParseError::DisallowedReference { name, .. },
                    ..
                }) => format!("Disallowed name in equation: {}", name),
                _ => String::from("Disallowed name in equation"),
            },
            ErrorKind::TypeMismatch => {
                format!("Type error in equation: {}", self)
            },
            ErrorKind::InvalidValue => {
                format!("Invalid value in equation: {}", self)
            },
            ErrorKind::SolveFailure => {
                format!("Unable to solve the equation: {}", self)
            },
            ErrorKind::Timeout => String::from("Computation timed out"),
            ErrorKind::InternalError => {
                String::from("Failed to solve the equation")
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::Side;

    #[test]
    fn public_messages() {
        let inputs = vec![
            (Error::MissingEquation, "No equation provided"),
            (Error::EmptyEquation, "Empty equation provided"),
            (
                Error::Equation(EquationError::Parse {
                    side: Side::Right,
                    error: ParseError::UnexpectedEndOfInput,
                }),
                "Syntax error in equation: right-hand side: unexpected end \
                 of input",
            ),
            (
                Error::Equation(EquationError::Parse {
                    side: Side::Left,
                    error: ParseError::DisallowedReference {
                        name: "os".into(),
                        span: 7..9,
                    },
                }),
                "Disallowed name in equation: os",
            ),
            (
                Error::Equation(EquationError::Evaluate {
                    side: Side::Left,
                    error: EvaluationError::DivisionByZero,
                }),
                "Invalid value in equation: left-hand side: division by zero",
            ),
            (
                Error::Solve(SolveError::NoClosedForm { degree: 5 }),
                "Unable to solve the equation: no closed-form solution for \
                 a factor of degree 5",
            ),
            (Error::TimedOut, "Computation timed out"),
        ];

        for (error, should_be) in inputs {
            assert_eq!(error.public_message(), should_be);
        }
    }

    #[test]
    fn internal_errors_dont_leak_details() {
        let error = Error::Internal(String::from("worker panicked at foo.rs"));

        assert_eq!(error.kind(), ErrorKind::InternalError);
        assert!(!error.kind().is_caller_error());
        assert_eq!(error.public_message(), "Failed to solve the equation");
    }
}
