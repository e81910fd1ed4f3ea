use crate::{
    deadline::Deadline,
    errors::Error,
    ops::{self, EvaluationError},
    parse,
    poly::{Polynomial, RationalFunction},
    solve::{self, SolutionSet},
    vocabulary::Vocabulary,
    ParseError,
};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// Which half of an equation something came from.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Side {
    Left,
    Right,
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left-hand side"),
            Side::Right => write!(f, "right-hand side"),
        }
    }
}

/// Split an equation on its first `=`.
///
/// Text without an `=` is treated as `text = 0`.
pub fn split(equation: &str) -> (&str, &str) {
    match equation.find('=') {
        Some(index) => {
            let (left, right) = equation.split_at(index);
            (left, &right[1..])
        },
        None => (equation, "0"),
    }
}

/// The equality `left = right`, with both sides already evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    left: RationalFunction,
    right: RationalFunction,
}

/// Something went wrong while turning text into an [`Equation`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EquationError {
    #[error("{side}: {error}")]
    Parse { side: Side, error: ParseError },
    #[error("{side}: {error}")]
    Evaluate {
        side: Side,
        error: EvaluationError,
    },
}

impl Equation {
    pub fn new(left: RationalFunction, right: RationalFunction) -> Self {
        Equation { left, right }
    }

    /// Parse and evaluate both sides of an equation.
    pub fn parse(
        src: &str,
        vocab: &Vocabulary,
        deadline: &Deadline,
    ) -> Result<Self, EquationError> {
        let (left, right) = split(src);

        let left = evaluate_side(left, Side::Left, vocab, deadline)?;
        let right = evaluate_side(right, Side::Right, vocab, deadline)?;

        Ok(Equation::new(left, right))
    }

    /// The polynomial whose roots are the equation's candidate solutions,
    /// found by cross-multiplying `left - right`.
    pub fn numerator(&self) -> Polynomial {
        let left = self.left.numerator().mul(self.right.denominator());
        let right = self.right.numerator().mul(self.left.denominator());

        left.sub(&right)
    }

    /// The denominators of each side. Any value of the unknown which makes
    /// one of these zero can't be a solution.
    pub fn denominators(&self) -> impl Iterator<Item = &Polynomial> + '_ {
        vec![self.left.denominator(), self.right.denominator()].into_iter()
    }
}

fn evaluate_side(
    src: &str,
    side: Side,
    vocab: &Vocabulary,
    deadline: &Deadline,
) -> Result<RationalFunction, EquationError> {
    let expr = parse(src, vocab)
        .map_err(|error| EquationError::Parse { side, error })?;
    tracing::trace!(%side, %expr, "Parsed");

    let value = ops::evaluate(&expr, deadline)
        .map_err(|error| EquationError::Evaluate { side, error })?;
    tracing::trace!(%side, %value, "Evaluated");

    Ok(value)
}

impl FromStr for Equation {
    type Err = EquationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Equation::parse(s, &Vocabulary::default(), &Deadline::never())
    }
}

impl Display for Equation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.left, self.right)
    }
}

/// Run the whole pipeline: split the text, evaluate both sides, and solve
/// the resulting equation for the unknown.
pub fn solve_equation(
    raw: &str,
    vocab: &Vocabulary,
    deadline: &Deadline,
) -> Result<SolutionSet, Error> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(Error::EmptyEquation);
    }

    let equation = Equation::parse(raw, vocab, deadline)?;
    tracing::debug!(%equation, "Solving");

    let solutions = solve::solve(&equation, deadline)?;

    Ok(solutions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::ErrorKind, solve::SolveError};
    use std::collections::HashSet;

    fn solve(src: &str) -> Result<SolutionSet, Error> {
        solve_equation(src, &Vocabulary::default(), &Deadline::never())
    }

    fn root_set(src: &str) -> HashSet<String> {
        solve(src)
            .unwrap()
            .roots()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn splitting_on_the_first_equals() {
        let inputs = vec![
            ("x = 5", ("x ", " 5")),
            ("x - 5", ("x - 5", "0")),
            ("x = 2 = 3", ("x ", " 2 = 3")),
            ("=x", ("", "x")),
        ];

        for (src, should_be) in inputs {
            assert_eq!(split(src), should_be);
        }
    }

    #[test]
    fn solve_known_equations() {
        let inputs = vec![
            ("2*x + 4 = 0", set(&["-2"])),
            ("x^2 - 1 = 0", set(&["-1", "1"])),
            ("x - 5", set(&["5"])),
            ("x**2 = 4", set(&["-2", "2"])),
            ("3*x = 1", set(&["1/3"])),
            ("0.5*x = 2", set(&["4"])),
            ("x^2 + 1 = 0", set(&["-I", "I"])),
            ("x^2 = 2", set(&["-sqrt(2)", "sqrt(2)"])),
            ("x^3 = x", set(&["-1", "0", "1"])),
            ("1/x = 2", set(&["1/2"])),
            ("(x^2 - 1)/(x - 1) = 0", set(&["-1"])),
            ("x/(x - 1) = 2", set(&["2"])),
            (
                "x^4 - 5*x^2 + 6 = 0",
                set(&["-sqrt(2)", "sqrt(2)", "-sqrt(3)", "sqrt(3)"]),
            ),
            (
                "x^4 = 4",
                set(&["-sqrt(2)", "sqrt(2)", "-sqrt(2)*I", "sqrt(2)*I"]),
            ),
            (".5*x = 1", set(&["2"])),
        ];

        for (src, should_be) in inputs {
            assert_eq!(root_set(src), should_be, "{}", src);
        }
    }

    #[test]
    fn tautologies_hold_everywhere() {
        for src in &["x = x", "2*(x + 1) = 2*x + 2", "x/x = 1", "0 = 0"] {
            assert_eq!(solve(src).unwrap(), SolutionSet::All, "{}", src);
        }
    }

    #[test]
    fn contradictions_have_no_solutions() {
        let inputs =
            ["x + 1 = x + 2", "1/x = 0", "1 = 2", "(x^2 - 1)/(x - 1) = 2"];

        for src in inputs {
            let got = solve(src).unwrap();

            assert_eq!(got, SolutionSet::Roots(Vec::new()), "{}", src);
            assert_eq!(got.to_string(), "[]");
        }
    }

    #[test]
    fn solving_is_repeatable() {
        let first = solve("x^4 - 1 = 0").unwrap().to_string();
        let second = solve("x^4 - 1 = 0").unwrap().to_string();

        assert_eq!(first, second);
    }

    #[test]
    fn failures_are_classified() {
        let inputs = vec![
            ("", ErrorKind::MissingInput),
            ("   ", ErrorKind::MissingInput),
            ("x = ", ErrorKind::SyntaxError),
            ("2x = 4", ErrorKind::SyntaxError),
            ("x == 2", ErrorKind::SyntaxError),
            ("import os", ErrorKind::DisallowedReference),
            ("__class__", ErrorKind::DisallowedReference),
            ("y = 2", ErrorKind::DisallowedReference),
            ("x = sin(x)", ErrorKind::DisallowedReference),
            ("x^x = 1", ErrorKind::TypeMismatch),
            ("x(2) = 1", ErrorKind::TypeMismatch),
            ("1/(x - x) = 1", ErrorKind::InvalidValue),
            ("x^5 - x - 1 = 0", ErrorKind::SolveFailure),
        ];

        for (src, kind) in inputs {
            let err = solve(src).unwrap_err();

            assert_eq!(err.kind(), kind, "{} => {}", src, err);
        }
    }

    #[test]
    fn solve_failures_keep_their_reason() {
        let err = solve("x^5 - x - 1 = 0").unwrap_err();

        assert_eq!(
            err,
            Error::Solve(SolveError::NoClosedForm { degree: 5 })
        );
    }

    #[test]
    fn every_root_of_a_sextic() {
        let got = solve("x^6 - 1 = 0").unwrap();

        assert_eq!(got.roots().len(), 6);
        assert_eq!(
            got.to_string(),
            "[-1, 1, 1/2 - sqrt(3)*I/2, 1/2 + sqrt(3)*I/2, \
             -1/2 - sqrt(3)*I/2, -1/2 + sqrt(3)*I/2]"
        );
    }

    #[test]
    fn cube_roots() {
        let got = solve("x^3 = 2").unwrap();

        assert_eq!(
            got.to_string(),
            "[2^(1/3), -2^(1/3)/2 + 2^(1/3)*sqrt(3)*I/2, \
             -2^(1/3)/2 - 2^(1/3)*sqrt(3)*I/2]"
        );
    }

    #[test]
    fn denominators_exclude_irrational_roots_too() {
        // x^3 - 2 = 0 except where x^2 + x + 1 = 0
        let got = solve("(x^5 + x^4 + x^3 - 2*x^2 - 2*x - 2)/(x^2 + x + 1) = 0")
            .unwrap();

        assert_eq!(got, solve("x^3 = 2").unwrap());
    }

    #[test]
    fn oversized_equations_are_syntax_errors() {
        let deep = format!("{}x{} = 1", "(".repeat(5000), ")".repeat(5000));
        let long = format!("{} = 1", vec!["x"; 20_000].join(" + "));
        let nested = format!("x = {}1", "-".repeat(1000));

        for src in [deep, long, nested] {
            let err = solve(&src).unwrap_err();

            assert_eq!(err.kind(), ErrorKind::SyntaxError);
        }
    }

    #[test]
    fn parse_equations_from_strings() {
        let equation: Equation = "x + 1 = 2*x".parse().unwrap();

        assert_eq!(equation.to_string(), "x + 1 = 2*x");
        assert_eq!(equation.numerator().to_string(), "-x + 1");
    }
}
