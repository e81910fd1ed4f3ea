//! [`Expression`] operations.

use crate::{
    deadline::{Deadline, TimedOut},
    poly::{DivisionByZero, RationalFunction},
    BinaryOperation, Expression,
};
use dashu::rational::RBig;

/// The largest exponent `^` will accept.
pub const MAX_EXPONENT: i64 = 256;
/// The largest degree an intermediate polynomial may reach.
pub const MAX_DEGREE: usize = 1024;

/// Reasons an [`Expression`] can't be turned into a value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error("exponents must be integer constants, found \"{exponent}\"")]
    NonIntegerExponent { exponent: String },
    #[error("\"{callee}\" is not callable")]
    NotCallable { callee: String },
    #[error("division by zero")]
    DivisionByZero,
    #[error("the exponent {exponent} is larger than {limit}")]
    ExponentTooLarge { exponent: String, limit: i64 },
    #[error("the expression's degree exceeds {limit}")]
    DegreeTooLarge { limit: usize },
    #[error(transparent)]
    TimedOut(#[from] TimedOut),
}

impl From<DivisionByZero> for EvaluationError {
    fn from(_: DivisionByZero) -> Self { EvaluationError::DivisionByZero }
}

/// Evaluate an [`Expression`] to its exact value, a ratio of polynomials in
/// the unknown.
pub fn evaluate(
    expr: &Expression,
    deadline: &Deadline,
) -> Result<RationalFunction, EvaluationError> {
    deadline.check()?;

    let value = match expr {
        Expression::Unknown => RationalFunction::unknown(),
        Expression::Constant(value) => {
            RationalFunction::constant(value.clone())
        },
        Expression::Negate(inner) => evaluate(inner, deadline)?.neg(),
        Expression::Apply { callee, .. } => {
            return Err(EvaluationError::NotCallable {
                callee: callee.to_string(),
            });
        },
        Expression::Binary {
            left,
            right,
            op: BinaryOperation::Power,
        } => {
            let base = evaluate(left, deadline)?;
            let exponent = integer_exponent(right, deadline)?;
            power(&base, exponent, deadline)?
        },
        Expression::Binary { left, right, op } => {
            let left = evaluate(left, deadline)?;
            let right = evaluate(right, deadline)?;

            match op {
                BinaryOperation::Plus => left.add(&right),
                BinaryOperation::Minus => left.sub(&right),
                BinaryOperation::Times => left.mul(&right),
                BinaryOperation::Divide => left.div(&right)?,
                BinaryOperation::Power => unreachable!(),
            }
        },
    };

    check_degree(&value)?;

    Ok(value)
}

/// Evaluate the right hand side of a `^`, making sure it is a reasonably
/// sized integer.
fn integer_exponent(
    expr: &Expression,
    deadline: &Deadline,
) -> Result<i64, EvaluationError> {
    let value = evaluate(expr, deadline)?;

    let exponent = match value.as_constant() {
        Some(c) if c.denominator().is_one() => c.numerator().clone(),
        _ => {
            return Err(EvaluationError::NonIntegerExponent {
                exponent: expr.to_string(),
            })
        },
    };

    match i64::try_from(exponent) {
        Ok(n) if n.abs() <= MAX_EXPONENT => Ok(n),
        _ => Err(EvaluationError::ExponentTooLarge {
            exponent: expr.to_string(),
            limit: MAX_EXPONENT,
        }),
    }
}

/// Raise a value to an integer power using repeated squaring.
fn power(
    base: &RationalFunction,
    exponent: i64,
    deadline: &Deadline,
) -> Result<RationalFunction, EvaluationError> {
    let mut square = if exponent < 0 {
        base.recip()?
    } else {
        base.clone()
    };
    let mut remaining = exponent.unsigned_abs();
    let mut result = RationalFunction::constant(RBig::ONE);

    while remaining > 0 {
        deadline.check()?;

        if remaining & 1 == 1 {
            result = result.mul(&square);
            check_degree(&result)?;
        }

        remaining >>= 1;

        if remaining > 0 {
            square = square.mul(&square);
            check_degree(&square)?;
        }
    }

    Ok(result)
}

fn check_degree(value: &RationalFunction) -> Result<(), EvaluationError> {
    if value.degree() > MAX_DEGREE {
        Err(EvaluationError::DegreeTooLarge { limit: MAX_DEGREE })
    } else {
        Ok(())
    }
}
