use dashu::{integer::IBig, rational::RBig};
use std::{
    fmt::{self, Display, Formatter},
    ops::{Add, Div, Mul, Neg, Sub},
};

/// An expression, as written by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// The unknown being solved for.
    Unknown,
    Constant(RBig),
    /// An expression involving two operands.
    Binary {
        left: Box<Expression>,
        right: Box<Expression>,
        op: BinaryOperation,
    },
    /// Negate the expression.
    Negate(Box<Expression>),
    /// Call something with an argument (e.g. `x(2)`).
    Apply {
        callee: Box<Expression>,
        argument: Box<Expression>,
    },
}

impl Expression {
    fn precedence(&self) -> u8 {
        match self {
            Expression::Unknown | Expression::Apply { .. } => ATOM,
            Expression::Constant(value) => {
                if value.numerator() < &IBig::ZERO {
                    UNARY
                } else if value.denominator().is_one() {
                    ATOM
                } else {
                    BinaryOperation::Divide.precedence()
                }
            },
            Expression::Binary { op, .. } => op.precedence(),
            Expression::Negate(_) => UNARY,
        }
    }
}

const UNARY: u8 = 3;
const ATOM: u8 = 5;

/// An operation that can be applied to two arguments.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum BinaryOperation {
    Plus,
    Minus,
    Times,
    Divide,
    Power,
}

impl BinaryOperation {
    fn precedence(self) -> u8 {
        match self {
            BinaryOperation::Plus | BinaryOperation::Minus => 1,
            BinaryOperation::Times | BinaryOperation::Divide => 2,
            BinaryOperation::Power => 4,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            BinaryOperation::Plus => " + ",
            BinaryOperation::Minus => " - ",
            BinaryOperation::Times => "*",
            BinaryOperation::Divide => "/",
            BinaryOperation::Power => "^",
        }
    }
}

// define some operator overloads to make constructing an expression easier.

impl Add for Expression {
    type Output = Expression;

    fn add(self, rhs: Expression) -> Expression {
        Expression::Binary {
            left: Box::new(self),
            right: Box::new(rhs),
            op: BinaryOperation::Plus,
        }
    }
}

impl Sub for Expression {
    type Output = Expression;

    fn sub(self, rhs: Expression) -> Expression {
        Expression::Binary {
            left: Box::new(self),
            right: Box::new(rhs),
            op: BinaryOperation::Minus,
        }
    }
}

impl Mul for Expression {
    type Output = Expression;

    fn mul(self, rhs: Expression) -> Expression {
        Expression::Binary {
            left: Box::new(self),
            right: Box::new(rhs),
            op: BinaryOperation::Times,
        }
    }
}

impl Div for Expression {
    type Output = Expression;

    fn div(self, rhs: Expression) -> Expression {
        Expression::Binary {
            left: Box::new(self),
            right: Box::new(rhs),
            op: BinaryOperation::Divide,
        }
    }
}

impl Neg for Expression {
    type Output = Expression;

    fn neg(self) -> Self::Output { Expression::Negate(Box::new(self)) }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Unknown => write!(f, "x"),
            Expression::Constant(value) => {
                if value.denominator().is_one() {
                    write!(f, "{}", value.numerator())
                } else {
                    write!(f, "{}/{}", value.numerator(), value.denominator())
                }
            },
            Expression::Binary { left, right, op } => {
                let precedence = op.precedence();

                // "^" is right associative, everything else groups left
                let (left_min, right_min) = match op {
                    BinaryOperation::Power => (precedence + 1, UNARY),
                    _ => (precedence, precedence + 1),
                };

                write_operand(left, left_min, f)?;
                write!(f, "{}", op.symbol())?;
                write_operand(right, right_min, f)
            },
            Expression::Negate(inner) => {
                write!(f, "-")?;
                write_operand(inner, UNARY, f)
            },
            Expression::Apply { callee, argument } => {
                write_operand(callee, ATOM, f)?;
                write!(f, "({})", argument)
            },
        }
    }
}

fn write_operand(
    expr: &Expression,
    min_precedence: u8,
    f: &mut Formatter<'_>,
) -> fmt::Result {
    if expr.precedence() < min_precedence {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}
