//! Exact univariate polynomials and rational functions in the unknown.

use crate::vocabulary::UNKNOWN;
use dashu::{
    base::{Gcd, UnsignedAbs},
    integer::{IBig, UBig},
    rational::RBig,
};
use std::fmt::{self, Display, Formatter};

/// A dense polynomial with rational coefficients.
///
/// Coefficients are stored in ascending degree order and there is always at
/// least one of them, so the zero polynomial is `[0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coeffs: Vec<RBig>,
}

impl Polynomial {
    pub fn new(mut coeffs: Vec<RBig>) -> Self {
        while coeffs.len() > 1 && coeffs.last().map_or(false, RBig::is_zero) {
            coeffs.pop();
        }

        if coeffs.is_empty() {
            coeffs.push(RBig::ZERO);
        }

        Polynomial { coeffs }
    }

    pub fn zero() -> Self { Polynomial::constant(RBig::ZERO) }

    pub fn one() -> Self { Polynomial::constant(RBig::ONE) }

    pub fn constant(value: RBig) -> Self {
        Polynomial {
            coeffs: vec![value],
        }
    }

    /// The polynomial `x`.
    pub fn x() -> Self { Polynomial::new(vec![RBig::ZERO, RBig::ONE]) }

    /// The linear polynomial `x - root`.
    pub fn linear_factor(root: &RBig) -> Self {
        Polynomial::new(vec![-root.clone(), RBig::ONE])
    }

    pub fn degree(&self) -> usize { self.coeffs.len() - 1 }

    pub fn is_zero(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_zero()
    }

    /// The polynomial's value if it doesn't depend on `x`.
    pub fn as_constant(&self) -> Option<&RBig> {
        if self.coeffs.len() == 1 {
            self.coeffs.first()
        } else {
            None
        }
    }

    pub fn leading_coeff(&self) -> &RBig { &self.coeffs[self.degree()] }

    pub fn coeff(&self, power: usize) -> RBig {
        self.coeffs.get(power).cloned().unwrap_or(RBig::ZERO)
    }

    pub fn coeffs(&self) -> &[RBig] { &self.coeffs }

    /// Evaluates the polynomial at a point using Horner's method.
    pub fn eval(&self, x: &RBig) -> RBig {
        let mut result = RBig::ZERO;

        for c in self.coeffs.iter().rev() {
            result = result * x + c;
        }

        result
    }

    pub fn add(&self, other: &Polynomial) -> Polynomial {
        let len = self.coeffs.len().max(other.coeffs.len());

        Polynomial::new(
            (0..len).map(|i| self.coeff(i) + other.coeff(i)).collect(),
        )
    }

    pub fn neg(&self) -> Polynomial {
        Polynomial::new(self.coeffs.iter().map(|c| -c.clone()).collect())
    }

    pub fn sub(&self, other: &Polynomial) -> Polynomial {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Polynomial) -> Polynomial {
        if self.is_zero() || other.is_zero() {
            return Polynomial::zero();
        }

        let mut result =
            vec![RBig::ZERO; self.coeffs.len() + other.coeffs.len() - 1];

        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }

            for (j, b) in other.coeffs.iter().enumerate() {
                result[i + j] = &result[i + j] + &(a * b);
            }
        }

        Polynomial::new(result)
    }

    pub fn scale(&self, factor: &RBig) -> Polynomial {
        Polynomial::new(self.coeffs.iter().map(|c| c * factor).collect())
    }

    /// Polynomial long division, returning the quotient and remainder.
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is the zero polynomial.
    pub fn div_rem(&self, divisor: &Polynomial) -> (Polynomial, Polynomial) {
        assert!(!divisor.is_zero(), "division by the zero polynomial");

        if self.degree() < divisor.degree() {
            return (Polynomial::zero(), self.clone());
        }

        let mut remainder = self.coeffs.clone();
        let mut quotient =
            vec![RBig::ZERO; self.degree() - divisor.degree() + 1];
        let lead = divisor.leading_coeff();

        for shift in (0..quotient.len()).rev() {
            let top = shift + divisor.degree();
            let factor = remainder[top].clone() / lead;

            if factor.is_zero() {
                continue;
            }

            for (i, c) in divisor.coeffs.iter().enumerate() {
                remainder[shift + i] = &remainder[shift + i] - &(&factor * c);
            }

            quotient[shift] = factor;
        }

        remainder.truncate(divisor.degree().max(1));

        (Polynomial::new(quotient), Polynomial::new(remainder))
    }

    /// Does `divisor` go into this polynomial exactly?
    pub fn is_divisible_by(&self, divisor: &Polynomial) -> bool {
        let (_, remainder) = self.div_rem(divisor);
        remainder.is_zero()
    }

    pub fn derivative(&self) -> Polynomial {
        Polynomial::new(
            self.coeffs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(power, c)| c * &RBig::from(IBig::from(power)))
                .collect(),
        )
    }

    /// Scale the polynomial so its leading coefficient is `1`.
    pub fn monic(&self) -> Polynomial {
        if self.is_zero() {
            return self.clone();
        }

        self.scale(&(RBig::ONE / self.leading_coeff()))
    }

    /// The polynomial `p(x + offset)`.
    pub fn shift(&self, offset: &RBig) -> Polynomial {
        let step = Polynomial::new(vec![offset.clone(), RBig::ONE]);

        self.coeffs.iter().rev().fold(Polynomial::zero(), |acc, c| {
            acc.mul(&step).add(&Polynomial::constant(c.clone()))
        })
    }

    /// Rescale the polynomial so its coefficients are coprime integers with
    /// a positive leading coefficient.
    ///
    /// The result has the same roots as the original.
    pub fn primitive_integer_coeffs(&self) -> Vec<IBig> {
        let common_denominator = self
            .coeffs
            .iter()
            .map(|c| c.denominator().clone())
            .fold(UBig::ONE, lcm);

        let scale = RBig::from(IBig::from(common_denominator));
        let mut integers: Vec<IBig> = self
            .coeffs
            .iter()
            .map(|c| (c * &scale).numerator().clone())
            .collect();

        let content = integers
            .iter()
            .filter(|c| **c != IBig::ZERO)
            .map(magnitude)
            .reduce(|a, b| a.gcd(b))
            .unwrap_or(UBig::ONE);

        if content > UBig::ONE {
            let content = IBig::from(content);
            for c in &mut integers {
                *c = c.clone() / &content;
            }
        }

        if integers.last().map_or(false, |c| *c < IBig::ZERO) {
            for c in &mut integers {
                *c = -c.clone();
            }
        }

        integers
    }
}

impl From<Vec<IBig>> for Polynomial {
    fn from(coeffs: Vec<IBig>) -> Self {
        Polynomial::new(coeffs.into_iter().map(RBig::from).collect())
    }
}

impl Display for Polynomial {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut first = true;

        for (power, c) in self.coeffs.iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }

            let negative = is_negative(c);
            match (first, negative) {
                (true, true) => write!(f, "-")?,
                (true, false) => {},
                (false, true) => write!(f, " - ")?,
                (false, false) => write!(f, " + ")?,
            }
            first = false;

            let magnitude = if negative { -c.clone() } else { c.clone() };

            match power {
                0 => write!(f, "{}", Rational(&magnitude))?,
                _ => {
                    if magnitude != RBig::ONE {
                        write!(f, "{}*", Rational(&magnitude))?;
                    }
                    write!(f, "{}", UNKNOWN)?;
                    if power > 1 {
                        write!(f, "^{}", power)?;
                    }
                },
            }
        }

        Ok(())
    }
}

/// A ratio of two polynomials, `numerator / denominator`.
///
/// The fraction is never reduced, so values of `x` which would make the
/// original expression divide by zero can still be detected.
/// Constant denominators are folded into the numerator.
#[derive(Debug, Clone, PartialEq)]
pub struct RationalFunction {
    numerator: Polynomial,
    denominator: Polynomial,
}

/// Tried to divide by something which is identically zero.
#[derive(Debug, Copy, Clone, PartialEq, thiserror::Error)]
#[error("division by zero")]
pub struct DivisionByZero;

impl RationalFunction {
    pub fn new(
        numerator: Polynomial,
        denominator: Polynomial,
    ) -> Result<Self, DivisionByZero> {
        if denominator.is_zero() {
            return Err(DivisionByZero);
        }

        if let Some(c) = denominator.as_constant() {
            let numerator = numerator.scale(&(RBig::ONE / c));
            return Ok(RationalFunction::from(numerator));
        }

        Ok(RationalFunction {
            numerator,
            denominator,
        })
    }

    pub fn constant(value: RBig) -> Self {
        RationalFunction::from(Polynomial::constant(value))
    }

    /// The unknown, `x`.
    pub fn unknown() -> Self { RationalFunction::from(Polynomial::x()) }

    pub fn numerator(&self) -> &Polynomial { &self.numerator }

    pub fn denominator(&self) -> &Polynomial { &self.denominator }

    /// The value of this function if it doesn't depend on `x`.
    pub fn as_constant(&self) -> Option<&RBig> {
        if self.denominator.as_constant().is_some() {
            self.numerator.as_constant()
        } else {
            None
        }
    }

    /// The largest degree of the numerator or denominator.
    pub fn degree(&self) -> usize {
        self.numerator.degree().max(self.denominator.degree())
    }

    pub fn add(&self, other: &RationalFunction) -> RationalFunction {
        if self.denominator == other.denominator {
            return RationalFunction {
                numerator: self.numerator.add(&other.numerator),
                denominator: self.denominator.clone(),
            };
        }

        RationalFunction {
            numerator: self
                .numerator
                .mul(&other.denominator)
                .add(&other.numerator.mul(&self.denominator)),
            denominator: self.denominator.mul(&other.denominator),
        }
    }

    pub fn neg(&self) -> RationalFunction {
        RationalFunction {
            numerator: self.numerator.neg(),
            denominator: self.denominator.clone(),
        }
    }

    pub fn sub(&self, other: &RationalFunction) -> RationalFunction {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &RationalFunction) -> RationalFunction {
        RationalFunction {
            numerator: self.numerator.mul(&other.numerator),
            denominator: self.denominator.mul(&other.denominator),
        }
    }

    pub fn div(
        &self,
        other: &RationalFunction,
    ) -> Result<RationalFunction, DivisionByZero> {
        RationalFunction::new(
            self.numerator.mul(&other.denominator),
            self.denominator.mul(&other.numerator),
        )
    }

    /// The multiplicative inverse, `1/self`.
    pub fn recip(&self) -> Result<RationalFunction, DivisionByZero> {
        RationalFunction::new(self.denominator.clone(), self.numerator.clone())
    }
}

impl From<Polynomial> for RationalFunction {
    fn from(numerator: Polynomial) -> Self {
        RationalFunction {
            numerator,
            denominator: Polynomial::one(),
        }
    }
}

impl Display for RationalFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.denominator == Polynomial::one() {
            return write!(f, "{}", self.numerator);
        }

        write_grouped(&self.numerator, f)?;
        write!(f, "/")?;
        write_grouped(&self.denominator, f)
    }
}

fn write_grouped(poly: &Polynomial, f: &mut Formatter<'_>) -> fmt::Result {
    let terms = poly.coeffs().iter().filter(|c| !c.is_zero()).count();

    if terms > 1 {
        write!(f, "({})", poly)
    } else {
        write!(f, "{}", poly)
    }
}

/// Displays an [`RBig`] as `p` or `p/q`.
#[derive(Debug, Copy, Clone)]
pub(crate) struct Rational<'a>(pub &'a RBig);

impl<'a> Display for Rational<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Rational(value) = *self;

        if value.denominator().is_one() {
            write!(f, "{}", value.numerator())
        } else {
            write!(f, "{}/{}", value.numerator(), value.denominator())
        }
    }
}

pub(crate) fn is_negative(value: &RBig) -> bool {
    value.numerator() < &IBig::ZERO
}

pub(crate) fn magnitude(value: &IBig) -> UBig {
    value.clone().unsigned_abs()
}

fn lcm(a: UBig, b: UBig) -> UBig {
    let gcd = a.clone().gcd(b.clone());
    a / gcd * b
}
