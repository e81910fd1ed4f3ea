//! Exact values built from rationals, the imaginary unit and radicals, used
//! to write down the roots of a polynomial in closed form.

use crate::{
    deadline::{Deadline, TimedOut},
    poly::{self, Rational},
};
use dashu::{
    base::{BitTest, UnsignedAbs},
    integer::{IBig, UBig},
    rational::RBig,
};
use std::fmt::{self, Display, Formatter};

/// Perfect powers with a base larger than this are left under the radical.
const POWER_FACTOR_LIMIT: u64 = 100_000;

/// A sum of terms, each a rational coefficient times a product of `I` and
/// powers with fractional exponents (`sqrt(2)`, `2^(1/3)`, ...).
///
/// Values are kept in a canonical form: like terms are merged, perfect
/// powers are pulled out of radicals and `I*I` becomes `-1`. Two equal
/// values built the same way compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Radical {
    terms: Vec<Term>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Term {
    /// Sorted.
    factors: Vec<Factor>,
    coefficient: RBig,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Factor {
    /// The principal value of `base^exponent`.
    ///
    /// Rational bases only ever carry an exponent strictly between 0 and 1.
    Power { base: Radical, exponent: RBig },
    /// The imaginary unit.
    I,
}

impl Radical {
    pub fn zero() -> Self { Radical { terms: Vec::new() } }

    pub fn rational(value: RBig) -> Self {
        Radical::from_terms(vec![Term {
            factors: Vec::new(),
            coefficient: value,
        }])
    }

    pub fn integer(value: i64) -> Self {
        Radical::rational(RBig::from(IBig::from(value)))
    }

    /// The imaginary unit, `I`.
    pub fn i() -> Self {
        Radical::from_terms(vec![Term {
            factors: vec![Factor::I],
            coefficient: RBig::ONE,
        }])
    }

    /// `exp(2*pi*I*k/n)`, the `k`'th of the `n`'th roots of unity.
    pub fn unit(n: usize, k: usize) -> Self {
        debug_assert!(n > 0);

        let k = k % n;
        let divisor = gcd(k, n);
        let (a, b) = (k / divisor, n / divisor);

        if 12 % b == 0 {
            let turn = a * 12 / b;
            cos_twelfths(turn).add(&cos_twelfths(15 - turn).mul(&Radical::i()))
        } else if 8 % b == 0 {
            let turn = a * 8 / b;
            cos_eighths(turn).add(&cos_eighths(10 - turn).mul(&Radical::i()))
        } else {
            // (-1)^(2k/n)
            Radical::power(
                Radical::integer(-1),
                RBig::from_parts(IBig::from(2 * a), UBig::from(b)),
            )
        }
    }

    /// `base^exponent`, taking the principal value.
    fn power(base: Radical, exponent: RBig) -> Self {
        let mut product = Product::new(RBig::ONE);
        product.push_power(base, exponent);
        product.finish()
    }

    /// `sqrt(n)` for a small natural number.
    fn sqrt_of(n: u8) -> Self {
        Radical::power(
            Radical::integer(i64::from(n)),
            RBig::from_parts(IBig::ONE, UBig::from(2u8)),
        )
    }

    fn from_terms(terms: Vec<Term>) -> Self {
        let mut terms: Vec<Term> = terms
            .into_iter()
            .filter(|t| !t.coefficient.is_zero())
            .collect();
        terms.sort_by(|a, b| a.factors.cmp(&b.factors));

        let mut merged: Vec<Term> = Vec::with_capacity(terms.len());

        for term in terms {
            match merged.last_mut() {
                Some(last) if last.factors == term.factors => {
                    last.coefficient = &last.coefficient + &term.coefficient;
                },
                _ => merged.push(term),
            }
        }

        merged.retain(|t| !t.coefficient.is_zero());
        // real parts first
        merged.sort_by_key(|t| t.factors.contains(&Factor::I));

        Radical { terms: merged }
    }

    /// The value, if it is rational.
    pub fn as_rational(&self) -> Option<RBig> {
        match self.terms.as_slice() {
            [] => Some(RBig::ZERO),
            [term] if term.factors.is_empty() => Some(term.coefficient.clone()),
            _ => None,
        }
    }

    pub fn is_zero(&self) -> bool { self.terms.is_empty() }

    fn is_natural(&self) -> bool {
        match self.as_rational() {
            Some(value) => {
                value.denominator().is_one() && !poly::is_negative(&value)
            },
            None => false,
        }
    }

    pub fn add(&self, other: &Radical) -> Radical {
        Radical::from_terms(
            self.terms.iter().chain(&other.terms).cloned().collect(),
        )
    }

    pub fn neg(&self) -> Radical { self.scale(&-RBig::ONE) }

    pub fn sub(&self, other: &Radical) -> Radical { self.add(&other.neg()) }

    pub fn scale(&self, factor: &RBig) -> Radical {
        Radical::from_terms(
            self.terms
                .iter()
                .map(|t| Term {
                    factors: t.factors.clone(),
                    coefficient: &t.coefficient * factor,
                })
                .collect(),
        )
    }

    pub fn mul(&self, other: &Radical) -> Radical {
        let mut product = Radical::zero();

        for a in &self.terms {
            for b in &other.terms {
                product = product.add(&a.mul(b));
            }
        }

        product
    }

    /// The multiplicative inverse, or `None` for zero.
    pub fn recip(&self) -> Option<Radical> {
        match self.terms.as_slice() {
            [] => None,
            [term] => {
                let mut product = Product::new(RBig::ONE / &term.coefficient);

                for factor in &term.factors {
                    match factor {
                        // 1/I = -I
                        Factor::I => {
                            product.push(Factor::I);
                            product.coefficient = -product.coefficient;
                        },
                        Factor::Power { base, exponent } => {
                            product.push_power(base.clone(), -exponent.clone())
                        },
                    }
                }

                Some(product.finish())
            },
            _ => Some(Radical::power(self.clone(), -RBig::ONE)),
        }
    }

    /// One of the `n`'th roots of this value.
    ///
    /// The principal root is used, except for negative rationals and odd
    /// `n` where the real root is preferred.
    pub fn nth_root(
        &self,
        n: usize,
        deadline: &Deadline,
    ) -> Result<Radical, TimedOut> {
        if n == 1 {
            return Ok(self.clone());
        }

        let value = match self.as_rational() {
            Some(value) => value,
            None => {
                return Ok(Radical::power(
                    self.clone(),
                    RBig::from_parts(IBig::ONE, UBig::from(n)),
                ))
            },
        };

        if value.is_zero() {
            return Ok(Radical::zero());
        }
        if !poly::is_negative(&value) {
            return positive_root(&value, n, deadline);
        }

        let magnitude = positive_root(&-value, n, deadline)?;

        Ok(if n == 2 {
            magnitude.mul(&Radical::i())
        } else if n % 2 == 1 {
            magnitude.neg()
        } else {
            magnitude.mul(&Radical::unit(2 * n, 1))
        })
    }
}

impl Term {
    fn mul(&self, other: &Term) -> Radical {
        let mut product = Product::new(&self.coefficient * &other.coefficient);
        product.factors = self.factors.clone();

        for factor in &other.factors {
            product.push(factor.clone());
        }

        product.finish()
    }

    fn write_magnitude(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let numerator = self.coefficient.numerator().clone().unsigned_abs();
        let denominator = self.coefficient.denominator();
        let mut above = Vec::new();
        let mut below = Vec::new();

        for factor in &self.factors {
            match factor {
                Factor::I => above.push(String::from("I")),
                Factor::Power { base, exponent } => {
                    if poly::is_negative(exponent) {
                        below.push(render_power(base, &-exponent.clone()));
                    } else {
                        above.push(render_power(base, exponent));
                    }
                },
            }
        }

        if !numerator.is_one() || above.is_empty() {
            above.insert(0, numerator.to_string());
        }
        if !denominator.is_one() {
            below.insert(0, denominator.to_string());
        }

        write!(f, "{}", above.join("*"))?;

        match below.len() {
            0 => Ok(()),
            1 => write!(f, "/{}", below[0]),
            _ => write!(f, "/({})", below.join("*")),
        }
    }
}

/// Accumulates the factors of a single term.
struct Product {
    coefficient: RBig,
    factors: Vec<Factor>,
    /// Whole powers of sums, multiplied out at the end.
    expanded: Vec<Radical>,
}

impl Product {
    fn new(coefficient: RBig) -> Self {
        Product {
            coefficient,
            factors: Vec::new(),
            expanded: Vec::new(),
        }
    }

    fn push(&mut self, factor: Factor) {
        match factor {
            Factor::I => {
                match self.factors.iter().position(|f| *f == Factor::I) {
                    Some(index) => {
                        self.factors.remove(index);
                        self.coefficient = -self.coefficient.clone();
                    },
                    None => self.factors.push(Factor::I),
                }
            },
            Factor::Power { base, exponent } => {
                let existing = self.factors.iter().position(|f| match f {
                    Factor::Power { base: b, .. } => *b == base,
                    Factor::I => false,
                });

                let exponent = match existing.map(|i| self.factors.remove(i)) {
                    Some(Factor::Power { exponent: e, .. }) => e + exponent,
                    _ => exponent,
                };

                self.push_power(base, exponent);
            },
        }
    }

    fn push_power(&mut self, base: Radical, exponent: RBig) {
        if exponent.is_zero() {
            return;
        }

        let whole = floor(&exponent);
        let fraction = exponent.clone() - RBig::from(whole.clone());

        match base.as_rational() {
            Some(value) if value.is_one() => {},
            Some(value) => {
                self.coefficient =
                    &self.coefficient * &rational_pow(&value, &whole);

                if !fraction.is_zero() {
                    self.factors.push(Factor::Power {
                        base,
                        exponent: fraction,
                    });
                }
            },
            None if fraction.is_zero() && whole > IBig::ZERO => {
                let mut remaining = whole.unsigned_abs();

                while !remaining.is_zero() {
                    self.expanded.push(base.clone());
                    remaining = remaining - UBig::ONE;
                }
            },
            None => self.factors.push(Factor::Power { base, exponent }),
        }
    }

    fn finish(mut self) -> Radical {
        self.factors.sort();

        let term = Radical::from_terms(vec![Term {
            factors: self.factors,
            coefficient: self.coefficient,
        }]);

        self.expanded.iter().fold(term, |acc, base| acc.mul(base))
    }
}

impl Display for Radical {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }

        for (i, term) in self.terms.iter().enumerate() {
            let negative = poly::is_negative(&term.coefficient);

            match (i, negative) {
                (0, true) => write!(f, "-")?,
                (0, false) => {},
                (_, true) => write!(f, " - ")?,
                (_, false) => write!(f, " + ")?,
            }

            term.write_magnitude(f)?;
        }

        Ok(())
    }
}

fn render_power(base: &Radical, exponent: &RBig) -> String {
    let half = RBig::from_parts(IBig::ONE, UBig::from(2u8));

    if *exponent == half {
        return format!("sqrt({})", base);
    }

    let base = if base.is_natural() {
        base.to_string()
    } else {
        format!("({})", base)
    };

    if !exponent.denominator().is_one() {
        format!("{}^({})", base, Rational(exponent))
    } else if exponent.is_one() {
        base
    } else {
        format!("{}^{}", base, exponent.numerator())
    }
}

/// `cos(2*pi*turn/12)`.
fn cos_twelfths(turn: usize) -> Radical {
    let half = RBig::from_parts(IBig::ONE, UBig::from(2u8));

    match turn % 12 {
        0 => Radical::integer(1),
        1 | 11 => Radical::sqrt_of(3).scale(&half),
        2 | 10 => Radical::rational(half),
        3 | 9 => Radical::zero(),
        4 | 8 => Radical::rational(-half),
        5 | 7 => Radical::sqrt_of(3).scale(&-half),
        _ => Radical::integer(-1),
    }
}

/// `cos(2*pi*turn/8)`.
fn cos_eighths(turn: usize) -> Radical {
    let half = RBig::from_parts(IBig::ONE, UBig::from(2u8));

    match turn % 8 {
        0 => Radical::integer(1),
        1 | 7 => Radical::sqrt_of(2).scale(&half),
        2 | 6 => Radical::zero(),
        3 | 5 => Radical::sqrt_of(2).scale(&-half),
        _ => Radical::integer(-1),
    }
}

/// The real, positive `n`'th root of a positive rational.
fn positive_root(
    value: &RBig,
    n: usize,
    deadline: &Deadline,
) -> Result<Radical, TimedOut> {
    // p/q = p*q^(n-1) / q^n
    let denominator = value.denominator().clone();
    let numerator = value.numerator().clone().unsigned_abs();
    let radicand = numerator * denominator.pow(n - 1);

    let (outside, inside, index) = extract_power(radicand, n, deadline)?;
    let coefficient = RBig::from_parts(IBig::from(outside), denominator);

    if inside.is_one() {
        return Ok(Radical::rational(coefficient));
    }

    let root = Radical::power(
        Radical::rational(RBig::from(IBig::from(inside))),
        RBig::from_parts(IBig::ONE, UBig::from(index)),
    );

    Ok(root.scale(&coefficient))
}

/// Rewrite `m^(1/n)` as `outside * inside^(1/index)`, pulling as many
/// perfect powers out of the radical as is reasonable.
fn extract_power(
    m: UBig,
    n: usize,
    deadline: &Deadline,
) -> Result<(UBig, UBig, usize), TimedOut> {
    let root = integer_root(&m, n);
    if root.pow(n) == m {
        return Ok((root, UBig::ONE, n));
    }

    let mut outside = UBig::ONE;
    let mut inside = m;

    for k in 2..=POWER_FACTOR_LIMIT {
        if k % 1024 == 0 {
            deadline.check()?;
        }

        let power = UBig::from(k).pow(n);
        if power > inside {
            break;
        }

        while (inside.clone() % power.clone()).is_zero() {
            inside = inside / power.clone();
            outside = outside * UBig::from(k);
        }
    }

    // 4^(1/4) is sqrt(2)
    let mut index = n;
    let mut d = 2;

    while d <= index {
        if index % d == 0 {
            let root = integer_root(&inside, d);

            if root.pow(d) == inside {
                inside = root;
                index /= d;
                continue;
            }
        }

        d += 1;
    }

    Ok((outside, inside, index))
}

/// `floor(m^(1/n))`, using Newton's method.
fn integer_root(m: &UBig, n: usize) -> UBig {
    if m.is_zero() || n == 1 {
        return m.clone();
    }

    let bits = m.bit_len();
    let mut x = UBig::ONE << ((bits + n - 1) / n);
    let n_big = UBig::from(n);
    let n_minus_one = UBig::from(n - 1);

    loop {
        let y = (n_minus_one.clone() * x.clone() + m.clone() / x.pow(n - 1))
            / n_big.clone();

        if y >= x {
            return x;
        }

        x = y;
    }
}

fn floor(value: &RBig) -> IBig {
    let numerator = value.numerator();
    let denominator = IBig::from(value.denominator().clone());
    let quotient = numerator / &denominator;

    if numerator < &IBig::ZERO && &quotient * &denominator != *numerator {
        quotient - IBig::ONE
    } else {
        quotient
    }
}

fn rational_pow(value: &RBig, exponent: &IBig) -> RBig {
    let mut result = RBig::ONE;
    let mut remaining = exponent.clone().unsigned_abs();

    while !remaining.is_zero() {
        result = result * value;
        remaining = remaining - UBig::ONE;
    }

    if *exponent < IBig::ZERO {
        RBig::ONE / result
    } else {
        result
    }
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}
