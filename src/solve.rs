//! Finding the exact roots of an [`Equation`].

use crate::{
    deadline::{Deadline, TimedOut},
    poly::{self, Polynomial},
    radical::Radical,
    Equation,
};
use dashu::{
    base::UnsignedAbs,
    integer::{IBig, UBig},
    rational::RBig,
};
use std::fmt::{self, Display, Formatter};

/// The largest value we'll enumerate divisors of, either when looking for
/// rational roots or when sampling a polynomial to factor it.
const DIVISOR_SEARCH_LIMIT: u64 = 1_000_000_000_000;
/// Factoring is only attempted on polynomials up to this degree.
const FACTOR_DEGREE_LIMIT: usize = 16;
/// How many candidate factors may be interpolated for a single degree.
const FACTOR_TRIAL_LIMIT: usize = 50_000;

/// Every value of the unknown which satisfies an equation.
#[derive(Debug, Clone, PartialEq)]
pub enum SolutionSet {
    /// A finite (possibly empty) list of distinct roots.
    Roots(Vec<Radical>),
    /// The equation holds for every value of the unknown.
    All,
}

impl SolutionSet {
    pub fn roots(&self) -> &[Radical] {
        match self {
            SolutionSet::Roots(roots) => roots,
            SolutionSet::All => &[],
        }
    }

    pub fn is_all(&self) -> bool { *self == SolutionSet::All }
}

impl Display for SolutionSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SolutionSet::All => write!(f, "Complexes"),
            SolutionSet::Roots(roots) => {
                write!(f, "[")?;

                for (i, root) in roots.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", root)?;
                }

                write!(f, "]")
            },
        }
    }
}

/// Reasons the roots of an equation couldn't be found.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolveError {
    #[error("no closed-form solution for a factor of degree {degree}")]
    NoClosedForm { degree: usize },
    #[error(transparent)]
    TimedOut(#[from] TimedOut),
}

/// Find every value of the unknown which satisfies an [`Equation`].
///
/// Roots are returned in a canonical order: distinct rational roots in
/// ascending order, followed by the remaining roots factor by factor.
/// Values which would make either side divide by zero are discarded.
pub fn solve(
    equation: &Equation,
    deadline: &Deadline,
) -> Result<SolutionSet, SolveError> {
    let body = equation.numerator();

    if body.is_zero() {
        return Ok(SolutionSet::All);
    }

    if body.degree() == 0 {
        return Ok(SolutionSet::Roots(Vec::new()));
    }

    let mut candidates = square_free(&body, deadline)?;

    for denominator in equation.denominators() {
        if denominator.as_constant().is_some() {
            continue;
        }

        let shared = gcd(&candidates, denominator, deadline)?;
        if shared.degree() > 0 {
            candidates = candidates.div_rem(&shared).0;
        }
    }

    if candidates.degree() == 0 {
        return Ok(SolutionSet::Roots(Vec::new()));
    }

    let roots = roots_of_square_free(&candidates, deadline)?;

    Ok(SolutionSet::Roots(roots))
}

/// The product of the distinct irreducible factors of `poly`, as a
/// primitive integer polynomial.
fn square_free(
    poly: &Polynomial,
    deadline: &Deadline,
) -> Result<Polynomial, TimedOut> {
    let repeated = gcd(poly, &poly.derivative(), deadline)?;
    let (reduced, _) = poly.div_rem(&repeated);

    Ok(Polynomial::from(reduced.primitive_integer_coeffs()))
}

/// The monic greatest common divisor of two polynomials.
fn gcd(
    a: &Polynomial,
    b: &Polynomial,
    deadline: &Deadline,
) -> Result<Polynomial, TimedOut> {
    let mut a = a.monic();
    let mut b = b.monic();

    while !b.is_zero() {
        deadline.check()?;

        let (_, remainder) = a.div_rem(&b);
        a = b;
        b = remainder.monic();
    }

    Ok(a)
}

/// Find the roots of a polynomial with no repeated factors.
fn roots_of_square_free(
    poly: &Polynomial,
    deadline: &Deadline,
) -> Result<Vec<Radical>, SolveError> {
    let mut remaining = Polynomial::from(poly.primitive_integer_coeffs());
    let mut roots = Vec::new();

    if remaining.coeff(0).is_zero() {
        roots.push(Radical::zero());
        remaining = remaining.div_rem(&Polynomial::x()).0;
    }

    if remaining.degree() > 2 {
        let candidates = rational_root_candidates(&remaining, deadline)?;

        for candidate in candidates.into_iter().flatten() {
            if remaining.degree() <= 2 {
                break;
            }
            deadline.check()?;

            if remaining.eval(&candidate).is_zero() {
                let factor = Polynomial::linear_factor(&candidate);
                remaining = remaining.div_rem(&factor).0;
                roots.push(Radical::rational(candidate));
            }
        }

        remaining = Polynomial::from(remaining.primitive_integer_coeffs());
    }

    if remaining.degree() > 0 {
        for factor in factor(&remaining, deadline)? {
            roots.extend(roots_of_factor(&factor, deadline)?);
        }
    }

    Ok(canonical_order(roots))
}

/// Rational roots first, in ascending order, then everything else as it was
/// found.
fn canonical_order(roots: Vec<Radical>) -> Vec<Radical> {
    let mut rationals = Vec::new();
    let mut others = Vec::new();

    for root in roots {
        match root.as_rational() {
            Some(value) => rationals.push(value),
            None => others.push(root),
        }
    }

    rationals.sort();
    rationals.dedup();

    rationals
        .into_iter()
        .map(Radical::rational)
        .chain(others)
        .collect()
}

/// Every `±p/q` where `p` divides the constant term and `q` divides the
/// leading coefficient, in ascending order.
///
/// Returns `None` when the coefficients are too large to enumerate.
fn rational_root_candidates(
    poly: &Polynomial,
    deadline: &Deadline,
) -> Result<Option<Vec<RBig>>, TimedOut> {
    let integers = poly.primitive_integer_coeffs();
    let limits = (
        search_limit(&integers[0]),
        search_limit(&integers[integers.len() - 1]),
    );

    let (constant, leading) = match limits {
        (Some(constant), Some(leading)) => (constant, leading),
        _ => return Ok(None),
    };

    let numerators = divisors(constant, deadline)?;
    let denominators = divisors(leading, deadline)?;
    let mut candidates = Vec::new();

    for p in &numerators {
        deadline.check()?;

        for q in &denominators {
            let candidate =
                RBig::from_parts(IBig::from(*p), UBig::from(*q));
            candidates.push(-candidate.clone());
            candidates.push(candidate);
        }
    }

    candidates.sort();
    candidates.dedup();

    Ok(Some(candidates))
}

fn search_limit(value: &IBig) -> Option<u64> {
    u64::try_from(value.clone().unsigned_abs())
        .ok()
        .filter(|n| *n <= DIVISOR_SEARCH_LIMIT)
}

fn divisors(n: u64, deadline: &Deadline) -> Result<Vec<u64>, TimedOut> {
    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut d = 1;

    while d * d <= n {
        if d % 4096 == 0 {
            deadline.check()?;
        }

        if n % d == 0 {
            small.push(d);
            if d * d != n {
                large.push(n / d);
            }
        }

        d += 1;
    }

    small.extend(large.into_iter().rev());
    Ok(small)
}

/// Split a primitive integer polynomial without rational roots into
/// factors over the integers, using Kronecker's method.
///
/// Factors are returned lowest degree first. Polynomials too large to
/// search are returned whole.
fn factor(
    poly: &Polynomial,
    deadline: &Deadline,
) -> Result<Vec<Polynomial>, TimedOut> {
    let mut pending = vec![poly.clone()];
    let mut factors = Vec::new();

    while let Some(next) = pending.pop() {
        match split_off_factor(&next, deadline)? {
            Some(divisor) => {
                let (quotient, _) = next.div_rem(&divisor);
                pending.push(Polynomial::from(
                    quotient.primitive_integer_coeffs(),
                ));
                pending.push(divisor);
            },
            None => factors.push(next),
        }
    }

    factors.sort_by_key(|f| {
        let coeffs = f.primitive_integer_coeffs();
        (f.degree(), poly::magnitude(&coeffs[0]), coeffs)
    });

    Ok(factors)
}

fn split_off_factor(
    poly: &Polynomial,
    deadline: &Deadline,
) -> Result<Option<Polynomial>, TimedOut> {
    let degree = poly.degree();

    if degree < 4 || degree > FACTOR_DEGREE_LIMIT {
        return Ok(None);
    }

    for m in 2..=degree / 2 {
        if let Some(divisor) = factor_of_degree(poly, m, deadline)? {
            return Ok(Some(divisor));
        }
    }

    Ok(None)
}

/// A point where the polynomial was sampled, and the values a factor could
/// take there.
struct Sample {
    point: RBig,
    candidates: Vec<RBig>,
}

/// Look for an integer factor of degree `m` by interpolating through every
/// combination of divisors of the polynomial's values at `m + 1` points.
fn factor_of_degree(
    poly: &Polynomial,
    m: usize,
    deadline: &Deadline,
) -> Result<Option<Polynomial>, TimedOut> {
    let samples = match sample(poly, m + 1, deadline)? {
        Some(samples) => samples,
        None => return Ok(None),
    };

    let trials = samples
        .iter()
        .try_fold(1_usize, |acc, s| acc.checked_mul(s.candidates.len()));
    if trials.map_or(true, |t| t > FACTOR_TRIAL_LIMIT) {
        return Ok(None);
    }

    let basis = lagrange_basis(&samples);
    let mut indices = vec![0; samples.len()];

    for trial in 0_usize.. {
        if trial % 1024 == 0 {
            deadline.check()?;
        }

        let candidate = basis
            .iter()
            .zip(&samples)
            .zip(&indices)
            .fold(Polynomial::zero(), |acc, ((b, s), &i)| {
                acc.add(&b.scale(&s.candidates[i]))
            });

        let integral = candidate
            .coeffs()
            .iter()
            .all(|c| c.denominator().is_one());

        if candidate.degree() == m
            && integral
            && poly.is_divisible_by(&candidate)
        {
            let divisor = candidate.primitive_integer_coeffs();
            return Ok(Some(Polynomial::from(divisor)));
        }

        if !advance(&mut indices, &samples) {
            break;
        }
    }

    Ok(None)
}

/// Step to the next combination, returning `false` once they're exhausted.
fn advance(indices: &mut [usize], samples: &[Sample]) -> bool {
    for (index, s) in indices.iter_mut().zip(samples) {
        *index += 1;

        if *index < s.candidates.len() {
            return true;
        }

        *index = 0;
    }

    false
}

/// Pick `count` integer points where the polynomial's value has the fewest
/// divisors.
fn sample(
    poly: &Polynomial,
    count: usize,
    deadline: &Deadline,
) -> Result<Option<Vec<Sample>>, TimedOut> {
    let mut found = Vec::new();

    for step in 0..3 * count as i64 {
        // 0, 1, -1, 2, -2, ...
        let point = if step % 2 == 1 {
            (step + 1) / 2
        } else {
            -step / 2
        };
        let point = RBig::from(IBig::from(point));
        let value = poly.eval(&point);

        let limit = match search_limit(value.numerator()) {
            Some(limit) if limit > 0 => limit,
            _ => continue,
        };

        found.push((point, divisors(limit, deadline)?));
    }

    if found.len() < count {
        return Ok(None);
    }

    found.sort_by_key(|(_, divisors)| divisors.len());
    found.truncate(count);

    let samples = found
        .into_iter()
        .enumerate()
        .map(|(i, (point, divisors))| {
            let mut candidates = Vec::new();

            for d in divisors {
                let d = RBig::from(IBig::from(d));
                // a factor and its negation are equivalent
                if i > 0 {
                    candidates.push(-d.clone());
                }
                candidates.push(d);
            }

            Sample { point, candidates }
        })
        .collect();

    Ok(Some(samples))
}

/// The polynomials which are `1` at one sample point and `0` at the rest.
fn lagrange_basis(samples: &[Sample]) -> Vec<Polynomial> {
    samples
        .iter()
        .enumerate()
        .map(|(i, s)| {
            samples
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .fold(Polynomial::one(), |acc, (_, other)| {
                    let gap = s.point.clone() - other.point.clone();
                    acc.mul(&Polynomial::linear_factor(&other.point))
                        .scale(&(RBig::ONE / &gap))
                })
        })
        .collect()
}

/// Solve a single factor in closed form.
fn roots_of_factor(
    poly: &Polynomial,
    deadline: &Deadline,
) -> Result<Vec<Radical>, SolveError> {
    deadline.check()?;

    let degree = poly.degree();
    let k = stride(poly);

    if degree <= 2 {
        return Ok(quadratic_roots(poly, deadline)?);
    }

    if k > 1 {
        return substitute_power(poly, k, deadline);
    }

    match degree {
        3 => cubic_roots(poly, deadline),
        4 => quartic_roots(poly, deadline),
        _ => Err(SolveError::NoClosedForm { degree }),
    }
}

/// The largest `k` where `poly` only has powers of `x^k`.
fn stride(poly: &Polynomial) -> usize {
    poly.coeffs()
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, c)| !c.is_zero())
        .fold(0, |acc, (power, _)| gcd_usize(acc, power))
}

fn gcd_usize(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd_usize(b, a % b)
    }
}

/// Solve `p(x^k) = 0` by solving `p(y) = 0` then taking `k`'th roots.
fn substitute_power(
    poly: &Polynomial,
    k: usize,
    deadline: &Deadline,
) -> Result<Vec<Radical>, SolveError> {
    let inner = Polynomial::new(
        poly.coeffs().iter().step_by(k).cloned().collect(),
    );
    let mut roots = Vec::new();

    for y in roots_of_square_free(&inner, deadline)? {
        let root = y.nth_root(k, deadline)?;

        if k == 2 {
            roots.push(root.neg());
            roots.push(root);
        } else {
            for j in 0..k {
                roots.push(root.mul(&Radical::unit(k, j)));
            }
        }
    }

    Ok(roots)
}

/// The quadratic formula, minus branch first. Also handles linear
/// polynomials.
fn quadratic_roots(
    poly: &Polynomial,
    deadline: &Deadline,
) -> Result<Vec<Radical>, TimedOut> {
    let (c, b) = (poly.coeff(0), poly.coeff(1));

    if poly.degree() == 1 {
        return Ok(vec![Radical::rational(-c / b)]);
    }

    let a = poly.coeff(2);
    let four = RBig::from(IBig::from(4));
    let discriminant = &b * &b - &(&four * &a) * &c;
    let two_a = &a + &a;

    let vertex = Radical::rational(-b / &two_a);
    let offset = Radical::rational(discriminant)
        .nth_root(2, deadline)?
        .scale(&(RBig::ONE / &two_a));

    if offset.is_zero() {
        return Ok(vec![vertex]);
    }

    Ok(vec![vertex.sub(&offset), vertex.add(&offset)])
}

/// Cardano's formula.
fn cubic_roots(
    poly: &Polynomial,
    deadline: &Deadline,
) -> Result<Vec<Radical>, SolveError> {
    // x = t + shift turns the cubic into t^3 + pt + q
    let monic = poly.monic();
    let shift = -(monic.coeff(2) / RBig::from(IBig::from(3)));
    let depressed = monic.shift(&shift);
    let (q, p) = (depressed.coeff(0), depressed.coeff(1));
    let shift = Radical::rational(shift);

    if p.is_zero() {
        let root = Radical::rational(-q).nth_root(3, deadline)?;

        return Ok((0..3)
            .map(|k| root.mul(&Radical::unit(3, k)).add(&shift))
            .collect());
    }

    // u^3 = -q/2 ± sqrt(q^2/4 + p^3/27)
    let half_q = q / RBig::from(IBig::from(2));
    let discriminant = &half_q * &half_q
        + &p * &p * &p / RBig::from(IBig::from(27));
    let sqrt = Radical::rational(discriminant).nth_root(2, deadline)?;

    let mut cube = Radical::rational(-half_q.clone()).add(&sqrt);
    if cube.is_zero() {
        cube = Radical::rational(-half_q).sub(&sqrt);
    }

    let u = cube.nth_root(3, deadline)?;
    // v = -p/(3u)
    let v = u
        .recip()
        .ok_or(SolveError::NoClosedForm { degree: 3 })?
        .scale(&(-p / RBig::from(IBig::from(3))));

    Ok((0..3)
        .map(|k| {
            let conjugate = (3 - k) % 3;
            u.mul(&Radical::unit(3, k))
                .add(&v.mul(&Radical::unit(3, conjugate)))
                .add(&shift)
        })
        .collect())
}

/// Ferrari's method.
fn quartic_roots(
    poly: &Polynomial,
    deadline: &Deadline,
) -> Result<Vec<Radical>, SolveError> {
    // x = y + shift turns the quartic into y^4 + py^2 + qy + r
    let monic = poly.monic();
    let shift = -(monic.coeff(3) / RBig::from(IBig::from(4)));
    let depressed = monic.shift(&shift);
    let (r, q, p) =
        (depressed.coeff(0), depressed.coeff(1), depressed.coeff(2));
    let shift = Radical::rational(shift);
    let mut roots = Vec::new();

    if q.is_zero() {
        let inner = Polynomial::new(vec![r, p, RBig::ONE]);

        for z in quadratic_roots(&inner, deadline)? {
            let y = z.nth_root(2, deadline)?;
            roots.push(shift.sub(&y));
            roots.push(shift.add(&y));
        }

        return Ok(roots);
    }

    // (y^2 + p/2 + m)^2 = 2m(y - q/4m)^2 when
    // 8m^3 + 8pm^2 + (2p^2 - 8r)m - q^2 = 0
    let eight = RBig::from(IBig::from(8));
    let two = RBig::from(IBig::from(2));
    let resolvent = Polynomial::new(vec![
        -(&q * &q),
        &two * &p * &p - &eight * &r,
        &eight * &p,
        eight,
    ]);
    let m = resolvent_root(&resolvent, deadline)?;

    let w = m.scale(&two).nth_root(2, deadline)?;
    let w_recip = w.recip().ok_or(SolveError::NoClosedForm { degree: 4 })?;
    let base = m.add(&Radical::rational(p)).scale(&two);
    let skew = w_recip.scale(&(&two * &q));

    for sign in [-RBig::ONE, RBig::ONE] {
        // y = (±w ± sqrt(-(2p + 2m ± 2q/w)))/2
        let inside = base.add(&skew.scale(&sign)).neg();
        let sqrt = inside.nth_root(2, deadline)?;
        let centre = w.scale(&sign);

        for branch in [centre.sub(&sqrt), centre.add(&sqrt)] {
            let y = branch.scale(&RBig::from_parts(
                IBig::ONE,
                UBig::from(2u8),
            ));
            roots.push(y.add(&shift));
        }
    }

    Ok(roots)
}

/// Any root of Ferrari's resolvent cubic, preferring a rational one.
fn resolvent_root(
    resolvent: &Polynomial,
    deadline: &Deadline,
) -> Result<Radical, SolveError> {
    if let Some(candidates) = rational_root_candidates(resolvent, deadline)? {
        for candidate in candidates {
            if !candidate.is_zero() && resolvent.eval(&candidate).is_zero() {
                return Ok(Radical::rational(candidate));
            }
        }
    }

    cubic_roots(resolvent, deadline)?
        .into_iter()
        .find(|root| !root.is_zero())
        .ok_or(SolveError::NoClosedForm { degree: 4 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radical::tests::{approximate, to_f64};
    use num_complex::Complex64;

    fn poly(coeffs: &[i64]) -> Polynomial {
        Polynomial::from(
            coeffs.iter().map(|&c| IBig::from(c)).collect::<Vec<_>>(),
        )
    }

    fn find_roots(coeffs: &[i64]) -> Result<Vec<Radical>, SolveError> {
        let deadline = Deadline::never();
        let p = square_free(&poly(coeffs), &deadline)?;

        roots_of_square_free(&p, &deadline)
    }

    fn roots_of(coeffs: &[i64]) -> String {
        SolutionSet::Roots(find_roots(coeffs).unwrap()).to_string()
    }

    /// Substitute each root back into the polynomial and make sure there
    /// is one distinct root per degree.
    fn assert_roots_check_out(coeffs: &[i64]) {
        let p = poly(coeffs);
        let roots = find_roots(coeffs).unwrap();
        let values: Vec<Complex64> = roots.iter().map(approximate).collect();

        assert_eq!(roots.len(), p.degree(), "{}", p);

        for (root, z) in roots.iter().zip(&values) {
            let residual = p.coeffs().iter().rev().fold(
                Complex64::new(0.0, 0.0),
                |acc, c| acc * z + to_f64(c),
            );

            assert!(
                residual.norm() < 1e-6,
                "{} isn't a root of {} (residual {})",
                root,
                p,
                residual
            );
        }

        for (i, a) in values.iter().enumerate() {
            for b in &values[i + 1..] {
                assert!((a - b).norm() > 1e-6, "duplicate roots of {}", p);
            }
        }
    }

    #[test]
    fn polynomial_roots() {
        let inputs = vec![
            (&[4, 2][..], "[-2]"),
            (&[-1, 0, 1][..], "[-1, 1]"),
            (&[1, -2, 1][..], "[1]"),
            (&[0, 0, 1][..], "[0]"),
            (&[0, -1, 0, 1][..], "[-1, 0, 1]"),
            (&[-6, 11, -6, 1][..], "[1, 2, 3]"),
            (&[1, 0, 1][..], "[-I, I]"),
            (&[4, 0, 1][..], "[-2*I, 2*I]"),
            (&[-2, 0, 1][..], "[-sqrt(2), sqrt(2)]"),
            (&[-8, 0, 1][..], "[-2*sqrt(2), 2*sqrt(2)]"),
            (&[-1, 2, 1][..], "[-1 - sqrt(2), -1 + sqrt(2)]"),
            (&[1, 1, 1][..], "[-1/2 - sqrt(3)*I/2, -1/2 + sqrt(3)*I/2]"),
            (&[-1, 0, 0, 0, 1][..], "[-1, 1, -I, I]"),
            (&[-1, 0, 2][..], "[-sqrt(2)/2, sqrt(2)/2]"),
            (&[-3, 2][..], "[3/2]"),
            (&[6, 0, -5, 0, 1][..], "[-sqrt(2), sqrt(2), -sqrt(3), sqrt(3)]"),
            (
                &[-4, 0, 0, 0, 1][..],
                "[-sqrt(2), sqrt(2), -sqrt(2)*I, sqrt(2)*I]",
            ),
            (
                &[-2, 0, 0, 1][..],
                "[2^(1/3), -2^(1/3)/2 + 2^(1/3)*sqrt(3)*I/2, \
                 -2^(1/3)/2 - 2^(1/3)*sqrt(3)*I/2]",
            ),
            (
                &[-1, 0, 0, 0, 0, 0, 1][..],
                "[-1, 1, 1/2 - sqrt(3)*I/2, 1/2 + sqrt(3)*I/2, \
                 -1/2 - sqrt(3)*I/2, -1/2 + sqrt(3)*I/2]",
            ),
            // (x - 1)^2 (x^2 - 2)
            (&[-2, 4, -1, -2, 1][..], "[1, -sqrt(2), sqrt(2)]"),
        ];

        for (coeffs, should_be) in inputs {
            assert_eq!(roots_of(coeffs), should_be, "{:?}", coeffs);
        }
    }

    #[test]
    fn higher_degree_roots_check_out() {
        let inputs: Vec<&[i64]> = vec![
            // x^3 - 3x + 1, three real roots
            &[1, -3, 0, 1],
            // x^3 + x + 1, one real root
            &[1, 1, 0, 1],
            &[-1, 3, 0, 2],
            &[-2, 0, 0, 1],
            &[-1, 0, 0, 0, 0, 0, 1],
            &[6, 0, -5, 0, 1],
            &[-4, 0, 0, 0, 1],
            &[1, 0, 0, 0, 1],
            &[-2, 0, 0, 0, 0, 1],
            // x^4 + x + 1 needs the full quartic formula
            &[1, 1, 0, 0, 1],
            &[-3, 1, 2, 0, 1],
            // x^4 - 10x^2 + 1, minimal polynomial of sqrt(2) + sqrt(3)
            &[1, 0, -10, 0, 1],
            // (x^2 + x + 1)(x^3 - 2)
            &[-2, -2, -2, 1, 1, 1],
        ];

        for coeffs in inputs {
            assert_roots_check_out(coeffs);
        }
    }

    #[test]
    fn quintics_without_solvable_factors_have_no_closed_form() {
        let got = find_roots(&[-1, -1, 0, 0, 0, 1]);

        assert_eq!(got, Err(SolveError::NoClosedForm { degree: 5 }));
    }

    #[test]
    fn square_free_parts() {
        // (x - 1)^2 (x + 2) -> (x - 1)(x + 2)
        let got = square_free(&poly(&[2, -3, 0, 1]), &Deadline::never());

        assert_eq!(got.unwrap(), poly(&[-2, 1, 1]));
    }

    #[test]
    fn factor_over_the_integers() {
        // x^4 + x^2 + 1 = (x^2 - x + 1)(x^2 + x + 1)
        let got = factor(&poly(&[1, 0, 1, 0, 1]), &Deadline::never()).unwrap();

        assert_eq!(got, vec![poly(&[1, -1, 1]), poly(&[1, 1, 1])]);

        // x^4 + 1 is irreducible
        let got = factor(&poly(&[1, 0, 0, 0, 1]), &Deadline::never()).unwrap();

        assert_eq!(got, vec![poly(&[1, 0, 0, 0, 1])]);
    }

    #[test]
    fn strides() {
        assert_eq!(stride(&poly(&[-1, 0, 0, 0, 0, 0, 1])), 6);
        assert_eq!(stride(&poly(&[6, 0, -5, 0, 1])), 2);
        assert_eq!(stride(&poly(&[1, 1, 0, 1])), 1);
    }

    #[test]
    fn divisors_are_sorted() {
        let got = divisors(36, &Deadline::never()).unwrap();

        assert_eq!(got, vec![1, 2, 3, 4, 6, 9, 12, 18, 36]);
    }

    #[test]
    fn running_out_of_time_while_factoring() {
        let expired = Deadline::after(std::time::Duration::from_millis(0));

        let got = factor(&poly(&[1, 0, 1, 0, 1]), &expired);

        assert_eq!(got, Err(TimedOut));
    }

    #[test]
    fn the_identity_sentinel_is_not_an_empty_list() {
        assert_eq!(SolutionSet::All.to_string(), "Complexes");
        assert_eq!(SolutionSet::Roots(Vec::new()).to_string(), "[]");
        assert!(SolutionSet::All.roots().is_empty());
        assert!(SolutionSet::All.is_all());
        assert!(!SolutionSet::Roots(Vec::new()).is_all());
    }
}
