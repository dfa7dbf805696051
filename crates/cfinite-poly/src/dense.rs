//! Dense univariate polynomials.
//!
//! Coefficients are stored in ascending degree order with no trailing
//! zeros, so two polynomials are equal exactly when their coefficient
//! vectors are.

use std::fmt;

use cfinite_rings::rationals::Q;
use cfinite_rings::traits::Ring;
use num_traits::{One, Zero};

/// A dense univariate polynomial.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct DensePoly<R: Ring> {
    /// Coefficients in ascending degree order.
    coeffs: Vec<R>,
}

impl<R: Ring> DensePoly<R> {
    /// Creates a new polynomial from coefficients in ascending order.
    #[must_use]
    pub fn new(mut coeffs: Vec<R>) -> Self {
        while coeffs.len() > 1 && coeffs.last().is_some_and(R::is_zero) {
            coeffs.pop();
        }

        if coeffs.is_empty() {
            coeffs.push(R::zero());
        }

        Self { coeffs }
    }

    /// Creates the zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            coeffs: vec![R::zero()],
        }
    }

    /// Creates the constant polynomial 1.
    #[must_use]
    pub fn one() -> Self {
        Self {
            coeffs: vec![R::one()],
        }
    }

    /// Creates a constant polynomial.
    #[must_use]
    pub fn constant(c: R) -> Self {
        Self::new(vec![c])
    }

    /// Creates the polynomial x.
    #[must_use]
    pub fn x() -> Self {
        Self::new(vec![R::zero(), R::one()])
    }

    /// Creates the monomial c * x^n.
    #[must_use]
    pub fn monomial(c: R, n: usize) -> Self {
        let mut coeffs = vec![R::zero(); n + 1];
        coeffs[n] = c;
        Self::new(coeffs)
    }

    /// Creates a polynomial from machine integer coefficients.
    #[must_use]
    pub fn from_i64s(coeffs: &[i64]) -> Self {
        Self::new(coeffs.iter().map(|&c| R::from_i64(c)).collect())
    }

    /// Returns the degree. The zero polynomial has degree 0.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Returns true if this is the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_zero()
    }

    /// Returns true if the polynomial has degree 0 (including zero).
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.coeffs.len() == 1
    }

    /// Returns the leading coefficient.
    #[must_use]
    pub fn leading_coeff(&self) -> &R {
        &self.coeffs[self.coeffs.len() - 1]
    }

    /// Returns the coefficient of x^0.
    #[must_use]
    pub fn constant_coeff(&self) -> &R {
        &self.coeffs[0]
    }

    /// Returns the coefficient of x^i.
    #[must_use]
    pub fn coeff(&self, i: usize) -> R {
        self.coeffs.get(i).cloned().unwrap_or_else(R::zero)
    }

    /// Returns all coefficients in ascending order.
    #[must_use]
    pub fn coeffs(&self) -> &[R] {
        &self.coeffs
    }

    /// Returns the lowest power of x with a non-zero coefficient.
    ///
    /// The zero polynomial has valuation 0.
    #[must_use]
    pub fn valuation(&self) -> usize {
        self.coeffs.iter().position(|c| !c.is_zero()).unwrap_or(0)
    }

    /// Evaluates the polynomial at a point using Horner's method.
    #[must_use]
    pub fn eval(&self, x: &R) -> R {
        let mut result = R::zero();
        for c in self.coeffs.iter().rev() {
            result = result * x.clone() + c.clone();
        }
        result
    }

    /// Adds two polynomials.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        Self::new((0..len).map(|i| self.coeff(i) + other.coeff(i)).collect())
    }

    /// Negates a polynomial.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self::new(self.coeffs.iter().map(|c| -c.clone()).collect())
    }

    /// Subtracts two polynomials.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Multiplies two polynomials (schoolbook).
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }

        let mut result = vec![R::zero(); self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coeffs.iter().enumerate() {
                result[i + j] = result[i + j].clone() + a.clone() * b.clone();
            }
        }

        Self::new(result)
    }

    /// Multiplies by a scalar.
    #[must_use]
    pub fn scale(&self, c: &R) -> Self {
        if c.is_zero() {
            return Self::zero();
        }
        Self::new(self.coeffs.iter().map(|x| x.clone() * c.clone()).collect())
    }

    /// Multiplies by x^n.
    #[must_use]
    pub fn shift(&self, n: usize) -> Self {
        if self.is_zero() || n == 0 {
            return self.clone();
        }

        let mut coeffs = vec![R::zero(); n];
        coeffs.extend(self.coeffs.iter().cloned());
        Self::new(coeffs)
    }

    /// Divides by x^n, discarding the coefficients of x^0..x^(n-1).
    #[must_use]
    pub fn shift_down(&self, n: usize) -> Self {
        if n >= self.coeffs.len() {
            return Self::zero();
        }
        Self::new(self.coeffs[n..].to_vec())
    }

    /// Reduces modulo x^n, keeping the coefficients of x^0..x^(n-1).
    #[must_use]
    pub fn truncate(&self, n: usize) -> Self {
        Self::new(self.coeffs.iter().take(n).cloned().collect())
    }

    /// Raises the polynomial to a non-negative integer power.
    #[must_use]
    pub fn pow(&self, n: u32) -> Self {
        let mut result = Self::one();
        let mut base = self.clone();
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mul(&base);
            }
            base = base.mul(&base);
            exp >>= 1;
        }

        result
    }
}

/// Writes a sum of `coeff * x^exp` terms in the given order, with signs
/// folded into the separators (`a - b` rather than `a + -b`).
pub(crate) fn write_terms<'a>(
    f: &mut fmt::Formatter<'_>,
    terms: impl IntoIterator<Item = (i64, &'a Q)>,
) -> Result<bool, fmt::Error> {
    let mut first = true;
    for (exp, c) in terms {
        if c.is_zero() {
            continue;
        }

        let negative = c.is_negative();
        match (first, negative) {
            (true, true) => write!(f, "-")?,
            (true, false) => {}
            (false, true) => write!(f, " - ")?,
            (false, false) => write!(f, " + ")?,
        }
        first = false;

        let magnitude = c.abs();
        match exp {
            0 => write!(f, "{magnitude}")?,
            _ if magnitude.is_one() => write!(f, "{}", power_of_x(exp))?,
            _ => write!(f, "{magnitude}*{}", power_of_x(exp))?,
        }
    }
    Ok(!first)
}

/// Formats x^exp the way it appears inside a term.
pub(crate) fn power_of_x(exp: i64) -> String {
    match exp {
        0 => "1".to_string(),
        1 => "x".to_string(),
        _ => format!("x^{exp}"),
    }
}

/// Descending order, e.g. `-x^2 - x + 1`.
impl fmt::Display for DensePoly<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms = self.coeffs.iter().enumerate().rev().map(|(i, c)| (i as i64, c));
        if !write_terms(f, terms)? {
            write!(f, "0")?;
        }
        Ok(())
    }
}
