//! Series expansion of rational functions.
//!
//! `expand_ratio` gives the first coefficients of P(x)/Q(x) as a power
//! series when Q(0) != 0. `LaurentSeries` handles the general case, where
//! a factor x^k in the denominator shifts the expansion to start at x^-k.

use std::fmt;

use cfinite_rings::rationals::Q;
use cfinite_rings::traits::Field;

use crate::dense::{power_of_x, write_terms, DensePoly};

/// Expands `num / den` as a power series and returns the first `n`
/// coefficients.
///
/// Returns `None` if `den(0) = 0`.
///
/// The coefficients satisfy `g_k = (num_k - Σ_{i=1}^{k} den_i g_{k-i}) / den_0`.
#[must_use]
pub fn expand_ratio<K: Field>(num: &DensePoly<K>, den: &DensePoly<K>, n: usize) -> Option<Vec<K>> {
    let d0_inv = den.constant_coeff().inv()?;
    let dc = den.coeffs();

    let mut out: Vec<K> = Vec::with_capacity(n);
    for k in 0..n {
        let mut acc = num.coeff(k);
        for i in 1..dc.len().min(k + 1) {
            acc = acc - dc[i].clone() * out[k - i].clone();
        }
        out.push(acc * d0_inv.clone());
    }

    Some(out)
}

/// A truncated Laurent series `Σ_{i=v}^{v+n-1} c_i x^i + O(x^{v+n})`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaurentSeries<K: Field> {
    valuation: i64,
    coeffs: Vec<K>,
}

impl<K: Field> LaurentSeries<K> {
    /// Expands `num / den` starting at its valuation, keeping `n` coefficients.
    ///
    /// Returns `None` if `den` is zero. The zero function expands to `n`
    /// zero coefficients starting at x^0.
    #[must_use]
    pub fn from_ratio(num: &DensePoly<K>, den: &DensePoly<K>, n: usize) -> Option<Self> {
        if den.is_zero() {
            return None;
        }
        if num.is_zero() {
            return Some(Self {
                valuation: 0,
                coeffs: vec![K::zero(); n],
            });
        }

        let vn = num.valuation();
        let vd = den.valuation();
        let coeffs = expand_ratio(&num.shift_down(vn), &den.shift_down(vd), n)?;

        Some(Self {
            valuation: to_i64(vn) - to_i64(vd),
            coeffs,
        })
    }

    /// Returns the exponent of the first stored coefficient.
    #[must_use]
    pub fn valuation(&self) -> i64 {
        self.valuation
    }

    /// Returns the exponent of the error term `O(x^p)`.
    #[must_use]
    pub fn precision(&self) -> i64 {
        self.valuation + to_i64(self.coeffs.len())
    }

    /// Returns the stored coefficients, starting at x^valuation.
    #[must_use]
    pub fn coeffs(&self) -> &[K] {
        &self.coeffs
    }

    /// Returns the coefficient of x^e, or `None` at or beyond the precision.
    #[must_use]
    pub fn coeff(&self, e: i64) -> Option<K> {
        if e >= self.precision() {
            return None;
        }
        match usize::try_from(e - self.valuation) {
            Ok(i) => Some(self.coeffs[i].clone()),
            Err(_) => Some(K::zero()),
        }
    }
}

/// Converts a power of x to a signed exponent, saturating at `i64::MAX`.
#[must_use]
pub fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Ascending order with the error term last, e.g. `x + 2*x^2 + O(x^3)`.
impl fmt::Display for LaurentSeries<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms = (self.valuation..).zip(self.coeffs.iter());
        if write_terms(f, terms)? {
            write!(f, " + ")?;
        }
        write!(f, "O({})", power_of_x(self.precision()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(coeffs: &[i64]) -> DensePoly<Q> {
        DensePoly::from_i64s(coeffs)
    }

    fn ints(values: &[i64]) -> Vec<Q> {
        values.iter().map(|&v| Q::from_integer(v)).collect()
    }

    #[test]
    fn test_expand_fibonacci() {
        let fib = expand_ratio(&poly(&[0, 1]), &poly(&[1, -1, -1]), 10).unwrap();
        assert_eq!(fib, ints(&[0, 1, 1, 2, 3, 5, 8, 13, 21, 34]));
    }

    #[test]
    fn test_expand_requires_unit_constant() {
        assert!(expand_ratio(&poly(&[1]), &poly(&[0, 1]), 3).is_none());
        assert!(expand_ratio(&poly(&[1]), &poly(&[2]), 0).unwrap().is_empty());
    }

    #[test]
    fn test_laurent_with_pole() {
        // (x^3 + 3) / x = 3/x + x^2
        let s = LaurentSeries::from_ratio(&poly(&[3, 0, 0, 1]), &poly(&[0, 1]), 4).unwrap();
        assert_eq!(s.valuation(), -1);
        assert_eq!(s.coeffs(), ints(&[3, 0, 0, 1]).as_slice());
        assert_eq!(s.coeff(-5), Some(Q::from_integer(0)));
        assert_eq!(s.coeff(2), Some(Q::from_integer(1)));
        assert_eq!(s.coeff(3), None);
    }

    #[test]
    fn test_display() {
        // x/(1-x)^2 = x + 2x^2 + 3x^3 + ...
        let s = LaurentSeries::from_ratio(&poly(&[0, 1]), &poly(&[1, -2, 1]), 4).unwrap();
        assert_eq!(s.to_string(), "x + 2*x^2 + 3*x^3 + 4*x^4 + O(x^5)");

        let alt = LaurentSeries::from_ratio(&poly(&[1]), &poly(&[1, 1]), 3).unwrap();
        assert_eq!(alt.to_string(), "1 - x + x^2 + O(x^3)");

        let zero = LaurentSeries::from_ratio(&DensePoly::<Q>::zero(), &poly(&[1]), 2).unwrap();
        assert_eq!(zero.to_string(), "O(x^2)");

        let empty = LaurentSeries::from_ratio(&poly(&[1]), &poly(&[1, -1]), 0).unwrap();
        assert_eq!(empty.to_string(), "O(1)");
    }
}
