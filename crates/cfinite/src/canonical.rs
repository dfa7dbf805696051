//! Canonical form of a generating function.
//!
//! Any power of x dividing the numerator or the denominator is read as a
//! shift of the sequence, moving the offset right or left. What remains,
//! `N'/D'`, is reduced and scaled so that `D'(0) = 1`; then
//! `D' = 1 - c[0] x - c[1] x^2 - ... - c[d-1] x^d` gives the recurrence.

use cfinite_poly::algorithms::gcd::{poly_div_rem, poly_gcd};
use cfinite_poly::series::to_i64;
use cfinite_poly::{expand_ratio, DensePoly, RationalFunction};
use cfinite_rings::rationals::Q;
use cfinite_rings::traits::Field;
use num_traits::Zero;
use tracing::debug;

use crate::error::{CFiniteError, Result};
use crate::sequence::CFiniteSequence;

impl CFiniteSequence {
    /// Builds the sequence whose o.g.f. is `numerator / denominator`.
    ///
    /// # Errors
    ///
    /// Returns [`CFiniteError::DivisionByZero`] if the denominator is zero.
    pub fn from_ogf(numerator: DensePoly<Q>, denominator: DensePoly<Q>) -> Result<Self> {
        if denominator.is_zero() {
            return Err(CFiniteError::DivisionByZero);
        }
        if numerator.is_zero() {
            return Ok(Self::zero());
        }

        let (num, den) = reduce(numerator, denominator);

        let seq = if den.is_constant() {
            polynomial_case(&num, &den)?
        } else {
            rational_case(num, den)?
        };

        debug!(
            offset = seq.offset,
            degree = seq.degree(),
            "canonicalized o.g.f. {}/{}",
            seq.numerator,
            seq.denominator
        );
        Ok(seq)
    }

    /// Builds the sequence of a polynomial: a finite sequence.
    #[must_use]
    pub fn from_polynomial(p: DensePoly<Q>) -> Self {
        if p.is_zero() {
            return Self::zero();
        }
        let offset = p.valuation();
        Self {
            initial_terms: p.shift_down(offset).coeffs().to_vec(),
            numerator: p,
            denominator: DensePoly::one(),
            offset: to_i64(offset),
            coefficients: Vec::new(),
            remainder_terms: Vec::new(),
            quotient: DensePoly::zero(),
        }
    }

    /// Builds the sequence of a rational function.
    ///
    /// # Errors
    ///
    /// Never fails for a well-formed rational function; the `Result`
    /// mirrors [`CFiniteSequence::from_ogf`].
    pub fn from_rational_function(f: &RationalFunction<Q>) -> Result<Self> {
        Self::from_ogf(f.numerator().clone(), f.denominator().clone())
    }
}

/// Divides out the gcd of numerator and denominator.
fn reduce(num: DensePoly<Q>, den: DensePoly<Q>) -> (DensePoly<Q>, DensePoly<Q>) {
    let g = poly_gcd(&num, &den);
    if g.degree() == 0 {
        return (num, den);
    }
    match (poly_div_rem(&num, &g), poly_div_rem(&den, &g)) {
        (Some((n, _)), Some((d, _))) => (n, d),
        _ => (num, den),
    }
}

fn polynomial_case(num: &DensePoly<Q>, den: &DensePoly<Q>) -> Result<CFiniteSequence> {
    let inv = den
        .constant_coeff()
        .inv()
        .ok_or(CFiniteError::DivisionByZero)?;
    Ok(CFiniteSequence::from_polynomial(num.scale(&inv)))
}

fn rational_case(num: DensePoly<Q>, den: DensePoly<Q>) -> Result<CFiniteSequence> {
    // After reduction at most one of N(0), D(0) is zero.
    let (num, den, offset) = if num.constant_coeff().is_zero() {
        let v = num.valuation();
        (num.shift_down(v), den, to_i64(v))
    } else if den.constant_coeff().is_zero() {
        let v = den.valuation();
        (num, den.shift_down(v), -to_i64(v))
    } else {
        (num, den, 0)
    };

    let inv = den
        .constant_coeff()
        .inv()
        .ok_or(CFiniteError::DivisionByZero)?;
    let num = num.scale(&inv);
    let den = den.scale(&inv);

    let degree = den.degree();
    let coefficients: Vec<Q> = (1..=degree).map(|i| -den.coeff(i)).collect();

    let (stored_num, stored_den) = if offset >= 0 {
        (num.shift(offset.unsigned_abs() as usize), den.clone())
    } else {
        (num.clone(), den.shift(offset.unsigned_abs() as usize))
    };

    let (quotient, remainder) = poly_div_rem(&num, &den).ok_or(CFiniteError::DivisionByZero)?;

    let alen = degree.max(stored_num.degree() + 1);
    let initial_terms = expand_ratio(&num, &den, alen).ok_or(CFiniteError::DivisionByZero)?;
    let remainder_terms = if quotient.is_zero() {
        Vec::new()
    } else {
        expand_ratio(&remainder, &den, degree).ok_or(CFiniteError::DivisionByZero)?
    };

    Ok(CFiniteSequence {
        numerator: stored_num,
        denominator: stored_den,
        offset,
        coefficients,
        initial_terms,
        remainder_terms,
        quotient,
    })
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

    fn seq(num: &[i64], den: &[i64]) -> CFiniteSequence {
        CFiniteSequence::from_ogf(poly(num), poly(den)).unwrap()
    }

    #[test]
    fn test_fibonacci() {
        let fib = seq(&[0, 1], &[1, -1, -1]);
        assert_eq!(fib.offset(), 1);
        assert_eq!(fib.degree(), 2);
        assert_eq!(fib.coefficients(), ints(&[1, 1]).as_slice());
        assert_eq!(fib.initial_terms(), ints(&[1, 1]).as_slice());
        assert_eq!(fib.to_string(), "C-finite sequence, generated by x/(-x^2 - x + 1)");
    }

    #[test]
    fn test_polynomial_case() {
        // x^2 - 4x^5
        let p = seq(&[0, 0, 1, 0, 0, -4], &[1]);
        assert!(p.is_finite());
        assert_eq!(p.offset(), 2);
        assert_eq!(p.to_string(), "Finite sequence [1, 0, 0, -4], offset = 2");

        let one = seq(&[1], &[1]);
        assert_eq!(one.to_string(), "Finite sequence [1], offset = 0");
    }

    #[test]
    fn test_pole_gives_negative_offset() {
        // x^2 + 3/x = (x^3 + 3)/x
        let s = seq(&[3, 0, 0, 1], &[0, 1]);
        assert!(s.is_finite());
        assert_eq!(s.offset(), -1);
        assert_eq!(s.initial_terms(), ints(&[3, 0, 0, 1]).as_slice());
        assert_eq!(s.to_string(), "Finite sequence [3, 0, 0, 1], offset = -1");

        // (x^2 + 4)/x^3
        let s = seq(&[4, 0, 1], &[0, 0, 0, 1]);
        assert_eq!(s.to_string(), "Finite sequence [4, 0, 1], offset = -3");
    }

    #[test]
    fn test_common_factor_is_removed() {
        // (x^2 - 1)/(x^3 - 1) = (x + 1)/(x^2 + x + 1)
        let s = seq(&[-1, 0, 1], &[-1, 0, 0, 1]);
        assert_eq!(s, seq(&[1, 1], &[1, 1, 1]));
        assert_eq!(s.degree(), 2);

        // x/(x - x^2) = 1/(1 - x)
        let s = seq(&[0, 1], &[0, 1, -1]);
        assert_eq!(s.to_string(), "C-finite sequence, generated by 1/(-x + 1)");
    }

    #[test]
    fn test_constant_term_normalized() {
        let s = seq(&[1], &[-2, 1]);
        assert_eq!(s.to_string(), "C-finite sequence, generated by -1/2/(-1/2*x + 1)");
        assert_eq!(s.denominator().constant_coeff(), &Q::from_integer(1));
    }

    #[test]
    fn test_zero() {
        let z = seq(&[0], &[1, -1]);
        assert!(z.is_zero());
        assert_eq!(z, CFiniteSequence::zero());
        assert_eq!(z.to_string(), "Constant infinite sequence 0.");
    }

    #[test]
    fn test_zero_denominator() {
        assert_eq!(
            CFiniteSequence::from_ogf(poly(&[1]), DensePoly::zero()),
            Err(CFiniteError::DivisionByZero)
        );
    }

    #[test]
    fn test_idempotent() {
        let s = seq(&[2, -1], &[1, -1, -1]);
        let again = CFiniteSequence::from_ogf(s.numerator().clone(), s.denominator().clone()).unwrap();
        assert_eq!(again.numerator(), s.numerator());
        assert_eq!(again.denominator(), s.denominator());
        assert_eq!(again.offset(), s.offset());
        assert_eq!(again.initial_terms(), s.initial_terms());
    }

    #[test]
    fn test_polynomial_part() {
        // (-2x^3 + x^2 + 1)/(1 - 2x): 1, 2, 5, 8, 16, ...
        let s = seq(&[1, 0, 1, -2], &[1, -2]);
        assert_eq!(s.degree(), 1);
        assert_eq!(s.initial_terms(), ints(&[1, 2, 5, 8]).as_slice());
        assert!(!s.remainder_terms.is_empty());
    }
}
