//! Recurrence view of a sequence: construction from a recurrence, its
//! textual form and the Laurent expansion of the generating function.

use cfinite_poly::algorithms::gcd::poly_div_rem;
use cfinite_poly::series::to_i64;
use cfinite_poly::{DensePoly, LaurentSeries};
use cfinite_rings::rationals::Q;
use num_traits::{One, Zero};

use crate::error::{CFiniteError, Result};
use crate::parse::parse_rational_list;
use crate::sequence::{list_string, CFiniteSequence};

impl CFiniteSequence {
    /// Builds the sequence with `a(n+d) = c[0] a(n) + c[1] a(n+1) + ... +
    /// c[d-1] a(n+d-1)` and `a(i) = values[i]`.
    ///
    /// Note the order: `coefficients[0]` multiplies the oldest term, the
    /// reverse of [`CFiniteSequence::coefficients`].
    ///
    /// # Errors
    ///
    /// Propagates canonicalization errors; none occur for well-formed input.
    pub fn from_recurrence(coefficients: &[Q], values: &[Q]) -> Result<Self> {
        // D(x) = 1 - c[d-1] x - c[d-2] x^2 - ... - c[0] x^d
        let mut den = vec![Q::one()];
        den.extend(coefficients.iter().rev().map(|c| -c.clone()));
        let den = DensePoly::new(den);

        let num = DensePoly::new(values.to_vec()).mul(&den).truncate(values.len());
        Self::from_ogf(num, den)
    }

    /// Like [`CFiniteSequence::from_recurrence`], reading both lists from
    /// text such as `"[1, 1]"` and `"[0, 1]"`.
    ///
    /// # Errors
    ///
    /// Returns [`CFiniteError::InvalidArgumentType`] if either
    /// argument is not a bracketed list of rationals.
    pub fn from_recurrence_str(coefficients: &str, values: &str) -> Result<Self> {
        let coefficients = parse_rational_list(coefficients).map_err(|_| {
            CFiniteError::InvalidArgumentType("recurrence coefficient list".to_string())
        })?;
        let values = parse_rational_list(values).map_err(|_| {
            CFiniteError::InvalidArgumentType("recurrence start value list".to_string())
        })?;
        Self::from_recurrence(&coefficients, &values)
    }

    /// Describes the recurrence in words, e.g.
    /// `a(n+2) = a(n+1) + a(n), starting a(0...) = [2, 1]`.
    #[must_use]
    pub fn recurrence_repr(&self) -> String {
        let d = self.degree();
        if d == 0 {
            return format!(
                "Finite sequence {}, offset {}",
                list_string(&self.initial_terms),
                self.offset
            );
        }

        let first = &self.coefficients[0];
        let mut equation = if first.is_one() {
            format!("a(n+{d}) = {}", term_at(d - 1))
        } else if (-first.clone()).is_one() {
            format!("a(n+{d}) = -{}", term_at(d - 1))
        } else {
            format!("a(n+{d}) = {first}*{}", term_at(d - 1))
        };

        for (i, c) in self.coefficients.iter().enumerate().skip(1) {
            let a = term_at(d - i - 1);
            if c.is_zero() {
                continue;
            }
            let sign = if c.is_negative() { '-' } else { '+' };
            let magnitude = c.abs();
            if magnitude.is_one() {
                equation.push_str(&format!(" {sign} {a}"));
            } else {
                equation.push_str(&format!(" {sign} {magnitude}*{a}"));
            }
        }

        let start: Vec<Q> = (0..self.starting_count())
            .map(|i| self.term(self.offset + to_i64(i)))
            .collect();

        format!(
            "Homogenous linear recurrence with constant coefficients of degree {d}: {equation}, starting a({}...) = {}",
            self.offset,
            list_string(&start)
        )
    }

    /// Number of starting values that pin the sequence down: the recurrence
    /// order plus the reach of the polynomial part of the o.g.f.
    fn starting_count(&self) -> usize {
        let polynomial_part = poly_div_rem(&self.numerator, &self.denominator)
            .map_or(0, |(q, _)| if q.is_zero() { 0 } else { q.degree() + 1 });
        polynomial_part + self.degree()
    }

    /// Expands the o.g.f. as a Laurent series with `n` coefficients,
    /// starting at its valuation.
    #[must_use]
    pub fn series(&self, n: usize) -> LaurentSeries<Q> {
        LaurentSeries::from_ratio(&self.numerator, &self.denominator, n)
            .expect("canonical denominator is non-zero")
    }
}

fn term_at(j: usize) -> String {
    if j == 0 {
        "a(n)".to_string()
    } else {
        format!("a(n+{j})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Vec<Q> {
        values.iter().map(|&v| Q::from_integer(v)).collect()
    }

    fn rec(coefficients: &[i64], values: &[i64]) -> CFiniteSequence {
        CFiniteSequence::from_recurrence(&ints(coefficients), &ints(values)).unwrap()
    }

    fn seq(num: &[i64], den: &[i64]) -> CFiniteSequence {
        CFiniteSequence::from_ogf(DensePoly::from_i64s(num), DensePoly::from_i64s(den)).unwrap()
    }

    #[test]
    fn test_fibonacci_from_recurrence() {
        let fib = rec(&[1, 1], &[0, 1]);
        assert_eq!(fib.to_string(), "C-finite sequence, generated by x/(-x^2 - x + 1)");
        assert_eq!(fib, seq(&[0, 1], &[1, -1, -1]));
    }

    #[test]
    fn test_coefficient_order() {
        // a(n+2) = 2 a(n+1) - a(n): the natural numbers
        let r = rec(&[-1, 2], &[0, 1]);
        assert_eq!(r.to_string(), "C-finite sequence, generated by x/(x^2 - 2*x + 1)");
        assert_eq!(r.coefficients(), ints(&[2, -1]).as_slice());
        assert_eq!(r.terms(0, 6, 1).unwrap(), ints(&[0, 1, 2, 3, 4, 5]));
    }

    #[test]
    fn test_large_term() {
        let r = rec(&[3, 3], &[2, 1]);
        assert_eq!(r.term(2), Q::from_integer(9));
        assert_eq!(
            r.term(101),
            "16158686318788579168659644539538474790082623100896663971001"
                .parse::<Q>()
                .unwrap()
        );
    }

    #[test]
    fn test_lucas_coefficients() {
        let lucas = rec(&[1, 1], &[2, 1]);
        assert_eq!(lucas.coefficients(), ints(&[1, 1]).as_slice());
        assert_eq!(lucas, seq(&[2, -1], &[1, -1, -1]));
    }

    #[test]
    fn test_surplus_values_only_fix_a_prefix() {
        // alternating signs; the extra start value is consistent
        assert_eq!(rec(&[-1], &[1, -1]), rec(&[-1], &[1]));
        assert_eq!(rec(&[-1], &[1]), seq(&[1], &[1, 1]));
    }

    #[test]
    fn test_from_recurrence_str() {
        let fib = CFiniteSequence::from_recurrence_str("[1, 1]", "[0, 1]").unwrap();
        assert_eq!(fib, rec(&[1, 1], &[0, 1]));

        assert!(matches!(
            CFiniteSequence::from_recurrence_str("1, 1", "[0, 1]"),
            Err(CFiniteError::InvalidArgumentType(_))
        ));
        assert!(matches!(
            CFiniteSequence::from_recurrence_str("[1, 1]", "0"),
            Err(CFiniteError::InvalidArgumentType(_))
        ));
    }

    #[test]
    fn test_recurrence_repr() {
        assert_eq!(
            seq(&[2, -1], &[1, -1, -1]).recurrence_repr(),
            "Homogenous linear recurrence with constant coefficients of degree 2: \
             a(n+2) = a(n+1) + a(n), starting a(0...) = [2, 1]"
        );
        // x/(1-x)^3
        assert_eq!(
            seq(&[0, 1], &[1, -3, 3, -1]).recurrence_repr(),
            "Homogenous linear recurrence with constant coefficients of degree 3: \
             a(n+3) = 3*a(n+2) - 3*a(n+1) + a(n), starting a(1...) = [1, 3, 6]"
        );
        assert_eq!(seq(&[1], &[1]).recurrence_repr(), "Finite sequence [1], offset 0");
    }

    #[test]
    fn test_recurrence_repr_with_polynomial_part() {
        // (-2x^3 + x^2 - x + 1)/(2x^2 - 3x + 1)
        assert_eq!(
            seq(&[1, -1, 1, -2], &[1, -3, 2]).recurrence_repr(),
            "Homogenous linear recurrence with constant coefficients of degree 2: \
             a(n+2) = 3*a(n+1) - 2*a(n), starting a(0...) = [1, 2, 5, 9]"
        );
        // x^3/(1 - x - x^2)
        assert_eq!(
            seq(&[0, 0, 0, 1], &[1, -1, -1]).recurrence_repr(),
            "Homogenous linear recurrence with constant coefficients of degree 2: \
             a(n+2) = a(n+1) + a(n), starting a(3...) = [1, 1, 2, 3]"
        );
    }

    #[test]
    fn test_recurrence_repr_signs() {
        // 1/(1 + x): a(n+1) = -a(n)
        assert_eq!(
            seq(&[1], &[1, 1]).recurrence_repr(),
            "Homogenous linear recurrence with constant coefficients of degree 1: \
             a(n+1) = -a(n), starting a(0...) = [1]"
        );
        // 1/(1 - x^2): zero middle coefficient
        assert_eq!(
            seq(&[1], &[1, 0, -1]).recurrence_repr(),
            "Homogenous linear recurrence with constant coefficients of degree 2: \
             a(n+2) = 0*a(n+1) + a(n), starting a(0...) = [1, 0]"
        );
    }

    #[test]
    fn test_series() {
        let r = rec(&[-1, 2], &[0, 1]);
        assert_eq!(r.series(4).to_string(), "x + 2*x^2 + 3*x^3 + 4*x^4 + O(x^5)");

        // (2 - x)/x/(1 - x - x^2) starts at x^-1
        let s = seq(&[2, -1], &[0, 1, -1, -1]);
        let series = s.series(3);
        assert_eq!(series.valuation(), -1);
        assert_eq!(series.coeffs(), ints(&[2, 1, 3]).as_slice());
    }
}
