//! Rational functions P(x)/Q(x) in reduced form.
//!
//! The representation is canonical: the denominator is monic, numerator
//! and denominator are coprime, and zero is stored as 0/1.

use std::fmt;

use cfinite_rings::rationals::Q;
use cfinite_rings::traits::Field;

use crate::algorithms::gcd::{make_monic, poly_div_rem, poly_gcd};
use crate::dense::DensePoly;

/// A rational function P(x)/Q(x) over a field K.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RationalFunction<K: Field> {
    numerator: DensePoly<K>,
    denominator: DensePoly<K>,
}

impl<K: Field> RationalFunction<K> {
    /// Creates a rational function and brings it to canonical form.
    ///
    /// Returns `None` if the denominator is zero.
    #[must_use]
    pub fn new(numerator: DensePoly<K>, denominator: DensePoly<K>) -> Option<Self> {
        if denominator.is_zero() {
            return None;
        }
        Some(Self::reduced(numerator, denominator))
    }

    /// Normalizes a pair whose denominator is known to be non-zero.
    pub(crate) fn reduced(numerator: DensePoly<K>, denominator: DensePoly<K>) -> Self {
        let mut rf = Self {
            numerator,
            denominator,
        };
        rf.normalize();
        rf
    }

    /// Creates a rational function from a polynomial (denominator = 1).
    #[must_use]
    pub fn from_poly(p: DensePoly<K>) -> Self {
        Self {
            numerator: p,
            denominator: DensePoly::one(),
        }
    }

    /// Creates the zero rational function.
    #[must_use]
    pub fn zero() -> Self {
        Self::from_poly(DensePoly::zero())
    }

    /// Creates the constant rational function 1.
    #[must_use]
    pub fn one() -> Self {
        Self::from_poly(DensePoly::one())
    }

    /// Creates a constant rational function c/1.
    #[must_use]
    pub fn constant(c: K) -> Self {
        Self::from_poly(DensePoly::constant(c))
    }

    /// Creates the rational function x.
    #[must_use]
    pub fn x() -> Self {
        Self::from_poly(DensePoly::x())
    }

    /// Returns the numerator polynomial.
    #[must_use]
    pub fn numerator(&self) -> &DensePoly<K> {
        &self.numerator
    }

    /// Returns the denominator polynomial.
    #[must_use]
    pub fn denominator(&self) -> &DensePoly<K> {
        &self.denominator
    }

    /// Returns true if this is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    /// Returns true if the denominator is 1.
    #[must_use]
    pub fn is_polynomial(&self) -> bool {
        self.denominator.is_constant()
    }

    /// Returns the polynomial if this is one.
    #[must_use]
    pub fn as_polynomial(&self) -> Option<&DensePoly<K>> {
        if self.is_polynomial() {
            Some(&self.numerator)
        } else {
            None
        }
    }

    fn normalize(&mut self) {
        if self.numerator.is_zero() {
            self.denominator = DensePoly::one();
            return;
        }

        let g = poly_gcd(&self.numerator, &self.denominator);
        if g.degree() > 0 {
            if let (Some((num, _)), Some((den, _))) = (
                poly_div_rem(&self.numerator, &g),
                poly_div_rem(&self.denominator, &g),
            ) {
                self.numerator = num;
                self.denominator = den;
            }
        }

        if let Some(lead_inv) = self.denominator.leading_coeff().inv() {
            self.numerator = self.numerator.scale(&lead_inv);
            self.denominator = make_monic(&self.denominator);
        }
    }

    /// Splits into polynomial part and proper fraction.
    ///
    /// Returns `(poly, proper)` with `deg(proper.numerator) < deg(proper.denominator)`.
    #[must_use]
    pub fn decompose_proper(&self) -> (DensePoly<K>, Self) {
        match poly_div_rem(&self.numerator, &self.denominator) {
            Some((q, r)) => (
                q,
                Self {
                    numerator: r,
                    denominator: self.denominator.clone(),
                },
            ),
            None => (DensePoly::zero(), self.clone()),
        }
    }

    /// Negates the rational function.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            numerator: self.numerator.neg(),
            denominator: self.denominator.clone(),
        }
    }

    /// Computes the multiplicative inverse, or `None` for zero.
    #[must_use]
    pub fn inv(&self) -> Option<Self> {
        Self::new(self.denominator.clone(), self.numerator.clone())
    }

    /// Raises to an integer power. Negative powers invert first.
    ///
    /// Returns `None` for a negative power of zero.
    #[must_use]
    pub fn pow(&self, n: i64) -> Option<Self> {
        let base = if n < 0 { self.inv()? } else { self.clone() };
        let exp = u32::try_from(n.unsigned_abs()).ok()?;

        Some(Self {
            numerator: base.numerator.pow(exp),
            denominator: base.denominator.pow(exp),
        })
    }
}

/// `N` for polynomials, `(N)/(D)` otherwise.
impl fmt::Display for RationalFunction<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_polynomial() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "({})/({})", self.numerator, self.denominator)
        }
    }
}
