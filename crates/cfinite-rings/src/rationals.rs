//! The field of rational numbers Q.
//!
//! Rationals are always stored in lowest terms with a positive
//! denominator, so structural equality is numeric equality.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};
use std::str::FromStr;

use dashu::base::{Abs, Inverse, Signed, UnsignedAbs};
use dashu::integer::IBig;
use dashu::rational::RBig;
use num_traits::{One, Zero};
use thiserror::Error;

use crate::traits::{Field, Ring};

/// Error returned when a string cannot be read as a rational number.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseRationalError {
    /// The numerator or denominator is not an integer literal.
    #[error("malformed rational literal: {0:?}")]
    Malformed(String),

    /// The literal has the form `a/0`.
    #[error("zero denominator in rational literal: {0:?}")]
    ZeroDenominator(String),
}

/// An arbitrary precision rational number.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Q(RBig);

impl Q {
    /// Creates a new rational from numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn new(num: i64, den: i64) -> Self {
        assert!(den != 0, "denominator cannot be zero");
        Self::from_ibigs(IBig::from(num), IBig::from(den))
    }

    /// Creates a rational from a machine integer.
    #[must_use]
    pub fn from_integer(n: i64) -> Self {
        Self(RBig::from(IBig::from(n)))
    }

    /// Creates a rational from an arbitrary precision integer.
    #[must_use]
    pub fn from_ibig(n: IBig) -> Self {
        Self(RBig::from(n))
    }

    /// Creates `num/den` from arbitrary precision parts; `den` must be non-zero.
    fn from_ibigs(num: IBig, den: IBig) -> Self {
        let negative = den.is_negative();
        let num = if negative { -num } else { num };
        Self(RBig::from_parts(num, den.unsigned_abs()))
    }

    /// Returns the numerator.
    #[must_use]
    pub fn numerator(&self) -> IBig {
        self.0.numerator().clone()
    }

    /// Returns the (positive) denominator.
    #[must_use]
    pub fn denominator(&self) -> IBig {
        IBig::from(self.0.denominator().clone())
    }

    /// Returns true if the denominator is 1.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.0.denominator().is_one()
    }

    /// Converts to an `i64` if this is an integer that fits.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        if self.is_integer() {
            i64::try_from(self.0.numerator().clone()).ok()
        } else {
            None
        }
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.0.is_zero() {
            0
        } else if Signed::is_positive(&self.0) {
            1
        } else {
            -1
        }
    }

    /// Returns true if strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        Signed::is_negative(&self.0)
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Largest integer not exceeding `self`.
    #[must_use]
    pub fn floor(&self) -> IBig {
        let num = self.numerator();
        let den = self.denominator();
        let quot = &num / &den;
        if num.is_negative() && &quot * &den != num {
            quot - IBig::ONE
        } else {
            quot
        }
    }

    /// Nearest integer, ties to even.
    #[must_use]
    pub fn round(&self) -> Self {
        let floor = self.floor();
        let twice_frac = (self.clone() - Self::from_ibig(floor.clone())) * Self::from_integer(2);
        let rounded = match twice_frac.cmp(&Self::one()) {
            std::cmp::Ordering::Less => floor,
            std::cmp::Ordering::Greater => floor + IBig::ONE,
            std::cmp::Ordering::Equal => {
                if (&floor % IBig::from(2)).is_zero() {
                    floor
                } else {
                    floor + IBig::ONE
                }
            }
        };
        Self::from_ibig(rounded)
    }
}

impl Zero for Q {
    fn zero() -> Self {
        Self(RBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Q {
    fn one() -> Self {
        Self(RBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == RBig::ONE
    }
}

impl Ring for Q {
    fn from_i64(n: i64) -> Self {
        Self::from_integer(n)
    }
}

impl Field for Q {
    fn inv(&self) -> Option<Self> {
        if self.0.is_zero() {
            None
        } else {
            Some(Self(self.0.clone().inv()))
        }
    }
}

impl fmt::Debug for Q {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q({self})")
    }
}

impl fmt::Display for Q {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.0.numerator())
        } else {
            write!(f, "{}/{}", self.0.numerator(), self.0.denominator())
        }
    }
}

impl FromStr for Q {
    type Err = ParseRationalError;

    /// Parses `"n"` or `"n/d"` with optional sign and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_int = |part: &str| {
            IBig::from_str_radix(part.trim(), 10)
                .map_err(|_| ParseRationalError::Malformed(s.to_string()))
        };

        match s.split_once('/') {
            None => parse_int(s).map(Self::from_ibig),
            Some((num, den)) => {
                let num = parse_int(num)?;
                let den = parse_int(den)?;
                if den.is_zero() {
                    return Err(ParseRationalError::ZeroDenominator(s.to_string()));
                }
                Ok(Self::from_ibigs(num, den))
            }
        }
    }
}

impl Add for Q {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Add for &Q {
    type Output = Q;

    fn add(self, rhs: Self) -> Self::Output {
        Q(&self.0 + &rhs.0)
    }
}

impl AddAssign<&Q> for Q {
    fn add_assign(&mut self, rhs: &Q) {
        self.0 = &self.0 + &rhs.0;
    }
}

impl Sub for Q {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sub for &Q {
    type Output = Q;

    fn sub(self, rhs: Self) -> Self::Output {
        Q(&self.0 - &rhs.0)
    }
}

impl Mul for Q {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Mul for &Q {
    type Output = Q;

    fn mul(self, rhs: Self) -> Self::Output {
        Q(&self.0 * &rhs.0)
    }
}

/// Exact division. The divisor must be non-zero; use [`Field::checked_div`]
/// when that is not known.
impl Div for Q {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Self(self.0 / rhs.0)
    }
}

impl Div for &Q {
    type Output = Q;

    fn div(self, rhs: Self) -> Self::Output {
        Q(&self.0 / &rhs.0)
    }
}

impl Neg for Q {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Q {
    type Output = Q;

    fn neg(self) -> Self::Output {
        Q(-&self.0)
    }
}

impl Sum for Q {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + x)
    }
}

impl From<i64> for Q {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl From<i32> for Q {
    fn from(value: i32) -> Self {
        Self::from_integer(i64::from(value))
    }
}

impl From<IBig> for Q {
    fn from(value: IBig) -> Self {
        Self::from_ibig(value)
    }
}
