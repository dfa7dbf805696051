//! Arithmetic on sequences through their generating functions.
//!
//! Sums and differences are termwise. The product of o.g.f.s is the
//! Cauchy product (convolution) of the sequences, and the quotient its
//! inverse. Every result is canonicalized again.

use std::ops::{Add, Div, Mul, Neg, Sub};

use cfinite_poly::{DensePoly, RationalFunction};
use cfinite_rings::rationals::Q;

use crate::error::{CFiniteError, Result};
use crate::sequence::CFiniteSequence;

impl CFiniteSequence {
    fn combine(
        &self,
        other: &Self,
        op: impl FnOnce(&RationalFunction<Q>, &RationalFunction<Q>) -> Option<RationalFunction<Q>>,
    ) -> Result<Self> {
        let f = op(&self.ogf(), &other.ogf()).ok_or(CFiniteError::DivisionByZero)?;
        Self::from_rational_function(&f)
    }

    /// Termwise sum.
    ///
    /// # Errors
    ///
    /// Never fails for canonical operands.
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        self.combine(other, |a, b| Some(a.add_ref(b)))
    }

    /// Termwise difference.
    ///
    /// # Errors
    ///
    /// Never fails for canonical operands.
    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        self.combine(other, |a, b| Some(a.sub_ref(b)))
    }

    /// Convolution: the o.g.f. of the result is the product.
    ///
    /// # Errors
    ///
    /// Never fails for canonical operands.
    pub fn checked_mul(&self, other: &Self) -> Result<Self> {
        self.combine(other, |a, b| Some(a.mul_ref(b)))
    }

    /// Quotient of generating functions.
    ///
    /// # Errors
    ///
    /// Returns [`CFiniteError::DivisionByZero`] if `other` is the zero
    /// sequence.
    pub fn checked_div(&self, other: &Self) -> Result<Self> {
        self.combine(other, RationalFunction::checked_div)
    }
}

fn infallible(r: Result<CFiniteSequence>) -> CFiniteSequence {
    r.expect("non-zero denominators always canonicalize")
}

macro_rules! impl_total_op {
    ($trait:ident, $method:ident, $checked:ident) => {
        impl $trait for CFiniteSequence {
            type Output = CFiniteSequence;

            fn $method(self, rhs: Self) -> Self::Output {
                infallible(self.$checked(&rhs))
            }
        }

        impl $trait for &CFiniteSequence {
            type Output = CFiniteSequence;

            fn $method(self, rhs: Self) -> Self::Output {
                infallible(self.$checked(rhs))
            }
        }

        impl $trait<Q> for CFiniteSequence {
            type Output = CFiniteSequence;

            fn $method(self, rhs: Q) -> Self::Output {
                infallible(self.$checked(&CFiniteSequence::from(rhs)))
            }
        }

        impl $trait<DensePoly<Q>> for CFiniteSequence {
            type Output = CFiniteSequence;

            fn $method(self, rhs: DensePoly<Q>) -> Self::Output {
                infallible(self.$checked(&CFiniteSequence::from(rhs)))
            }
        }
    };
}

impl_total_op!(Add, add, checked_add);
impl_total_op!(Sub, sub, checked_sub);
impl_total_op!(Mul, mul, checked_mul);

impl Div for CFiniteSequence {
    type Output = Result<CFiniteSequence>;

    fn div(self, rhs: Self) -> Self::Output {
        self.checked_div(&rhs)
    }
}

impl Div for &CFiniteSequence {
    type Output = Result<CFiniteSequence>;

    fn div(self, rhs: Self) -> Self::Output {
        self.checked_div(rhs)
    }
}

impl Div<Q> for CFiniteSequence {
    type Output = Result<CFiniteSequence>;

    fn div(self, rhs: Q) -> Self::Output {
        self.checked_div(&CFiniteSequence::from(rhs))
    }
}

impl Neg for CFiniteSequence {
    type Output = CFiniteSequence;

    fn neg(self) -> Self::Output {
        infallible(Self::from_rational_function(&self.ogf().neg()))
    }
}

impl From<Q> for CFiniteSequence {
    fn from(c: Q) -> Self {
        Self::from_polynomial(DensePoly::constant(c))
    }
}

impl From<DensePoly<Q>> for CFiniteSequence {
    fn from(p: DensePoly<Q>) -> Self {
        Self::from_polynomial(p)
    }
}

impl From<RationalFunction<Q>> for CFiniteSequence {
    fn from(f: RationalFunction<Q>) -> Self {
        infallible(Self::from_rational_function(&f))
    }
}
