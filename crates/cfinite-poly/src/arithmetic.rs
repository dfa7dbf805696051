//! Field operations on rational functions.

use std::ops::{Add, Mul, Neg, Sub};

use cfinite_rings::traits::Field;

use crate::RationalFunction;

impl<K: Field> RationalFunction<K> {
    /// Adds two rational functions by reference.
    #[must_use]
    pub fn add_ref(&self, other: &Self) -> Self {
        // a/b + c/d = (ad + bc) / bd
        let num = self
            .numerator()
            .mul(other.denominator())
            .add(&other.numerator().mul(self.denominator()));
        let den = self.denominator().mul(other.denominator());

        Self::reduced(num, den)
    }

    /// Subtracts another rational function from this one.
    #[must_use]
    pub fn sub_ref(&self, other: &Self) -> Self {
        self.add_ref(&other.neg())
    }

    /// Multiplies two rational functions.
    #[must_use]
    pub fn mul_ref(&self, other: &Self) -> Self {
        let num = self.numerator().mul(other.numerator());
        let den = self.denominator().mul(other.denominator());

        Self::reduced(num, den)
    }

    /// Divides this rational function by another.
    ///
    /// Returns `None` if `other` is zero.
    #[must_use]
    pub fn checked_div(&self, other: &Self) -> Option<Self> {
        Some(self.mul_ref(&other.inv()?))
    }
}

impl<K: Field> Add for RationalFunction<K> {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        self.add_ref(&other)
    }
}

impl<K: Field> Add for &RationalFunction<K> {
    type Output = RationalFunction<K>;

    fn add(self, other: Self) -> Self::Output {
        self.add_ref(other)
    }
}

impl<K: Field> Sub for RationalFunction<K> {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        self.sub_ref(&other)
    }
}

impl<K: Field> Sub for &RationalFunction<K> {
    type Output = RationalFunction<K>;

    fn sub(self, other: Self) -> Self::Output {
        self.sub_ref(other)
    }
}

impl<K: Field> Mul for RationalFunction<K> {
    type Output = Self;

    fn mul(self, other: Self) -> Self::Output {
        self.mul_ref(&other)
    }
}

impl<K: Field> Mul for &RationalFunction<K> {
    type Output = RationalFunction<K>;

    fn mul(self, other: Self) -> Self::Output {
        self.mul_ref(other)
    }
}

impl<K: Field> Neg for RationalFunction<K> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        RationalFunction::neg(&self)
    }
}
