//! The `CFiniteSequence` value type.

use std::fmt;

use cfinite_poly::{DensePoly, RationalFunction};
use cfinite_rings::rationals::Q;
use num_traits::Zero;

/// A C-finite sequence, held as its generating function together with the
/// recurrence data derived from it.
///
/// Values are immutable; every constructor goes through canonicalization,
/// so two sequences are equal exactly when their generating functions are.
#[derive(Clone, Debug)]
pub struct CFiniteSequence {
    /// O.g.f. numerator.
    pub(crate) numerator: DensePoly<Q>,
    /// O.g.f. denominator. `x^k * D` with `D(0) = 1` when the offset is `-k`.
    pub(crate) denominator: DensePoly<Q>,
    /// Index of `initial_terms[0]`.
    pub(crate) offset: i64,
    /// `c` in `a(n+d) = c[0] a(n+d-1) + ... + c[d-1] a(n)`.
    pub(crate) coefficients: Vec<Q>,
    /// Terms starting at `offset`, at least `degree` of them.
    pub(crate) initial_terms: Vec<Q>,
    /// Expansion of the proper part, seeding the recurrence when the
    /// generating function has a polynomial part.
    pub(crate) remainder_terms: Vec<Q>,
    /// Polynomial part of the generating function with the offset removed.
    pub(crate) quotient: DensePoly<Q>,
}

impl CFiniteSequence {
    /// Returns the zero sequence.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            numerator: DensePoly::zero(),
            denominator: DensePoly::one(),
            offset: 0,
            coefficients: Vec::new(),
            initial_terms: vec![Q::zero()],
            remainder_terms: Vec::new(),
            quotient: DensePoly::zero(),
        }
    }

    /// Returns the o.g.f. numerator.
    #[must_use]
    pub fn numerator(&self) -> &DensePoly<Q> {
        &self.numerator
    }

    /// Returns the o.g.f. denominator.
    #[must_use]
    pub fn denominator(&self) -> &DensePoly<Q> {
        &self.denominator
    }

    /// Returns the ordinary generating function.
    #[must_use]
    pub fn ogf(&self) -> RationalFunction<Q> {
        RationalFunction::new(self.numerator.clone(), self.denominator.clone())
            .unwrap_or_else(RationalFunction::zero)
    }

    /// Returns the index of the first stored term. May be negative.
    #[must_use]
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Returns the order of the recurrence; 0 for finite sequences.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coefficients.len()
    }

    /// Returns the recurrence coefficients `c` with
    /// `a(n+d) = c[0] a(n+d-1) + c[1] a(n+d-2) + ... + c[d-1] a(n)`.
    #[must_use]
    pub fn coefficients(&self) -> &[Q] {
        &self.coefficients
    }

    /// Returns the stored terms `a(offset), a(offset+1), ...`.
    #[must_use]
    pub fn initial_terms(&self) -> &[Q] {
        &self.initial_terms
    }

    /// Returns true if only finitely many terms are non-zero.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Returns true for the zero sequence.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }
}

/// Equality of generating functions, not of any finite prefix of terms.
impl PartialEq for CFiniteSequence {
    fn eq(&self, other: &Self) -> bool {
        self.numerator == other.numerator && self.denominator == other.denominator
    }
}

impl Eq for CFiniteSequence {}

/// Formats `[a, b, c]`.
pub(crate) fn list_string(values: &[Q]) -> String {
    let items: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(", "))
}

/// Wraps a polynomial in parentheses when it has more than one term.
fn factor_string(p: &DensePoly<Q>) -> String {
    let terms = p.coeffs().iter().filter(|c| !c.is_zero()).count();
    if terms > 1 {
        format!("({p})")
    } else {
        p.to_string()
    }
}

impl fmt::Display for CFiniteSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_finite() {
            return write!(
                f,
                "C-finite sequence, generated by {}/{}",
                factor_string(&self.numerator),
                factor_string(&self.denominator)
            );
        }

        if self.is_zero() {
            write!(f, "Constant infinite sequence 0.")
        } else {
            write!(
                f,
                "Finite sequence {}, offset = {}",
                list_string(&self.initial_terms),
                self.offset
            )
        }
    }
}
