//! Term extraction.
//!
//! Terms inside the stored window are read directly. Beyond it, the
//! recurrence is advanced in one jump with a power of the companion
//! matrix, so `term(k)` costs `O(d^3 log k)` rational operations.

use std::str::FromStr;

use cfinite_linalg::DenseMatrix;
use cfinite_rings::rationals::Q;
use num_traits::Zero;
use rayon::prelude::*;
use tracing::trace;

use crate::error::{CFiniteError, Result};
use crate::parse::parse_seq_key;
use crate::sequence::CFiniteSequence;

/// Configuration for evaluating runs of terms.
#[derive(Clone, Debug)]
pub struct EvalConfig {
    /// Slices with at least this many indices are evaluated in parallel.
    pub parallel_threshold: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 64,
        }
    }
}

/// An index into a sequence: one position or a `start:stop:step` range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeqKey {
    /// A single index.
    Index(i64),
    /// The indices `start, start + step, ...` strictly before `stop`.
    Slice {
        /// First index.
        start: i64,
        /// Exclusive bound.
        stop: i64,
        /// Non-zero stride; negative strides walk downwards.
        step: i64,
    },
}

/// The value found at a [`SeqKey`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookup {
    /// Value of a single index.
    Term(Q),
    /// Values of a slice, in slice order.
    Terms(Vec<Q>),
}

impl FromStr for SeqKey {
    type Err = CFiniteError;

    /// Parses `"k"`, `"start:stop"` or `"start:stop:step"`. The start may be
    /// left out for positive steps and defaults to 0.
    fn from_str(s: &str) -> Result<Self> {
        parse_seq_key(s)
    }
}

impl CFiniteSequence {
    /// Returns the term at index `k`.
    ///
    /// Indices before the first stored term are 0.
    #[must_use]
    pub fn term(&self, k: i64) -> Q {
        let rel = k.saturating_sub(self.offset);
        let Ok(rel) = u64::try_from(rel) else {
            return Q::zero();
        };

        if let Some(t) = usize::try_from(rel)
            .ok()
            .and_then(|i| self.initial_terms.get(i))
        {
            return t.clone();
        }

        let d = self.degree();
        if d == 0 {
            return Q::zero();
        }

        let wp = usize::try_from(rel).map_or_else(|_| Q::zero(), |i| self.quotient.coeff(i));

        let seed = if self.quotient.is_zero() {
            &self.initial_terms
        } else {
            &self.remainder_terms
        };
        let state: Vec<Q> = seed[..d].iter().rev().cloned().collect();

        trace!(k, degree = d, "companion matrix jump");
        let advanced = self.companion_matrix().pow(rel).mv(&state);
        wp + advanced[d - 1].clone()
    }

    /// Builds the companion matrix: the recurrence coefficients on top of
    /// a shifted identity.
    fn companion_matrix(&self) -> DenseMatrix<Q> {
        let d = self.degree();
        let first = DenseMatrix::from_rows(vec![self.coefficients.clone()]);
        let shift = DenseMatrix::identity(d - 1);
        let zero = DenseMatrix::zeros(d - 1, 1);

        DenseMatrix::block(&[vec![&first], vec![&shift, &zero]])
            .unwrap_or_else(|| DenseMatrix::identity(d))
    }

    /// Returns the terms at `start, start + step, ...` strictly before `stop`.
    ///
    /// # Errors
    ///
    /// Returns [`CFiniteError::InvalidIndexType`] if `step` is 0.
    pub fn terms(&self, start: i64, stop: i64, step: i64) -> Result<Vec<Q>> {
        self.terms_with(start, stop, step, &EvalConfig::default())
    }

    /// Like [`CFiniteSequence::terms`], with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CFiniteError::InvalidIndexType`] if `step` is 0.
    pub fn terms_with(&self, start: i64, stop: i64, step: i64, config: &EvalConfig) -> Result<Vec<Q>> {
        let indices = slice_indices(start, stop, step)?;

        if indices.len() >= config.parallel_threshold {
            Ok(indices.par_iter().map(|&k| self.term(k)).collect())
        } else {
            Ok(indices.iter().map(|&k| self.term(k)).collect())
        }
    }

    /// Looks up a [`SeqKey`].
    ///
    /// # Errors
    ///
    /// Returns [`CFiniteError::InvalidIndexType`] for a slice with step 0.
    pub fn get(&self, key: &SeqKey) -> Result<Lookup> {
        match *key {
            SeqKey::Index(k) => Ok(Lookup::Term(self.term(k))),
            SeqKey::Slice { start, stop, step } => self.terms(start, stop, step).map(Lookup::Terms),
        }
    }
}

/// Expands a range the way half-open strided ranges do.
fn slice_indices(start: i64, stop: i64, step: i64) -> Result<Vec<i64>> {
    if step == 0 {
        return Err(CFiniteError::InvalidIndexType(format!(
            "{start}:{stop}:{step}"
        )));
    }

    let mut out = Vec::new();
    let mut k = start;
    while (step > 0 && k < stop) || (step < 0 && k > stop) {
        out.push(k);
        match k.checked_add(step) {
            Some(next) => k = next,
            None => break,
        }
    }
    Ok(out)
}
