//! Guessing from the kernel of a Hankel matrix.
//!
//! A sequence satisfies `v_0 a(i) + ... + v_{h-1} a(i+h-1) = 0` for every
//! `i` exactly when `v` lies in the kernel of the Hankel matrix
//! `A[i][j] = a(i+j)`. Reversing such a `v` gives a denominator.

use cfinite_linalg::DenseMatrix;
use cfinite_poly::{expand_ratio, DensePoly};
use cfinite_rings::rationals::Q;
use num_traits::Zero;
use tracing::debug;

use super::{require, Strategy};
use crate::error::Result;
use crate::sequence::CFiniteSequence;

pub(crate) fn guess(samples: &[Q]) -> Result<Option<CFiniteSequence>> {
    require(Strategy::Kernel, samples.len())?;

    let l = samples.len();
    let h = l.div_ceil(2);
    let hankel = DenseMatrix::from_rows((0..h).map(|i| samples[i..i + h].to_vec()).collect());

    let kernel = hankel.kernel_echelon();
    let Some(relation) = kernel.last() else {
        debug!(samples = l, "Hankel matrix has full rank");
        return Ok(None);
    };

    let den = denominator_from_relation(relation);
    if den.is_constant() {
        return Ok(None);
    }

    let num = DensePoly::new(samples.to_vec()).mul(&den).truncate(l / 2 + 1);
    if num.is_zero() {
        return Ok(None);
    }

    if expand_ratio(&num, &den, l).as_deref() != Some(samples) {
        debug!(samples = l, "kernel candidate does not reproduce the samples");
        return Ok(None);
    }

    CFiniteSequence::from_ogf(num, den).map(Some)
}

/// Reverses a kernel vector and strips zeros at both ends.
fn denominator_from_relation(relation: &[Q]) -> DensePoly<Q> {
    let reversed: Vec<Q> = relation
        .iter()
        .rev()
        .skip_while(|c| c.is_zero())
        .cloned()
        .collect();
    DensePoly::new(reversed)
}
