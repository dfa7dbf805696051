//! Guessing with Berlekamp-Massey.

use cfinite_linalg::berlekamp_massey;
use cfinite_poly::DensePoly;
use cfinite_rings::rationals::Q;
use tracing::debug;

use super::{require, Strategy};
use crate::error::Result;
use crate::sequence::CFiniteSequence;

/// The algorithm needs an even number of samples, so an odd last sample is
/// dropped and never checked.
pub(crate) fn guess(samples: &[Q]) -> Result<Option<CFiniteSequence>> {
    require(Strategy::BerlekampMassey, samples.len())?;

    let samples = if samples.len() % 2 == 1 {
        &samples[..samples.len() - 1]
    } else {
        samples
    };

    let result = berlekamp_massey(samples);
    debug!(samples = samples.len(), complexity = result.length, "Berlekamp-Massey");
    if result.length == 0 {
        return Ok(None);
    }

    let den = DensePoly::new(result.connection_poly);
    let num = DensePoly::new(samples.to_vec())
        .mul(&den)
        .truncate(samples.len() - 1);
    if num.is_zero() {
        return Ok(None);
    }

    CFiniteSequence::from_ogf(num, den).map(Some)
}
