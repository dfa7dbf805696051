//! Lattice reduction sessions used by the lattice guessing strategy.

use cfinite_linalg::{lll_reduce, primitive_integer_vector, DenseMatrix, LllConfig};
use cfinite_rings::rationals::Q;
use num_traits::Zero;
use tracing::trace;

use crate::error::Result;

/// A session able to find short integer relations.
///
/// Implementations may hold expensive state (an external process, a
/// precomputed table); a [`super::Guesser`] creates one lazily and reuses it
/// across calls.
pub trait LatticeOracle {
    /// Returns a reduced basis of integer vectors `v` with `matrix * v = 0`,
    /// shortest first. An empty basis means no relation exists.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CFiniteError::Oracle`] if the session cannot answer.
    fn integer_kernel(&mut self, matrix: &DenseMatrix<Q>) -> Result<Vec<Vec<Q>>>;
}

/// In-process oracle: exact rational kernel, cleared of denominators and
/// LLL-reduced.
#[derive(Clone, Debug, Default)]
pub struct LllOracle {
    config: LllConfig,
}

impl LllOracle {
    /// Creates an oracle with the given reduction parameters.
    #[must_use]
    pub fn new(config: LllConfig) -> Self {
        Self { config }
    }
}

impl LatticeOracle for LllOracle {
    fn integer_kernel(&mut self, matrix: &DenseMatrix<Q>) -> Result<Vec<Vec<Q>>> {
        let kernel = matrix.kernel_echelon();
        if kernel.is_empty() {
            return Ok(kernel);
        }

        let integral: Vec<Vec<Q>> = kernel.iter().map(|v| primitive_integer_vector(v)).collect();
        let reduced = lll_reduce(&DenseMatrix::from_rows(integral), &self.config);
        trace!(
            dimension = kernel.len(),
            iterations = reduced.iterations,
            "integer kernel reduced"
        );

        Ok(reduced
            .basis
            .to_rows()
            .into_iter()
            .filter(|v| v.iter().any(|c| !c.is_zero()))
            .collect())
    }
}
