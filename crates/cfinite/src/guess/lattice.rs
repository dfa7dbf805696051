//! Guessing from a short integer relation found by lattice reduction.
//!
//! With `B = floor(l/2)` the matrix `M[x][y] = a(x - y + B)` collects the
//! sliding windows of the samples. A short integer vector `q` with
//! `M q = 0` is a candidate denominator `p(x) = q_0 + q_1 x + ...`.

use cfinite_linalg::DenseMatrix;
use cfinite_poly::series::to_i64;
use cfinite_poly::{DensePoly, LaurentSeries};
use cfinite_rings::rationals::Q;
use tracing::debug;

use super::oracle::LatticeOracle;
use super::{require, Strategy};
use crate::error::Result;
use crate::sequence::CFiniteSequence;

pub(crate) fn guess(samples: &[Q], oracle: &mut dyn LatticeOracle) -> Result<Option<CFiniteSequence>> {
    require(Strategy::Lattice, samples.len())?;

    let l = samples.len();
    let b = l / 2;
    let windows = DenseMatrix::from_rows(
        (0..b)
            .map(|x| (0..b).map(|y| samples[x + b - y].clone()).collect())
            .collect(),
    );

    let basis = oracle.integer_kernel(&windows)?;
    let Some(shortest) = basis.first() else {
        debug!(samples = l, "no integer relation");
        return Ok(None);
    };

    let mut den = DensePoly::new(shortest.clone());
    let mut num = DensePoly::new(samples.to_vec()).mul(&den).truncate(b + 1);
    if den.constant_coeff().is_negative() {
        den = den.neg();
        num = num.neg();
    }

    if num.is_zero() || !reproduces(&num, &den, samples) {
        debug!(samples = l, "lattice candidate does not reproduce the samples");
        return Ok(None);
    }

    CFiniteSequence::from_ogf(num, den).map(Some)
}

fn reproduces(num: &DensePoly<Q>, den: &DensePoly<Q>, samples: &[Q]) -> bool {
    let Some(series) = LaurentSeries::from_ratio(num, den, samples.len()) else {
        return false;
    };
    series.valuation() >= 0
        && samples
            .iter()
            .enumerate()
            .all(|(i, s)| series.coeff(to_i64(i)).as_ref() == Some(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CFiniteError;
    use crate::guess::oracle::LllOracle;

    fn ints(values: &[i64]) -> Vec<Q> {
        values.iter().map(|&v| Q::from_integer(v)).collect()
    }

    fn seq(num: &[i64], den: &[i64]) -> CFiniteSequence {
        CFiniteSequence::from_ogf(DensePoly::from_i64s(num), DensePoly::from_i64s(den)).unwrap()
    }

    #[test]
    fn test_geometric() {
        let mut oracle = LllOracle::default();
        let r = guess(&ints(&[1, 2, 4, 8, 16, 32]), &mut oracle).unwrap().unwrap();
        assert_eq!(r, seq(&[1], &[1, -2]));
    }

    #[test]
    fn test_fibonacci() {
        let mut oracle = LllOracle::default();
        let r = guess(&ints(&[0, 1, 1, 2, 3, 5, 8, 13]), &mut oracle).unwrap().unwrap();
        assert_eq!(r, seq(&[0, 1], &[1, -1, -1]));
    }

    #[test]
    fn test_no_structure() {
        let mut oracle = LllOracle::default();
        assert_eq!(guess(&ints(&[1, 0, 0, 0, 0, 1]), &mut oracle).unwrap(), None);
    }

    #[test]
    fn test_too_short() {
        let mut oracle = LllOracle::default();
        assert!(matches!(
            guess(&ints(&[1, 2, 3]), &mut oracle),
            Err(CFiniteError::SampleTooShort { required: 6, .. })
        ));
    }

    struct Failing;

    impl LatticeOracle for Failing {
        fn integer_kernel(&mut self, _: &DenseMatrix<Q>) -> Result<Vec<Vec<Q>>> {
            Err(CFiniteError::Oracle("session closed".to_string()))
        }
    }

    #[test]
    fn test_oracle_failure_propagates() {
        assert_eq!(
            guess(&ints(&[1, 2, 4, 8, 16, 32]), &mut Failing),
            Err(CFiniteError::Oracle("session closed".to_string()))
        );
    }
}
