//! LLL (Lenstra-Lenstra-Lovász) lattice reduction over Q.
//!
//! LLL turns a basis of linearly independent rows into a reduced basis of
//! the same lattice whose first vector is short and whose rows are close
//! to orthogonal. Everything is exact: the Gram-Schmidt data lives in `Q`
//! and size reduction rounds with `Q::round`.

use dashu::base::Abs;
use dashu::integer::IBig;
use num_traits::{One, Zero};
use tracing::trace;

use cfinite_rings::rationals::Q;

use crate::dense_matrix::DenseMatrix;

/// Configuration for LLL reduction.
#[derive(Clone, Debug)]
pub struct LllConfig {
    /// Lovász parameter, in (1/4, 1].
    pub delta: Q,
}

impl Default for LllConfig {
    fn default() -> Self {
        Self {
            delta: Q::new(3, 4),
        }
    }
}

/// Result of LLL reduction.
#[derive(Clone, Debug)]
pub struct LllResult {
    /// The reduced basis (rows are basis vectors).
    pub basis: DenseMatrix<Q>,
    /// Number of main-loop iterations performed.
    pub iterations: usize,
}

/// Performs LLL reduction on the rows of `basis`.
///
/// The rows must be linearly independent.
#[must_use]
pub fn lll_reduce(basis: &DenseMatrix<Q>, config: &LllConfig) -> LllResult {
    let n = basis.num_rows();
    let mut b = basis.to_rows();
    let mut iterations = 0;

    if n < 2 {
        return LllResult {
            basis: basis.clone(),
            iterations,
        };
    }

    let mut gs = GramSchmidt::compute(&b);
    let half = Q::new(1, 2);

    let mut k = 1;
    while k < n {
        iterations += 1;

        for j in (0..k).rev() {
            if gs.mu[k][j].abs() > half {
                let r = gs.mu[k][j].round();
                sub_scaled(&mut b, k, j, &r);
                for l in 0..j {
                    let adjustment = &r * &gs.mu[j][l];
                    gs.mu[k][l] = &gs.mu[k][l] - &adjustment;
                }
                gs.mu[k][j] = &gs.mu[k][j] - &r;
            }
        }

        let mu_sq = &gs.mu[k][k - 1] * &gs.mu[k][k - 1];
        let threshold = (&config.delta - &mu_sq) * gs.norms_sq[k - 1].clone();
        if gs.norms_sq[k] >= threshold {
            k += 1;
        } else {
            b.swap(k - 1, k);
            gs = GramSchmidt::compute(&b);
            k = (k - 1).max(1);
        }
    }

    trace!(rows = n, iterations, "LLL reduction finished");

    LllResult {
        basis: DenseMatrix::from_rows(b),
        iterations,
    }
}

/// Gram-Schmidt data of a basis.
struct GramSchmidt {
    /// mu[i][j] = <b_i, b*_j> / <b*_j, b*_j> for j < i.
    mu: Vec<Vec<Q>>,
    /// ||b*_i||^2.
    norms_sq: Vec<Q>,
}

impl GramSchmidt {
    fn compute(b: &[Vec<Q>]) -> Self {
        let n = b.len();
        let mut mu = vec![vec![Q::zero(); n]; n];
        let mut norms_sq: Vec<Q> = Vec::with_capacity(n);
        let mut b_star: Vec<Vec<Q>> = Vec::with_capacity(n);

        for i in 0..n {
            let mut v = b[i].clone();
            for j in 0..i {
                if norms_sq[j] == Q::zero() {
                    continue;
                }
                let coeff = dot(&b[i], &b_star[j]) / norms_sq[j].clone();
                for (vc, bc) in v.iter_mut().zip(&b_star[j]) {
                    *vc = &*vc - &(&coeff * bc);
                }
                mu[i][j] = coeff;
            }
            mu[i][i] = Q::one();
            norms_sq.push(dot(&v, &v));
            b_star.push(v);
        }

        Self { mu, norms_sq }
    }
}

fn dot(a: &[Q], b: &[Q]) -> Q {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// b[k] -= r * b[j].
fn sub_scaled(b: &mut [Vec<Q>], k: usize, j: usize, r: &Q) {
    let source = b[j].clone();
    for (x, y) in b[k].iter_mut().zip(&source) {
        *x = &*x - &(r * y);
    }
}

/// Scales a rational vector to the primitive integer vector on the same
/// line: integer entries with gcd 1 and the same signs as the input.
///
/// The zero vector is returned unchanged.
#[must_use]
pub fn primitive_integer_vector(v: &[Q]) -> Vec<Q> {
    let den_lcm = v
        .iter()
        .fold(IBig::ONE, |acc, x| lcm(&acc, &x.denominator()));
    let scaled: Vec<IBig> = v
        .iter()
        .map(|x| x.numerator() * (&den_lcm / x.denominator()))
        .collect();

    let num_gcd = scaled.iter().fold(IBig::ZERO, |acc, x| gcd(&acc, x));
    if num_gcd.is_zero() {
        return v.to_vec();
    }

    scaled
        .into_iter()
        .map(|x| Q::from_ibig(x / &num_gcd))
        .collect()
}

/// Non-negative gcd.
fn gcd(a: &IBig, b: &IBig) -> IBig {
    let mut a = a.clone().abs();
    let mut b = b.clone().abs();
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

fn lcm(a: &IBig, b: &IBig) -> IBig {
    if a.is_zero() || b.is_zero() {
        return IBig::ZERO;
    }
    (a / gcd(a, b)) * b
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mat(rows: &[&[i64]]) -> DenseMatrix<Q> {
        DenseMatrix::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|&v| Q::from_integer(v)).collect())
                .collect(),
        )
    }

    fn ints(values: &[i64]) -> Vec<Q> {
        values.iter().map(|&v| Q::from_integer(v)).collect()
    }

    fn vector_norm_squared(v: &[Q]) -> Q {
        dot(v, v)
    }

    #[test]
    fn test_lll_identity() {
        let basis = mat(&[&[1, 0], &[0, 1]]);
        let result = lll_reduce(&basis, &LllConfig::default());
        assert_eq!(result.basis, basis);
    }

    #[test]
    fn test_lll_reduces_skewed_basis() {
        // (1, 1), (0, 1) spans Z^2; reduction finds unit vectors
        let result = lll_reduce(&mat(&[&[1, 1], &[0, 1]]), &LllConfig::default());
        for i in 0..2 {
            assert_eq!(vector_norm_squared(result.basis.row(i)), Q::one());
        }
    }

    #[test]
    fn test_lll_classic_example() {
        // Standard 3x3 example; the reduced basis is
        // (0, 1, 0), (1, 0, 1), (-1, 0, 2)
        let basis = mat(&[&[1, 1, 1], &[-1, 0, 2], &[3, 5, 6]]);
        let result = lll_reduce(&basis, &LllConfig::default());
        assert_eq!(result.basis, mat(&[&[0, 1, 0], &[1, 0, 1], &[-1, 0, 2]]));
    }

    #[test]
    fn test_first_vector_is_short() {
        let basis = mat(&[&[201, 37], &[1648, 297]]);
        let result = lll_reduce(&basis, &LllConfig::default());
        assert_eq!(result.basis.row(0), ints(&[1, 32]).as_slice());
        assert_eq!(result.basis.row(1), ints(&[40, 1]).as_slice());
        assert!(vector_norm_squared(result.basis.row(0)) < vector_norm_squared(basis.row(0)));
    }

    #[test]
    fn test_primitive_integer_vector() {
        let v = vec![Q::new(1, 2), Q::new(-1, 3), Q::from_integer(0)];
        assert_eq!(primitive_integer_vector(&v), ints(&[3, -2, 0]));

        assert_eq!(primitive_integer_vector(&ints(&[4, -6, 8])), ints(&[2, -3, 4]));
        assert_eq!(primitive_integer_vector(&ints(&[0, 0])), ints(&[0, 0]));
    }
}
