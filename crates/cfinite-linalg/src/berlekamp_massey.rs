//! Berlekamp-Massey algorithm for minimal linear recurrences.
//!
//! Given a sequence s_0, s_1, ..., s_{n-1}, this algorithm finds the
//! shortest connection polynomial C(x) = 1 + C_1 x + ... + C_L x^L with
//!   s_j + C_1 * s_{j-1} + ... + C_L * s_{j-L} = 0
//! for all L <= j < n.
//!
//! Read as a generating function, C(x) is a denominator for the sequence:
//! S(x) * C(x) agrees with a polynomial of degree < L up to x^(n-1).

use cfinite_rings::traits::Field;

/// Result of the Berlekamp-Massey algorithm.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BerlekampMasseyResult<R> {
    /// Connection polynomial C(x) in ascending degree order, with C_0 = 1.
    pub connection_poly: Vec<R>,
    /// Linear complexity L of the sequence.
    pub length: usize,
}

/// Computes the shortest linear recurrence satisfied by `sequence`.
///
/// The connection polynomial keeps `C_0 = 1`; its degree may be smaller
/// than the linear complexity when trailing coefficients vanish.
#[must_use]
pub fn berlekamp_massey<R: Field>(sequence: &[R]) -> BerlekampMasseyResult<R> {
    // Current connection polynomial C(x)
    let mut c = vec![R::one()];
    // Connection polynomial before the last length change
    let mut b = vec![R::one()];

    let mut l = 0usize;
    let mut m = 1usize;
    let mut delta_prev = R::one();

    for i in 0..sequence.len() {
        let delta = compute_discrepancy(&c, sequence, i);

        if delta.is_zero() {
            m += 1;
            continue;
        }

        // delta_prev is only ever replaced by a non-zero discrepancy
        let scale = delta.checked_div(&delta_prev).unwrap_or_else(R::zero);

        if 2 * l <= i {
            let t = c.clone();
            c = poly_sub_scaled_shift(&c, &b, &scale, m);
            b = t;
            l = i + 1 - l;
            delta_prev = delta;
            m = 1;
        } else {
            c = poly_sub_scaled_shift(&c, &b, &scale, m);
            m += 1;
        }
    }

    BerlekampMasseyResult {
        connection_poly: c,
        length: l,
    }
}

/// Computes the discrepancy at step n.
fn compute_discrepancy<R: Field>(c: &[R], s: &[R], n: usize) -> R {
    c.iter()
        .enumerate()
        .take(n + 1)
        .fold(R::zero(), |acc, (j, cj)| acc + cj.clone() * s[n - j].clone())
}

/// Computes A(x) - scale * x^shift * B(x).
fn poly_sub_scaled_shift<R: Field>(a: &[R], b: &[R], scale: &R, shift: usize) -> Vec<R> {
    let mut result = vec![R::zero(); a.len().max(b.len() + shift)];
    result[..a.len()].clone_from_slice(a);

    for (i, bi) in b.iter().enumerate() {
        let idx = i + shift;
        result[idx] = result[idx].clone() - bi.clone() * scale.clone();
    }

    while result.len() > 1 && result.last().is_some_and(R::is_zero) {
        result.pop();
    }

    result
}
