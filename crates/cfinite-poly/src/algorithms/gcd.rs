//! Euclidean division and GCD of polynomials over a field.

use cfinite_rings::traits::Field;

use crate::dense::DensePoly;

/// Divides polynomial `a` by `b`, returning `(quotient, remainder)` with
/// `deg(remainder) < deg(b)`.
///
/// Returns `None` if `b` is the zero polynomial.
#[must_use]
pub fn poly_div_rem<F: Field>(
    a: &DensePoly<F>,
    b: &DensePoly<F>,
) -> Option<(DensePoly<F>, DensePoly<F>)> {
    let lead_inv = b.leading_coeff().inv()?;
    let db = b.degree();

    if a.is_zero() || a.degree() < db {
        return Some((DensePoly::zero(), a.clone()));
    }

    let mut remainder = a.coeffs().to_vec();
    let mut quotient = vec![F::zero(); a.degree() - db + 1];

    for k in (0..quotient.len()).rev() {
        let c = remainder[k + db].clone() * lead_inv.clone();
        if c.is_zero() {
            continue;
        }
        for (i, bc) in b.coeffs().iter().enumerate() {
            remainder[k + i] = remainder[k + i].clone() - c.clone() * bc.clone();
        }
        quotient[k] = c;
    }

    remainder.truncate(db);
    Some((DensePoly::new(quotient), DensePoly::new(remainder)))
}

/// Computes the monic GCD of two polynomials with the Euclidean algorithm.
///
/// `gcd(0, 0)` is the zero polynomial.
#[must_use]
pub fn poly_gcd<F: Field>(a: &DensePoly<F>, b: &DensePoly<F>) -> DensePoly<F> {
    let mut p = a.clone();
    let mut q = b.clone();

    while let Some((_, r)) = poly_div_rem(&p, &q) {
        p = q;
        q = r;
    }

    make_monic(&p)
}

/// Makes a polynomial monic (leading coefficient = 1).
#[must_use]
pub fn make_monic<F: Field>(p: &DensePoly<F>) -> DensePoly<F> {
    match p.leading_coeff().inv() {
        Some(lead_inv) => p.scale(&lead_inv),
        None => p.clone(),
    }
}
