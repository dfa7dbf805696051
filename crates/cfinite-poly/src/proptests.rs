//! Property-based tests for polynomials and series.

#[cfg(test)]
mod tests {
    use cfinite_rings::rationals::Q;
    use proptest::prelude::*;

    use crate::algorithms::gcd::{poly_div_rem, poly_gcd};
    use crate::dense::DensePoly;
    use crate::series::expand_ratio;

    fn small_poly(max_len: usize) -> impl Strategy<Value = DensePoly<Q>> {
        prop::collection::vec(-9i64..=9, 1..=max_len).prop_map(|c| DensePoly::from_i64s(&c))
    }

    fn nonzero_poly(max_len: usize) -> impl Strategy<Value = DensePoly<Q>> {
        small_poly(max_len).prop_filter("polynomial must be non-zero", |p| !p.is_zero())
    }

    proptest! {
        #[test]
        fn div_rem_reconstructs(a in small_poly(7), b in nonzero_poly(4)) {
            let (q, r) = poly_div_rem(&a, &b).unwrap();
            prop_assert_eq!(q.mul(&b).add(&r), a);
            prop_assert!(r.is_zero() || r.degree() < b.degree());
        }

        #[test]
        fn gcd_divides_both(a in nonzero_poly(5), b in nonzero_poly(5), c in nonzero_poly(3)) {
            let g = poly_gcd(&a.mul(&c), &b.mul(&c));
            let (_, ra) = poly_div_rem(&a.mul(&c), &g).unwrap();
            let (_, rb) = poly_div_rem(&b.mul(&c), &g).unwrap();
            let (_, rc) = poly_div_rem(&g, &c).unwrap();
            prop_assert!(ra.is_zero());
            prop_assert!(rb.is_zero());
            prop_assert!(rc.is_zero());
        }

        #[test]
        fn series_times_denominator(num in small_poly(4), tail in small_poly(4), n in 1usize..12) {
            // den = 1 + x * tail, so den(0) = 1
            let den = DensePoly::one().add(&tail.shift(1));
            let series = DensePoly::new(expand_ratio(&num, &den, n).unwrap());
            prop_assert_eq!(series.mul(&den).truncate(n), num.truncate(n));
        }
    }
}
