//! Property-based tests for rational arithmetic.

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};
    use proptest::prelude::*;

    use crate::rationals::Q;
    use crate::traits::Field;

    fn small_q() -> impl Strategy<Value = Q> {
        (-1000i64..1000i64, 1i64..100i64).prop_map(|(n, d)| Q::new(n, d))
    }

    fn nonzero_q() -> impl Strategy<Value = Q> {
        small_q().prop_filter("rational must be non-zero", |q| !q.is_zero())
    }

    proptest! {
        #[test]
        fn add_commutative(a in small_q(), b in small_q()) {
            prop_assert_eq!(&a + &b, &b + &a);
        }

        #[test]
        fn mul_distributes(a in small_q(), b in small_q(), c in small_q()) {
            prop_assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
        }

        #[test]
        fn inverse_is_two_sided(a in nonzero_q()) {
            let inv = a.inv().unwrap();
            prop_assert!((&a * &inv).is_one());
            prop_assert!((&inv * &a).is_one());
        }

        #[test]
        fn floor_brackets_value(a in small_q()) {
            let f = Q::from_ibig(a.floor());
            prop_assert!(f <= a);
            prop_assert!(a < f + Q::one());
        }

        #[test]
        fn round_is_within_half(a in small_q()) {
            let diff = (a.round() - a.clone()).abs();
            prop_assert!(diff <= Q::new(1, 2));
            prop_assert!(a.round().is_integer());
        }

        #[test]
        fn display_parses_back(a in small_q()) {
            prop_assert_eq!(a.to_string().parse::<Q>(), Ok(a));
        }
    }
}
