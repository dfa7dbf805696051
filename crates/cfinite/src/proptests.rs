//! Property-based tests for sequences.

#[cfg(test)]
mod tests {
    use cfinite_rings::rationals::Q;
    use proptest::prelude::*;

    use crate::guess::{Guesser, Strategy as GuessStrategy};
    use crate::sequence::CFiniteSequence;
    use crate::term::EvalConfig;

    fn ints(values: &[i64]) -> Vec<Q> {
        values.iter().map(|&v| Q::from_integer(v)).collect()
    }

    /// A recurrence of order 1..=3 whose oldest coefficient is non-zero,
    /// with non-zero start values.
    fn recurrence() -> impl Strategy<Value = (Vec<Q>, Vec<Q>)> {
        (1usize..=3)
            .prop_flat_map(|d| {
                (
                    prop::collection::vec(-3i64..=3, d),
                    prop::collection::vec(-5i64..=5, d),
                )
            })
            .prop_filter("order must be exact", |(c, _)| c[0] != 0)
            .prop_filter("start values must be non-zero", |(_, v)| {
                v.iter().any(|&x| x != 0)
            })
            .prop_map(|(c, v)| (ints(&c), ints(&v)))
    }

    fn sequence() -> impl Strategy<Value = CFiniteSequence> {
        recurrence().prop_map(|(c, v)| CFiniteSequence::from_recurrence(&c, &v).unwrap())
    }

    proptest! {
        #[test]
        fn recurrence_holds((coefficients, values) in recurrence()) {
            let r = CFiniteSequence::from_recurrence(&coefficients, &values).unwrap();
            let d = coefficients.len();

            for (i, v) in values.iter().enumerate() {
                prop_assert_eq!(&r.term(i as i64), v);
            }
            for n in 0..20i64 {
                let expected: Q = coefficients
                    .iter()
                    .enumerate()
                    .map(|(i, c)| c * &r.term(n + i as i64))
                    .sum();
                prop_assert_eq!(r.term(n + d as i64), expected);
            }
        }

        #[test]
        fn canonical_form_is_idempotent(r in sequence()) {
            let again =
                CFiniteSequence::from_ogf(r.numerator().clone(), r.denominator().clone()).unwrap();
            prop_assert_eq!(again.offset(), r.offset());
            prop_assert_eq!(again.coefficients(), r.coefficients());
            prop_assert_eq!(again.initial_terms(), r.initial_terms());
            prop_assert_eq!(again, r);
        }

        #[test]
        fn berlekamp_massey_recovers(r in sequence()) {
            let samples = r.terms(0, 8, 1).unwrap();
            let guessed = CFiniteSequence::guess(&samples, GuessStrategy::BerlekampMassey).unwrap();
            prop_assert_eq!(guessed, Some(r));
        }

        #[test]
        fn kernel_and_lattice_recover((coefficients, values) in recurrence()) {
            let r = CFiniteSequence::from_recurrence(&coefficients, &values).unwrap();
            let n = (2 * coefficients.len() + 2).max(6);
            let samples = r.terms(0, n as i64, 1).unwrap();

            let guesser = Guesser::default();
            for strategy in [GuessStrategy::Kernel, GuessStrategy::Lattice] {
                let guessed = guesser.guess(&samples, strategy).unwrap();
                prop_assert_eq!(guessed, Some(r.clone()), "{}", strategy);
            }
        }

        #[test]
        fn sum_and_difference_are_termwise(r in sequence(), s in sequence()) {
            let sum = &r + &s;
            let difference = &r - &s;
            for k in -2..15i64 {
                prop_assert_eq!(sum.term(k), r.term(k) + s.term(k));
                prop_assert_eq!(difference.term(k), r.term(k) - s.term(k));
            }
        }

        #[test]
        fn product_is_convolution(r in sequence(), s in sequence()) {
            let product = &r * &s;
            for k in 0..10i64 {
                let expected: Q = (0..=k).map(|i| r.term(i) * s.term(k - i)).sum();
                prop_assert_eq!(product.term(k), expected);
            }
        }

        #[test]
        fn quotient_undoes_product(r in sequence(), s in sequence()) {
            let q = r.checked_div(&s).unwrap();
            prop_assert_eq!(&q * &s, r.clone());

            // s starts at index >= 0, so q may start below 0
            for k in 0..10i64 {
                let convolved: Q = (q.offset().min(0)..=k).map(|i| q.term(i) * s.term(k - i)).sum();
                prop_assert_eq!(convolved, r.term(k));
            }
        }

        #[test]
        fn parallel_slices_match(r in sequence(), start in -3i64..5, len in 0i64..40) {
            let eager = EvalConfig { parallel_threshold: 1 };
            prop_assert_eq!(
                r.terms_with(start, start + len, 1, &eager).unwrap(),
                r.terms(start, start + len, 1).unwrap()
            );
        }
    }
}
