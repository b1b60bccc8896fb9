#[cfg(test)]
mod tests {
    use super::super::rng::*;
    use std::collections::HashSet;

    #[test]
    fn test_same_seed_reproduces_sequence() {
        let mut a = TrialRng::new(12345);
        let mut b = TrialRng::new(12345);

        for _ in 0..100 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn test_next_f64_stays_in_unit_interval() {
        let mut rng = TrialRng::new(42);

        for _ in 0..10_000 {
            let value = rng.next_f64();
            assert!((0.0..1.0).contains(&value), "draw {} out of [0,1)", value);
        }
    }

    #[test]
    fn test_zero_seed_is_substituted() {
        let mut zero = TrialRng::new(0);
        let mut substitute = TrialRng::new(0x9E37_79B9);

        for _ in 0..10 {
            assert_eq!(zero.next_f64(), substitute.next_f64());
        }
    }

    #[test]
    fn test_rand_int_is_inclusive_on_both_ends() {
        let mut rng = TrialRng::new(7);
        let mut seen = HashSet::new();

        for _ in 0..1000 {
            let value = rng.rand_int(1, 3);
            assert!((1..=3).contains(&value), "rand_int produced {}", value);
            seen.insert(value);
        }

        assert_eq!(seen.len(), 3, "all of 1, 2, 3 should appear in 1000 draws");
    }

    #[test]
    fn test_choice_picks_from_slice() {
        let mut rng = TrialRng::new(99);
        let items = [10, 20, 30, 40];

        for _ in 0..500 {
            let picked = *rng.choice(&items);
            assert!(items.contains(&picked));
        }
    }

    #[test]
    fn test_uniform_respects_bounds() {
        let mut rng = TrialRng::new(3);

        for _ in 0..1000 {
            let value = rng.uniform(1.5, 2.0);
            assert!((1.5..2.0).contains(&value), "uniform produced {}", value);
        }
    }

    #[test]
    fn test_normalize_seed() {
        assert_eq!(normalize_seed(None), 0);
        assert_eq!(normalize_seed(Some(42)), 42);
        // Reduced mod 2^32.
        assert_eq!(normalize_seed(Some((1u64 << 32) + 5)), 5);
    }

    #[test]
    fn test_derive_trial_seed_is_deterministic() {
        assert_eq!(
            derive_trial_seed(42, 1640, 7),
            derive_trial_seed(42, 1640, 7)
        );
    }

    #[test]
    fn test_derived_seeds_are_distinct_across_trials() {
        let thresholds = [1617i64, 1640, 1664, 1687, 1710, 1734, 1757];
        let mut seeds = HashSet::new();

        for &threshold in &thresholds {
            for run_index in 0..200 {
                seeds.insert(derive_trial_seed(42, threshold, run_index));
            }
        }

        assert_eq!(seeds.len(), thresholds.len() * 200);
    }

    #[test]
    fn test_derived_seeds_produce_distinct_sequences() {
        let mut a = TrialRng::new(derive_trial_seed(42, 1640, 0));
        let mut b = TrialRng::new(derive_trial_seed(42, 1640, 1));
        let mut c = TrialRng::new(derive_trial_seed(42, 1664, 0));

        let first_a = a.next_f64();
        let first_b = b.next_f64();
        let first_c = c.next_f64();

        assert_ne!(first_a, first_b);
        assert_ne!(first_a, first_c);
        assert_ne!(first_b, first_c);
    }
}
