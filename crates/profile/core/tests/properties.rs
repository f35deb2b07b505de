//! Property tests over distribution bounds.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tanzo_core::{Distribution, Sampler, ValueDomain, apply_variance};

proptest! {
    #[test]
    fn uniform_draws_stay_in_range(
        min in -1_000.0f64..1_000.0,
        width in 0.001f64..500.0,
        seed in any::<u64>(),
    ) {
        let max = min + width;
        let dist = Distribution::uniform(min, max).unwrap();
        let sampler = Sampler::new(0.2);
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..64 {
            let value = sampler.sample(&dist, &mut rng).as_number().unwrap();
            prop_assert!(value >= min && value <= max, "{} outside [{}, {}]", value, min, max);
        }
    }

    #[test]
    fn variance_never_leaves_the_domain(
        base in 0.0f64..=10.0,
        half_width in 0.0f64..20.0,
        seed in any::<u64>(),
    ) {
        let domain = ValueDomain::UNIT_TEN;
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..64 {
            let value = apply_variance(base, half_width, domain, &mut rng);
            prop_assert!(domain.contains(value));
            prop_assert!((value - base).abs() <= half_width + 1e-9);
        }
    }

    #[test]
    fn triangular_draws_stay_in_range(
        min in -100.0f64..100.0,
        width in 0.01f64..100.0,
        mode_at in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let max = min + width;
        let mode = min + width * mode_at;
        let dist = Distribution::triangular(min, max, mode).unwrap();
        let sampler = Sampler::new(0.2);
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..64 {
            let value = sampler.sample(&dist, &mut rng).as_number().unwrap();
            prop_assert!(value >= min && value <= max);
        }
    }
}
