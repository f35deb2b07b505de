//! Distribution sampler.

use rand::Rng;
use rand::distributions::Distribution as _;

use super::{Distribution, apply_variance};
use crate::profile::Scalar;

/// Draws single values from a [`Distribution`].
///
/// The sampler holds only the global variation factor, which is needed by
/// `VarianceScalar` attributes that declare no variance of their own. All
/// randomness comes from the RNG passed to [`Sampler::sample`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sampler {
    variation_factor: f64,
}

impl Sampler {
    pub fn new(variation_factor: f64) -> Self {
        Self { variation_factor }
    }

    pub fn variation_factor(&self) -> f64 {
        self.variation_factor
    }

    /// Draws one value. Pure function of `(distribution, rng state)`.
    pub fn sample<R: Rng + ?Sized>(&self, distribution: &Distribution, rng: &mut R) -> Scalar {
        let value = match distribution {
            Distribution::Discrete(spec) => return spec.values[spec.index.sample(rng)].clone(),
            Distribution::Normal(spec) => {
                let draw = spec.inner.sample(rng);
                match spec.bounds {
                    Some(bounds) => bounds.clamp(draw),
                    None => draw,
                }
            }
            Distribution::Uniform(spec) => spec.range.clamp(spec.inner.sample(rng)),
            Distribution::Exponential(spec) => {
                let draw = spec.range.min() + spec.inner.sample(rng);
                draw.min(spec.range.max())
            }
            Distribution::Triangular(spec) => spec.range.clamp(spec.inner.sample(rng)),
            Distribution::VarianceScalar(spec) => {
                let half_width = spec
                    .variance
                    .unwrap_or(self.variation_factor * spec.domain.width());
                apply_variance(spec.base, half_width, spec.domain, rng)
            }
        };

        Scalar::Number(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::ValueDomain;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn numbers(distribution: &Distribution, n: usize, seed: u64) -> Vec<f64> {
        let sampler = Sampler::new(0.2);
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| {
                sampler
                    .sample(distribution, &mut rng)
                    .as_number()
                    .expect("numeric draw")
            })
            .collect()
    }

    fn mean_and_std(values: &[f64]) -> (f64, f64) {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        (mean, var.sqrt())
    }

    #[test]
    fn normal_matches_parameters() {
        let dist = Distribution::normal(5.0, 1.0).unwrap();
        let (mean, std) = mean_and_std(&numbers(&dist, 10_000, 3));

        assert!((mean - 5.0).abs() < 0.1, "mean {}", mean);
        assert!((std - 1.0).abs() < 0.15, "std {}", std);
    }

    #[test]
    fn bounded_normal_is_clamped() {
        let bounds = ValueDomain::new(4.0, 6.0).unwrap();
        let dist = Distribution::bounded_normal(5.0, 3.0, bounds).unwrap();

        for value in numbers(&dist, 2_000, 5) {
            assert!(bounds.contains(value), "value {} escaped bounds", value);
        }
    }

    #[test]
    fn uniform_stays_in_range() {
        let dist = Distribution::uniform(5.0, 15.0).unwrap();
        let values = numbers(&dist, 5_000, 8);

        assert!(values.iter().all(|v| (5.0..=15.0).contains(v)));
        let (mean, _) = mean_and_std(&values);
        assert!((mean - 10.0).abs() < 0.3);
    }

    #[test]
    fn exponential_is_anchored_and_capped() {
        let dist = Distribution::exponential(2.0, 8.0).unwrap();
        let values = numbers(&dist, 5_000, 13);

        assert!(values.iter().all(|v| (2.0..=8.0).contains(v)));
        // Scale 2.0: the uncapped mean would be min + 2.
        let (mean, _) = mean_and_std(&values);
        assert!(mean > 3.5 && mean < 4.2, "mean {}", mean);
    }

    #[test]
    fn triangular_stays_in_range_and_leans_to_mode() {
        let dist = Distribution::triangular(0.0, 10.0, 8.0).unwrap();
        let values = numbers(&dist, 5_000, 21);

        assert!(values.iter().all(|v| (0.0..=10.0).contains(v)));
        let (mean, _) = mean_and_std(&values);
        // (min + max + mode) / 3 = 6
        assert!((mean - 6.0).abs() < 0.2, "mean {}", mean);
    }

    #[test]
    fn discrete_frequencies_follow_weights() {
        let dist = Distribution::discrete(
            vec!["low".into(), "medium".into(), "high".into()],
            vec![0.2, 0.5, 0.3],
        )
        .unwrap();
        let sampler = Sampler::new(0.2);
        let mut rng = StdRng::seed_from_u64(34);

        let n = 10_000;
        let mut counts = [0usize; 3];
        for _ in 0..n {
            match sampler.sample(&dist, &mut rng) {
                Scalar::Text(s) if s == "low" => counts[0] += 1,
                Scalar::Text(s) if s == "medium" => counts[1] += 1,
                Scalar::Text(s) if s == "high" => counts[2] += 1,
                other => panic!("unexpected draw {:?}", other),
            }
        }

        for (count, expected) in counts.iter().zip([0.2, 0.5, 0.3]) {
            let freq = *count as f64 / n as f64;
            assert!((freq - expected).abs() < 0.05, "freq {} vs {}", freq, expected);
        }
    }

    #[test]
    fn variance_scalar_falls_back_to_global_factor() {
        let domain = ValueDomain::UNIT_TEN;
        let dist = Distribution::variance_scalar(5.0, None, domain).unwrap();

        // factor 0.2 over a width of 10 gives a half-width of 2
        let values = numbers(&dist, 2_000, 55);
        assert!(values.iter().all(|v| (3.0..=7.0).contains(v)));
        assert!(values.iter().any(|v| *v != 5.0));
    }

    #[test]
    fn zero_variance_scalar_never_moves() {
        let dist = Distribution::variance_scalar(4.0, Some(0.0), ValueDomain::UNIT_TEN).unwrap();
        assert!(numbers(&dist, 100, 1).iter().all(|v| *v == 4.0));
    }
}
