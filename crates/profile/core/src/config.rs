//! Simulation configuration and its validation.

use serde::{Deserialize, Serialize};

use crate::distribution::ValueDomain;

/// Parameters for a single simulation run.
///
/// Deserializes with defaults for every missing field, so a TOML config file
/// only has to name what it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of Monte Carlo iterations. Must be at least 1.
    pub iterations: u64,

    /// Base seed. `None` draws one from OS entropy; the effective seed is
    /// reported in the result either way.
    pub seed: Option<u64>,

    /// Fraction of the domain width used as the spread for score-form
    /// attributes that declare no range or variance. Must lie in `[0, 1]`.
    pub variation_factor: f64,

    /// Only archetypes participating in this environment are simulated.
    pub environment: Option<String>,

    /// Clamping domain for score-form attributes.
    pub domain: ValueDomain,

    /// Upper bound on `iterations`, checked before sampling starts.
    pub max_iterations: u64,

    /// Fan iterations out over the rayon pool.
    pub parallel: bool,

    /// Render the plain-text summary into the result.
    pub summary: bool,
}

impl SimulationConfig {
    pub const DEFAULT_ITERATIONS: u64 = 100;
    pub const DEFAULT_VARIATION_FACTOR: f64 = 0.2;
    pub const DEFAULT_MAX_ITERATIONS: u64 = 10_000_000;

    pub fn new(iterations: u64) -> Self {
        Self {
            iterations,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_variation_factor(mut self, variation_factor: f64) -> Self {
        self.variation_factor = variation_factor;
        self
    }

    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    #[must_use]
    pub fn with_domain(mut self, domain: ValueDomain) -> Self {
        self.domain = domain;
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[must_use]
    pub fn with_summary(mut self, summary: bool) -> Self {
        self.summary = summary;
        self
    }

    /// Checks every field. Called by the engine before any sampling.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.iterations == 0 {
            return Err(ConfigurationError::ZeroIterations);
        }
        if self.iterations > self.max_iterations {
            return Err(ConfigurationError::TooManyIterations {
                requested: self.iterations,
                limit: self.max_iterations,
            });
        }
        if !(0.0..=1.0).contains(&self.variation_factor) {
            return Err(ConfigurationError::InvalidVariationFactor(
                self.variation_factor,
            ));
        }
        if !(self.domain.min() < self.domain.max()) {
            return Err(ConfigurationError::InvalidDomain {
                min: self.domain.min(),
                max: self.domain.max(),
            });
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            iterations: Self::DEFAULT_ITERATIONS,
            seed: None,
            variation_factor: Self::DEFAULT_VARIATION_FACTOR,
            environment: None,
            domain: ValueDomain::default(),
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            parallel: false,
            summary: true,
        }
    }
}

/// Invalid simulation configuration.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("iteration count must be at least 1")]
    ZeroIterations,

    #[error("iteration count {requested} exceeds the limit of {limit}")]
    TooManyIterations { requested: u64, limit: u64 },

    #[error("variation factor must lie in [0, 1], got {0}")]
    InvalidVariationFactor(f64),

    #[error("domain requires min < max, got [{min}, {max}]")]
    InvalidDomain { min: f64, max: f64 },

    #[error("seed must be a non-negative integer, got '{0}'")]
    InvalidSeed(String),
}

/// Parses a seed from text (CLI flags, environment variables).
pub fn parse_seed(raw: &str) -> Result<u64, ConfigurationError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ConfigurationError::InvalidSeed(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SimulationConfig::default();
        assert_eq!(config.iterations, 100);
        assert_eq!(config.variation_factor, 0.2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_iterations_is_rejected() {
        let config = SimulationConfig::new(0);
        assert_eq!(config.validate(), Err(ConfigurationError::ZeroIterations));
    }

    #[test]
    fn iteration_limit_is_enforced() {
        let mut config = SimulationConfig::new(11);
        config.max_iterations = 10;
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::TooManyIterations {
                requested: 11,
                limit: 10
            })
        ));
    }

    #[test]
    fn variation_factor_must_be_a_fraction() {
        for factor in [-0.1, 1.5, f64::NAN] {
            let config = SimulationConfig::default().with_variation_factor(factor);
            assert!(matches!(
                config.validate(),
                Err(ConfigurationError::InvalidVariationFactor(_))
            ));
        }
    }

    #[test]
    fn seeds_parse_from_text() {
        assert_eq!(parse_seed(" 42 "), Ok(42));
        assert!(matches!(
            parse_seed("-1"),
            Err(ConfigurationError::InvalidSeed(_))
        ));
        assert!(matches!(
            parse_seed("abc"),
            Err(ConfigurationError::InvalidSeed(_))
        ));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{ "iterations": 500, "domain": [0, 100] }"#).unwrap();
        assert_eq!(config.iterations, 500);
        assert_eq!(config.domain.max(), 100.0);
        assert_eq!(config.variation_factor, 0.2);
        assert!(config.seed.is_none());
    }
}
