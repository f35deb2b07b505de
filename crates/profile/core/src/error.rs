//! Top-level error for a simulation call.
//!
//! Each stage owns a narrow error type next to the code that raises it
//! ([`ConfigurationError`] in `config`, [`PlanError`] in `engine::plan`,
//! [`AggregationError`] in `aggregate`). [`SimulationError`] unifies them for
//! [`crate::simulate`] and exposes a stable code for diagnostics.

use crate::aggregate::AggregationError;
use crate::config::ConfigurationError;
use crate::engine::PlanError;

/// Any failure while running a simulation.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("aggregation failed: {0}")]
    Aggregation(#[from] AggregationError),
}

impl SimulationError {
    /// Stable identifier, prefixed by the failing stage.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(e) => match e {
                ConfigurationError::ZeroIterations => "config.zero_iterations",
                ConfigurationError::TooManyIterations { .. } => "config.too_many_iterations",
                ConfigurationError::InvalidVariationFactor(_) => "config.invalid_variation_factor",
                ConfigurationError::InvalidDomain { .. } => "config.invalid_domain",
                ConfigurationError::InvalidSeed(_) => "config.invalid_seed",
            },
            Self::Plan(e) => e.source.error_code(),
            Self::Aggregation(AggregationError::NoSnapshots) => "aggregate.no_snapshots",
        }
    }

    /// True for errors caused by the caller's input rather than by the run.
    pub const fn is_input_error(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Plan(_))
    }
}
