//! Distribution parameter errors.

/// Malformed distribution parameters.
///
/// Raised when a distribution (or a value domain) is constructed, never while
/// sampling: a value that exists has already passed these checks.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum DistributionError {
    #[error("parameter '{name}' must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("standard deviation must be positive, got {std_dev}")]
    NonPositiveStdDev { std_dev: f64 },

    #[error("range requires min < max, got [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },

    #[error("discrete distribution needs at least one value")]
    EmptyValues,

    #[error("discrete distribution has {values} values but {weights} weights")]
    LengthMismatch { values: usize, weights: usize },

    #[error("weight #{index} must lie in [0, 1], got {weight}")]
    WeightOutOfRange { index: usize, weight: f64 },

    #[error("discrete weights sum to zero")]
    ZeroWeightSum,

    #[error("mode {mode} lies outside [{min}, {max}]")]
    ModeOutOfRange { mode: f64, min: f64, max: f64 },

    #[error("base {base} lies outside the domain [{min}, {max}]")]
    BaseOutOfDomain { base: f64, min: f64, max: f64 },

    #[error("range [{min}, {max}] exceeds the domain [{domain_min}, {domain_max}]")]
    RangeOutOfDomain {
        min: f64,
        max: f64,
        domain_min: f64,
        domain_max: f64,
    },

    /// Parameters passed our checks but the statistics backend still refused them.
    #[error("{kind} distribution rejected: {reason}")]
    Rejected { kind: &'static str, reason: String },
}

impl DistributionError {
    /// Stable identifier, shared with [`crate::SimulationError::error_code`].
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NonFinite { .. } => "distribution.non_finite",
            Self::NonPositiveStdDev { .. } => "distribution.non_positive_std_dev",
            Self::InvalidRange { .. } => "distribution.invalid_range",
            Self::EmptyValues => "distribution.empty_values",
            Self::LengthMismatch { .. } => "distribution.length_mismatch",
            Self::WeightOutOfRange { .. } => "distribution.weight_out_of_range",
            Self::ZeroWeightSum => "distribution.zero_weight_sum",
            Self::ModeOutOfRange { .. } => "distribution.mode_out_of_range",
            Self::BaseOutOfDomain { .. } => "distribution.base_out_of_domain",
            Self::RangeOutOfDomain { .. } => "distribution.range_out_of_domain",
            Self::Rejected { .. } => "distribution.rejected",
        }
    }
}

/// Rejects NaN and infinities.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64, DistributionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DistributionError::NonFinite { name, value })
    }
}
