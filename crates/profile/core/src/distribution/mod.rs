//! Probability distributions for attribute values.
//!
//! [`Distribution`] is a single sum type covering every way an attribute can
//! vary. Each variant wraps a spec struct whose constructor validates the
//! parameters and builds the sampling backend up front, so sampling itself is
//! infallible.
//!
//! | Variant          | Parameters                          | Draw                                 |
//! |------------------|-------------------------------------|--------------------------------------|
//! | `Normal`         | mean, std_dev > 0, optional bounds  | Gaussian, clamped into bounds        |
//! | `Uniform`        | min < max                           | uniform in `[min, max]`              |
//! | `Discrete`       | values, weights in `[0, 1]`         | weighted choice among values         |
//! | `Exponential`    | min < max                           | `min + Exp(3 / (max - min))`, ≤ max  |
//! | `Triangular`     | min < max, min ≤ mode ≤ max         | triangular                           |
//! | `VarianceScalar` | base, optional variance, domain     | see [`apply_variance`]               |

mod domain;
mod error;
mod sampler;
mod variance;

pub use domain::ValueDomain;
pub use error::DistributionError;
pub use sampler::Sampler;
pub use variance::apply_variance;

use rand::distributions::WeightedIndex;
use statrs::distribution as backend;

use crate::profile::Scalar;
pub(crate) use error::ensure_finite;

/// Validated probability distribution.
#[derive(Clone, Debug, PartialEq)]
pub enum Distribution {
    Normal(NormalSpec),
    Uniform(UniformSpec),
    Discrete(DiscreteSpec),
    Exponential(ExponentialSpec),
    Triangular(TriangularSpec),
    VarianceScalar(VarianceSpec),
}

impl Distribution {
    pub fn normal(mean: f64, std_dev: f64) -> Result<Self, DistributionError> {
        NormalSpec::new(mean, std_dev).map(Self::Normal)
    }

    pub fn bounded_normal(
        mean: f64,
        std_dev: f64,
        bounds: ValueDomain,
    ) -> Result<Self, DistributionError> {
        NormalSpec::new(mean, std_dev).map(|spec| Self::Normal(spec.with_bounds(bounds)))
    }

    pub fn uniform(min: f64, max: f64) -> Result<Self, DistributionError> {
        UniformSpec::new(min, max).map(Self::Uniform)
    }

    pub fn discrete(values: Vec<Scalar>, weights: Vec<f64>) -> Result<Self, DistributionError> {
        DiscreteSpec::new(values, weights).map(Self::Discrete)
    }

    pub fn exponential(min: f64, max: f64) -> Result<Self, DistributionError> {
        ExponentialSpec::new(min, max).map(Self::Exponential)
    }

    pub fn triangular(min: f64, max: f64, mode: f64) -> Result<Self, DistributionError> {
        TriangularSpec::new(min, max, mode).map(Self::Triangular)
    }

    pub fn variance_scalar(
        base: f64,
        variance: Option<f64>,
        domain: ValueDomain,
    ) -> Result<Self, DistributionError> {
        VarianceSpec::new(base, variance, domain).map(Self::VarianceScalar)
    }

    /// Returns true if every possible draw is a number.
    pub fn is_numeric(&self) -> bool {
        match self {
            Self::Discrete(spec) => spec.values.iter().all(Scalar::is_numeric),
            _ => true,
        }
    }
}

/// Gaussian with an optional clamping range.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalSpec {
    mean: f64,
    std_dev: f64,
    bounds: Option<ValueDomain>,
    inner: backend::Normal,
}

impl NormalSpec {
    pub fn new(mean: f64, std_dev: f64) -> Result<Self, DistributionError> {
        let mean = ensure_finite("mean", mean)?;
        let std_dev = ensure_finite("std_dev", std_dev)?;
        if std_dev <= 0.0 {
            return Err(DistributionError::NonPositiveStdDev { std_dev });
        }
        let inner = backend::Normal::new(mean, std_dev).map_err(|e| rejected("normal", e))?;

        Ok(Self {
            mean,
            std_dev,
            bounds: None,
            inner,
        })
    }

    /// Clamps every draw into `bounds`.
    #[must_use]
    pub fn with_bounds(mut self, bounds: ValueDomain) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    pub fn bounds(&self) -> Option<ValueDomain> {
        self.bounds
    }
}

/// Continuous uniform over `[min, max]`.
#[derive(Clone, Debug, PartialEq)]
pub struct UniformSpec {
    range: ValueDomain,
    inner: backend::Uniform,
}

impl UniformSpec {
    pub fn new(min: f64, max: f64) -> Result<Self, DistributionError> {
        let range = ValueDomain::new(min, max)?;
        let inner = backend::Uniform::new(min, max).map_err(|e| rejected("uniform", e))?;
        Ok(Self { range, inner })
    }

    pub fn min(&self) -> f64 {
        self.range.min()
    }

    pub fn max(&self) -> f64 {
        self.range.max()
    }
}

/// Weighted choice among a fixed set of values.
///
/// Weights are normalized to sum to 1 at construction.
#[derive(Clone, Debug)]
pub struct DiscreteSpec {
    values: Vec<Scalar>,
    weights: Vec<f64>,
    index: WeightedIndex<f64>,
}

impl DiscreteSpec {
    pub fn new(values: Vec<Scalar>, weights: Vec<f64>) -> Result<Self, DistributionError> {
        if values.is_empty() {
            return Err(DistributionError::EmptyValues);
        }
        if values.len() != weights.len() {
            return Err(DistributionError::LengthMismatch {
                values: values.len(),
                weights: weights.len(),
            });
        }
        for (index, &weight) in weights.iter().enumerate() {
            if !(0.0..=1.0).contains(&weight) {
                return Err(DistributionError::WeightOutOfRange { index, weight });
            }
        }

        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(DistributionError::ZeroWeightSum);
        }
        let weights: Vec<f64> = weights.iter().map(|w| w / total).collect();
        let index = WeightedIndex::new(&weights).map_err(|e| rejected("discrete", e))?;

        Ok(Self {
            values,
            weights,
            index,
        })
    }

    pub fn values(&self) -> &[Scalar] {
        &self.values
    }

    /// Normalized weights (sum to 1).
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

impl PartialEq for DiscreteSpec {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values && self.weights == other.weights
    }
}

/// Exponential anchored at `min` with scale `(max - min) / 3`, capped at `max`.
#[derive(Clone, Debug, PartialEq)]
pub struct ExponentialSpec {
    range: ValueDomain,
    inner: backend::Exp,
}

impl ExponentialSpec {
    pub fn new(min: f64, max: f64) -> Result<Self, DistributionError> {
        let range = ValueDomain::new(min, max)?;
        let scale = range.width() / 3.0;
        let inner = backend::Exp::new(1.0 / scale).map_err(|e| rejected("exponential", e))?;
        Ok(Self { range, inner })
    }

    pub fn min(&self) -> f64 {
        self.range.min()
    }

    pub fn max(&self) -> f64 {
        self.range.max()
    }

    pub fn scale(&self) -> f64 {
        self.range.width() / 3.0
    }
}

/// Triangular over `[min, max]` peaking at `mode`.
#[derive(Clone, Debug, PartialEq)]
pub struct TriangularSpec {
    range: ValueDomain,
    mode: f64,
    inner: backend::Triangular,
}

impl TriangularSpec {
    pub fn new(min: f64, max: f64, mode: f64) -> Result<Self, DistributionError> {
        let range = ValueDomain::new(min, max)?;
        let mode = ensure_finite("mode", mode)?;
        if !range.contains(mode) {
            return Err(DistributionError::ModeOutOfRange { mode, min, max });
        }
        let inner =
            backend::Triangular::new(min, max, mode).map_err(|e| rejected("triangular", e))?;
        Ok(Self { range, mode, inner })
    }

    pub fn min(&self) -> f64 {
        self.range.min()
    }

    pub fn max(&self) -> f64 {
        self.range.max()
    }

    pub fn mode(&self) -> f64 {
        self.mode
    }
}

/// Base value perturbed by uniform noise, clamped into a domain.
///
/// Without an explicit variance the half-width comes from the sampler's
/// global variation factor.
#[derive(Clone, Debug, PartialEq)]
pub struct VarianceSpec {
    base: f64,
    variance: Option<f64>,
    domain: ValueDomain,
}

impl VarianceSpec {
    pub fn new(
        base: f64,
        variance: Option<f64>,
        domain: ValueDomain,
    ) -> Result<Self, DistributionError> {
        let base = ensure_finite("base", base)?;
        if let Some(variance) = variance {
            ensure_finite("variance", variance)?;
        }
        if !domain.contains(base) {
            return Err(DistributionError::BaseOutOfDomain {
                base,
                min: domain.min(),
                max: domain.max(),
            });
        }
        Ok(Self {
            base,
            variance,
            domain,
        })
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    pub fn variance(&self) -> Option<f64> {
        self.variance
    }

    pub fn domain(&self) -> ValueDomain {
        self.domain
    }
}

fn rejected(kind: &'static str, error: impl std::fmt::Display) -> DistributionError {
    DistributionError::Rejected {
        kind,
        reason: error.to_string(),
    }
}
