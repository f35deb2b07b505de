//! Inclusive numeric domains used for bounds and clamping.

use serde::{Deserialize, Serialize};

use super::error::{DistributionError, ensure_finite};

/// Inclusive `[min, max]` interval with `min < max`.
///
/// Used both as the global clamping domain for score-form attributes and as
/// the declared range of an individual attribute. Serialized as a two-element
/// array so config files can write `domain = [0.0, 100.0]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct ValueDomain {
    min: f64,
    max: f64,
}

impl ValueDomain {
    /// The default trait scale: `[0, 10]`.
    pub const UNIT_TEN: ValueDomain = ValueDomain {
        min: 0.0,
        max: 10.0,
    };

    pub fn new(min: f64, max: f64) -> Result<Self, DistributionError> {
        let min = ensure_finite("min", min)?;
        let max = ensure_finite("max", max)?;
        if min >= max {
            return Err(DistributionError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Forces a value into the domain.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Returns true if `other` lies entirely inside this domain.
    pub fn encloses(&self, other: &ValueDomain) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }
}

impl Default for ValueDomain {
    fn default() -> Self {
        Self::UNIT_TEN
    }
}

impl TryFrom<[f64; 2]> for ValueDomain {
    type Error = DistributionError;

    fn try_from([min, max]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(min, max)
    }
}

impl From<ValueDomain> for [f64; 2] {
    fn from(domain: ValueDomain) -> Self {
        [domain.min, domain.max]
    }
}
