//! Serde representation of a profile document.
//!
//! These types mirror the on-disk YAML/JSON layout one to one and carry no
//! validation. Use [`ProfileDocument::into_profile`] (see
//! [`crate::validate`]) to obtain a typed core [`tanzo_core::Profile`].
//!
//! ```yaml
//! version: "1.0.0"
//! profile:
//!   name: Kai
//!   archetypes:
//!     - type: creator
//!       name: Maker
//!       weight: 0.6
//!       environments: [work]
//!       attributes:
//!         - name: power
//!           value: { distribution: normal, mean: 5, std_dev: 1 }
//!         - name: focus
//!           value: { base: 7, range: [5, 9], distribution: triangular }
//!         - name: label
//!           value: X
//!   typologies:
//!     zodiac: { sun: Virgo, moon: Capricorn, rising: Scorpio }
//!   simulation:
//!     iterations: 500
//!     seed: 42
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tanzo_core::{Scalar, SimulationConfig, TraitScore, ValueDomain};

/// Top-level document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileDocument {
    /// Schema version, `MAJOR.MINOR.PATCH`.
    pub version: String,
    pub profile: ProfileBody,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileBody {
    pub name: String,
    #[serde(default)]
    pub archetypes: Vec<ArchetypeDocument>,
    /// Typology systems; `null` fields are treated as absent.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub typologies: BTreeMap<String, TypologyDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation: Option<SimulationSettings>,
}

pub type TypologyDocument = BTreeMap<String, Option<Scalar>>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeDocument {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environments: Vec<String>,
    #[serde(default)]
    pub attributes: Vec<AttributeDocument>,
}

impl ArchetypeDocument {
    /// Name, falling back to the type tag.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or(self.kind.as_deref())
            .filter(|n| !n.trim().is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttributeDocument {
    pub name: String,
    pub value: ValueDocument,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Attribute value as written in a document.
///
/// Tried in order: explicit distribution (tagged by `distribution` and
/// carrying its own parameters), score form (`base` plus optional range,
/// kind and variance), then a plain scalar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueDocument {
    Distribution(DistributionDocument),
    Score(TraitScore),
    Fixed(Scalar),
}

/// Explicit distribution parameters, unvalidated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "distribution", rename_all = "lowercase")]
pub enum DistributionDocument {
    Normal {
        mean: f64,
        std_dev: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bounds: Option<(f64, f64)>,
    },
    Uniform {
        min: f64,
        max: f64,
    },
    Discrete {
        values: Vec<Scalar>,
        weights: Vec<f64>,
    },
    Exponential {
        min: f64,
        max: f64,
    },
    Triangular {
        min: f64,
        max: f64,
        mode: f64,
    },
}

/// Partial simulation parameters.
///
/// Used for the `simulation` block of a profile document and for TOML config
/// files. Every field is optional; [`SimulationSettings::apply`] overlays the
/// fields that are set onto an existing [`SimulationConfig`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation_factor: Option<f64>,
    /// Explicit environment filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    /// Environments the profile is meant for. The first one becomes the
    /// filter when `environment` is not set.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub environments: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<ValueDomain>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<bool>,
}

impl SimulationSettings {
    /// Environment filter implied by these settings.
    pub fn environment_filter(&self) -> Option<&str> {
        self.environment
            .as_deref()
            .or_else(|| self.environments.first().map(String::as_str))
    }

    /// Overlays every field that is set onto `config`.
    #[must_use]
    pub fn apply(&self, mut config: SimulationConfig) -> SimulationConfig {
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(factor) = self.variation_factor {
            config.variation_factor = factor;
        }
        if let Some(env) = self.environment_filter() {
            config.environment = Some(env.to_string());
        }
        if let Some(domain) = self.domain {
            config.domain = domain;
        }
        if let Some(max) = self.max_iterations {
            config.max_iterations = max;
        }
        if let Some(parallel) = self.parallel {
            config.parallel = parallel;
        }
        if let Some(summary) = self.summary {
            config.summary = summary;
        }
        config
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
