//! Profile data model: Profile → Archetype → Attribute → ValueSpec.
//!
//! Profiles are produced by the content loaders after structural validation
//! and are treated as immutable by the simulation core. Every explicit
//! [`Distribution`] inside a profile was validated when it was constructed,
//! so the core never sees malformed distribution parameters.

mod scalar;

pub use scalar::Scalar;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::distribution::{Distribution, DistributionError, ValueDomain};

/// Name and version of a profile, carried through to the result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileIdentity {
    pub name: String,
    pub version: String,
}

/// Fields of one typology system, e.g. `sun`, `moon`, `rising` for zodiac.
pub type Typology = BTreeMap<String, Scalar>;

/// Descriptive typology systems keyed by system name (`zodiac`, `kabbalah`,
/// `purpose_quadrant`, or any custom one).
///
/// Typologies are metadata: they are never sampled, only carried into the
/// result.
pub type Typologies = BTreeMap<String, Typology>;

/// A complete archetype profile.
#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    pub name: String,
    pub version: String,
    /// Archetypes in declaration order.
    pub archetypes: Vec<Archetype>,
    pub typologies: Typologies,
}

impl Profile {
    /// Creates an empty profile.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            archetypes: Vec::new(),
            typologies: Typologies::new(),
        }
    }

    /// Appends an archetype (builder pattern).
    #[must_use]
    pub fn with_archetype(mut self, archetype: Archetype) -> Self {
        self.archetypes.push(archetype);
        self
    }

    /// Adds (or replaces) a typology system.
    #[must_use]
    pub fn with_typology<K, V>(
        mut self,
        system: impl Into<String>,
        fields: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<Scalar>,
    {
        let fields = fields
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        self.typologies.insert(system.into(), fields);
        self
    }

    pub fn identity(&self) -> ProfileIdentity {
        ProfileIdentity {
            name: self.name.clone(),
            version: self.version.clone(),
        }
    }

    /// Looks up an archetype by display name.
    pub fn archetype(&self, name: &str) -> Option<&Archetype> {
        self.archetypes.iter().find(|a| a.display_name() == name)
    }

    /// Total number of attributes across all archetypes.
    pub fn attribute_count(&self) -> usize {
        self.archetypes.iter().map(|a| a.attributes.len()).sum()
    }
}

/// A named role/persona inside a profile.
#[derive(Clone, Debug, PartialEq)]
pub struct Archetype {
    /// Optional human name. Falls back to `kind` for display.
    pub name: Option<String>,
    /// Type tag (e.g. "creator", "analyst").
    pub kind: String,
    /// Relative weight in `[0, 1]`, checked by the content validator.
    pub weight: Option<f64>,
    /// Environments this archetype participates in. Empty means all.
    pub environments: Vec<String>,
    /// Attributes in declaration order.
    pub attributes: Vec<Attribute>,
}

impl Archetype {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            name: None,
            kind: kind.into(),
            weight: None,
            environments: Vec::new(),
            attributes: Vec::new(),
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    #[must_use]
    pub fn in_environment(mut self, environment: impl Into<String>) -> Self {
        self.environments.push(environment.into());
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// The name used as the key in snapshots and results.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.kind)
    }

    /// Returns true if this archetype takes part in the given environment.
    pub fn participates_in(&self, environment: &str) -> bool {
        self.environments.is_empty() || self.environments.iter().any(|e| e == environment)
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// A named property of an archetype.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: ValueSpec,
    /// Passthrough metadata, not used by the core.
    pub unit: Option<String>,
    /// Passthrough metadata, not used by the core.
    pub description: Option<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: ValueSpec) -> Self {
        Self {
            name: name.into(),
            value,
            unit: None,
            description: None,
        }
    }

    pub fn fixed(name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::new(name, ValueSpec::Fixed(value.into()))
    }

    pub fn distributed(name: impl Into<String>, distribution: Distribution) -> Self {
        Self::new(name, ValueSpec::Distribution(distribution))
    }

    pub fn scored(name: impl Into<String>, score: TraitScore) -> Self {
        Self::new(name, ValueSpec::Score(score))
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// How an attribute's value is produced on each iteration.
#[derive(Clone, Debug, PartialEq)]
pub enum ValueSpec {
    /// Constant value, identical in every snapshot.
    Fixed(Scalar),
    /// Explicit, already validated distribution.
    Distribution(Distribution),
    /// Base value with optional range, kind and variance. Resolved into a
    /// [`Distribution`] by the engine once the config is known.
    Score(TraitScore),
}

/// Base-plus-spread form of a numeric trait.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraitScore {
    pub base: f64,
    /// Inclusive `[min, max]` bounds.
    #[serde(default)]
    pub range: Option<(f64, f64)>,
    #[serde(default)]
    pub distribution: Option<DistributionKind>,
    /// Half-width of the uniform perturbation applied around `base`.
    #[serde(default)]
    pub variance: Option<f64>,
}

impl TraitScore {
    pub fn new(base: f64) -> Self {
        Self {
            base,
            range: None,
            distribution: None,
            variance: None,
        }
    }

    #[must_use]
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range = Some((min, max));
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: DistributionKind) -> Self {
        self.distribution = Some(kind);
        self
    }

    #[must_use]
    pub fn with_variance(mut self, variance: f64) -> Self {
        self.variance = Some(variance);
        self
    }

    /// The distribution this score is sampled from under `domain` and
    /// `variation_factor`. Fails on the same inputs a simulation would.
    pub fn resolve(
        &self,
        domain: ValueDomain,
        variation_factor: f64,
    ) -> Result<Distribution, DistributionError> {
        crate::engine::resolve_score(self, domain, variation_factor)
    }
}

/// Distribution kind named by a [`TraitScore`].
///
/// Unknown names deserialize to `Unrecognized`, which resolves like an absent
/// kind (triangular over the range).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionKind {
    Normal,
    Uniform,
    Exponential,
    Triangular,
    #[serde(other)]
    Unrecognized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_kind() {
        let unnamed = Archetype::new("creator");
        let named = Archetype::new("creator").named("Maker");

        assert_eq!(unnamed.display_name(), "creator");
        assert_eq!(named.display_name(), "Maker");
    }

    #[test]
    fn empty_environment_list_matches_everything() {
        let everywhere = Archetype::new("a");
        let work_only = Archetype::new("b").in_environment("work");

        assert!(everywhere.participates_in("home"));
        assert!(work_only.participates_in("work"));
        assert!(!work_only.participates_in("home"));
    }

    #[test]
    fn unknown_kind_deserializes_as_unrecognized() {
        let kind: DistributionKind = serde_json::from_str("\"lognormal\"").unwrap();
        assert_eq!(kind, DistributionKind::Unrecognized);

        let kind: DistributionKind = serde_json::from_str("\"normal\"").unwrap();
        assert_eq!(kind, DistributionKind::Normal);
    }

    #[test]
    fn profile_counts_attributes() {
        let profile = Profile::new("p", "1.0.0")
            .with_archetype(
                Archetype::new("a")
                    .with_attribute(Attribute::fixed("x", 1.0))
                    .with_attribute(Attribute::fixed("y", "z")),
            )
            .with_archetype(Archetype::new("b").with_attribute(Attribute::fixed("x", 2.0)));

        assert_eq!(profile.attribute_count(), 3);
        assert!(profile.archetype("b").is_some());
        assert!(profile.archetype("c").is_none());
    }
}
