//! Plan resolution: turns a profile into an ordered list of draw rules.
//!
//! Everything that can fail about a profile fails here, before the first
//! iteration. The resulting [`SamplingPlan`] is immutable and shared by all
//! iterations.

use tracing::{debug, warn};

use super::snapshot::{AttributeKind, Slot, SnapshotLayout};
use crate::config::SimulationConfig;
use crate::distribution::{Distribution, DistributionError, ValueDomain, ensure_finite};
use crate::profile::{Archetype, Attribute, DistributionKind, Profile, Scalar, TraitScore, ValueSpec};

/// A distribution error located at an archetype attribute.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("attribute '{archetype}.{attribute}': {source}")]
pub struct PlanError {
    pub archetype: String,
    pub attribute: String,
    #[source]
    pub source: DistributionError,
}

/// What to record for one slot in every iteration.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum DrawRule {
    Fixed(Scalar),
    Sample(Distribution),
}

#[derive(Clone, Debug)]
pub(crate) struct SamplingPlan {
    pub layout: SnapshotLayout,
    pub rules: Vec<DrawRule>,
}

impl SamplingPlan {
    /// Applies the environment filter and resolves every attribute.
    pub fn resolve(profile: &Profile, config: &SimulationConfig) -> Result<Self, PlanError> {
        let mut slots = Vec::with_capacity(profile.attribute_count());
        let mut rules = Vec::with_capacity(profile.attribute_count());

        let participating = profile.archetypes.iter().filter(|archetype| {
            config
                .environment
                .as_deref()
                .is_none_or(|env| archetype.participates_in(env))
        });

        for archetype in participating {
            for attribute in &archetype.attributes {
                let rule = resolve_attribute(attribute, config).map_err(|source| PlanError {
                    archetype: archetype.display_name().to_string(),
                    attribute: attribute.name.clone(),
                    source,
                })?;

                slots.push(Slot {
                    archetype: archetype.display_name().to_string(),
                    attribute: attribute.name.clone(),
                    kind: rule.kind(),
                });
                rules.push(rule);
            }
        }

        if slots.is_empty() {
            warn!(
                target: "tanzo::engine",
                environment = config.environment.as_deref().unwrap_or("*"),
                archetypes = profile.archetypes.len(),
                "no archetype matches the environment filter; nothing to sample"
            );
        }

        debug!(
            target: "tanzo::engine",
            slots = slots.len(),
            environment = config.environment.as_deref().unwrap_or("*"),
            "resolved sampling plan"
        );

        Ok(Self {
            layout: SnapshotLayout::new(slots),
            rules,
        })
    }

    /// Archetypes excluded by the environment filter.
    pub fn skipped<'a>(profile: &'a Profile, config: &SimulationConfig) -> Vec<&'a Archetype> {
        match config.environment.as_deref() {
            Some(env) => profile
                .archetypes
                .iter()
                .filter(|a| !a.participates_in(env))
                .collect(),
            None => Vec::new(),
        }
    }
}

impl DrawRule {
    fn kind(&self) -> AttributeKind {
        match self {
            Self::Fixed(_) => AttributeKind::Fixed,
            Self::Sample(dist) if dist.is_numeric() => AttributeKind::Numeric,
            Self::Sample(_) => AttributeKind::Categorical,
        }
    }
}

fn resolve_attribute(
    attribute: &Attribute,
    config: &SimulationConfig,
) -> Result<DrawRule, DistributionError> {
    match &attribute.value {
        ValueSpec::Fixed(value) => Ok(DrawRule::Fixed(value.clone())),
        ValueSpec::Distribution(dist) => Ok(DrawRule::Sample(dist.clone())),
        ValueSpec::Score(score) => {
            score.resolve(config.domain, config.variation_factor).map(DrawRule::Sample)
        }
    }
}

/// Resolves the base-plus-range form into a concrete distribution.
pub(crate) fn resolve_score(
    score: &TraitScore,
    domain: ValueDomain,
    variation_factor: f64,
) -> Result<Distribution, DistributionError> {
    let base = ensure_finite("base", score.base)?;
    if let Some(variance) = score.variance {
        ensure_finite("variance", variance)?;
    }
    if !domain.contains(base) {
        return Err(DistributionError::BaseOutOfDomain {
            base,
            min: domain.min(),
            max: domain.max(),
        });
    }

    let range = match (score.range, score.distribution) {
        (Some((min, max)), _) => {
            let range = ValueDomain::new(min, max)?;
            if !domain.encloses(&range) {
                return Err(DistributionError::RangeOutOfDomain {
                    min,
                    max,
                    domain_min: domain.min(),
                    domain_max: domain.max(),
                });
            }
            range
        }
        (None, Some(_)) => {
            let half_width = score
                .variance
                .unwrap_or(variation_factor * domain.width());
            let min = (base - half_width).max(domain.min());
            let max = (base + half_width).min(domain.max());
            match ValueDomain::new(min, max) {
                Ok(range) => range,
                // Zero spread: the value never moves.
                Err(_) => return Distribution::variance_scalar(base, Some(0.0), domain),
            }
        }
        (None, None) => return Distribution::variance_scalar(base, score.variance, domain),
    };

    match score.distribution {
        Some(DistributionKind::Normal) => {
            Distribution::bounded_normal(base, range.width() / 4.0, range)
        }
        Some(DistributionKind::Uniform) => Distribution::uniform(range.min(), range.max()),
        Some(DistributionKind::Exponential) => Distribution::exponential(range.min(), range.max()),
        Some(DistributionKind::Triangular | DistributionKind::Unrecognized) | None => {
            Distribution::triangular(range.min(), range.max(), range.clamp(base))
        }
    }
}
