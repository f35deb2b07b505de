//! Monte Carlo simulation core for Tanzo archetype profiles.
//!
//! `tanzo-core` takes an already validated [`Profile`] and a
//! [`SimulationConfig`], draws many independent realizations of every
//! probabilistic attribute, and reduces them into a [`SimulationResult`].
//! Loading documents, structural validation and export live in
//! `tanzo-content`; this crate only sees typed values.
//!
//! The pipeline is split by responsibility:
//! - [`profile`] holds the data model (archetypes, attributes, value specs)
//! - [`distribution`] holds the validated distribution sum type, the
//!   [`Sampler`] and the variance applicator
//! - [`engine`] resolves a sampling plan and produces one
//!   [`IterationSnapshot`] per iteration
//! - [`aggregate`] reduces snapshots into per-attribute statistics
//! - [`result`] is the output contract handed to exporters and the CLI
pub mod aggregate;
pub mod config;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod profile;
pub mod result;

pub use aggregate::{AggregationError, aggregate};
pub use config::{ConfigurationError, SimulationConfig, parse_seed};
pub use distribution::{
    Distribution, DistributionError, Sampler, ValueDomain, apply_variance,
};
pub use engine::{
    AttributeKind, IterationSnapshot, PlanError, RngSource, SeededStreams, SimulationEngine, SimulationRun,
    Slot, SnapshotLayout, compute_stream_seed, run,
};
pub use error::SimulationError;
pub use profile::{
    Archetype, Attribute, DistributionKind, Profile, ProfileIdentity, Scalar, TraitScore, Typologies,
    Typology, ValueSpec,
};
pub use result::{AggregateStat, ArchetypeStats, AttributeStats, NumericStat, SimulationResult};

/// Runs a complete simulation: plan, sample, aggregate, and (optionally)
/// render the text summary.
///
/// This is the single entry point used by the CLI.
pub fn simulate(
    profile: &Profile,
    config: &SimulationConfig,
) -> Result<SimulationResult, SimulationError> {
    let run = engine::run(profile, config)?;
    let result = aggregate::aggregate(&run)?.with_typologies(profile.typologies.clone());

    Ok(if config.summary {
        result.with_summary()
    } else {
        result
    })
}
