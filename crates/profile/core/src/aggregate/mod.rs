//! Aggregator: reduces snapshots into per-attribute statistics.
//!
//! The aggregator only reads a [`SimulationRun`]. Each slot is reduced
//! according to the [`AttributeKind`] decided at plan time:
//!
//! - `Fixed` reports the value of the first snapshot.
//! - `Numeric` goes through the numeric reducer.
//! - `Categorical` goes through the frequency counter.
//!
//! A numeric slot that nonetheless recorded a non-numeric value is reduced as
//! categorical.

mod categorical;
mod numeric;

use tracing::debug;

use crate::engine::{AttributeKind, SimulationRun};
use crate::profile::Scalar;
use crate::result::{AggregateStat, ArchetypeStats, AttributeStats, SimulationResult};
use categorical::frequencies;
use numeric::reduce_numeric;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AggregationError {
    #[error("no snapshots to aggregate")]
    NoSnapshots,
}

/// Reduces every slot of `run` and assembles the result.
pub fn aggregate(run: &SimulationRun) -> Result<SimulationResult, AggregationError> {
    let first = run.snapshots.first().ok_or(AggregationError::NoSnapshots)?;

    let mut archetypes: Vec<ArchetypeStats> = Vec::new();
    for (index, slot) in run.layout.slots().iter().enumerate() {
        let stat = match slot.kind {
            AttributeKind::Fixed => AggregateStat::Fixed {
                value: first.value(index).cloned().ok_or(AggregationError::NoSnapshots)?,
            },
            AttributeKind::Numeric => reduce_slot(run, index),
            AttributeKind::Categorical => categorical_stat(run, index),
        };

        let attribute = AttributeStats {
            name: slot.attribute.clone(),
            stat,
        };
        // Slots of one archetype are contiguous in the layout.
        match archetypes.last_mut() {
            Some(last) if last.name == slot.archetype => last.attributes.push(attribute),
            _ => archetypes.push(ArchetypeStats {
                name: slot.archetype.clone(),
                attributes: vec![attribute],
            }),
        }
    }

    debug!(
        target: "tanzo::aggregate",
        archetypes = archetypes.len(),
        slots = run.layout.len(),
        snapshots = run.snapshots.len(),
        "aggregated run"
    );

    Ok(SimulationResult {
        profile_name: run.identity.name.clone(),
        profile_version: run.identity.version.clone(),
        iterations: run.snapshots.len() as u64,
        seed: run.seed,
        environment: run.environment.clone(),
        archetypes,
        typologies: Default::default(),
        summary: None,
    })
}

fn reduce_slot(run: &SimulationRun, index: usize) -> AggregateStat {
    let numbers: Option<Vec<f64>> = run.column(index).map(Scalar::as_number).collect();

    match numbers.and_then(reduce_numeric) {
        Some(stat) => AggregateStat::Numeric(stat),
        None => categorical_stat(run, index),
    }
}

fn categorical_stat(run: &SimulationRun, index: usize) -> AggregateStat {
    AggregateStat::Categorical {
        frequencies: frequencies(run.column(index).map(ToString::to_string)),
    }
}
