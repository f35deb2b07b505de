//! Snapshot layout and per-iteration snapshots.

use serde::Serialize;

use crate::profile::Scalar;

/// How a slot's observed values are reduced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    /// Every draw is a number: mean, median, spread.
    Numeric,
    /// Draws are labels: frequency table.
    Categorical,
    /// Never varies: reported as-is.
    Fixed,
}

/// One (archetype, attribute) position in every snapshot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Slot {
    pub archetype: String,
    pub attribute: String,
    pub kind: AttributeKind,
}

/// Ordered slots shared by every snapshot of a run.
///
/// Archetypes appear in profile order and attributes in declaration order,
/// after the environment filter.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SnapshotLayout {
    slots: Vec<Slot>,
}

impl SnapshotLayout {
    pub fn new(slots: Vec<Slot>) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Values sampled in a single iteration, one per layout slot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IterationSnapshot {
    index: u64,
    values: Vec<Scalar>,
}

impl IterationSnapshot {
    pub fn new(index: u64, values: Vec<Scalar>) -> Self {
        Self { index, values }
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn values(&self) -> &[Scalar] {
        &self.values
    }

    pub fn value(&self, slot: usize) -> Option<&Scalar> {
        self.values.get(slot)
    }
}
