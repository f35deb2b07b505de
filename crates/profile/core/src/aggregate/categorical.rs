//! Frequency counter.

use std::collections::BTreeMap;

/// Fraction of observations per label. Labels never observed are absent.
pub(crate) fn frequencies<I, S>(labels: I) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut total = 0u64;
    for label in labels {
        *counts.entry(label.into()).or_default() += 1;
        total += 1;
    }

    counts
        .into_iter()
        .map(|(label, count)| (label, count as f64 / total as f64))
        .collect()
}
