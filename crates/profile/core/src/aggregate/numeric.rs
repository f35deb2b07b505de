//! Numeric reducer.

use statrs::statistics::{Data, Median, Statistics};

use crate::result::NumericStat;

/// Mean, median, extremes and population standard deviation.
///
/// Returns `None` for an empty input.
pub(crate) fn reduce_numeric(values: Vec<f64>) -> Option<NumericStat> {
    if values.is_empty() {
        return None;
    }

    let mean = Statistics::mean(values.iter());
    let min = Statistics::min(values.iter());
    let max = Statistics::max(values.iter());
    let std_dev = Statistics::population_std_dev(values.iter());
    let median = Data::new(values).median();

    Some(NumericStat {
        mean,
        median,
        min,
        max,
        std_dev,
    })
}
