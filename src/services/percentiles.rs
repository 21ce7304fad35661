//! Nearest-rank percentile helpers for already-sorted slices.
//!
//! - Empty input => `None` (or `0.0` for the f64 convenience wrapper).
//! - `percentile <= 0` => first element.
//! - `percentile >= 100` => last element.
//! - Otherwise the position within `[0, len-1]` is rounded to the nearest index.

use crate::services::simulation_types::PercentileSummary;

pub fn value_sorted<T: Copy>(sorted_values: &[T], percentile: f64) -> Option<T> {
    if sorted_values.is_empty() {
        return None;
    }

    let index = if percentile <= 0.0 {
        0
    } else if percentile >= 100.0 {
        sorted_values.len() - 1
    } else {
        let position = (percentile / 100.0) * (sorted_values.len() as f64 - 1.0);
        position.round() as usize
    };

    sorted_values.get(index).copied()
}

pub fn value_f64_sorted(sorted_values: &[f64], percentile: f64) -> f64 {
    value_sorted(sorted_values, percentile).unwrap_or(0.0)
}

/// Sorts a copy of `values` and reads P0, P50, P85 and P100 from it.
pub fn summarize(values: &[f64]) -> PercentileSummary {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    PercentileSummary {
        p0: value_f64_sorted(&sorted, 0.0),
        p50: value_f64_sorted(&sorted, 50.0),
        p85: value_f64_sorted(&sorted, 85.0),
        p100: value_f64_sorted(&sorted, 100.0),
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
