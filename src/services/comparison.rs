use serde::Serialize;

use crate::domain::scenario::CURRENT_SCENARIO;
use crate::services::simulation_types::ScenarioResult;

/// Change of one scenario's totals relative to the baseline scenario, in
/// percent. Negative values are savings. `None` when the baseline total is 0.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ScenarioComparison {
    pub name: String,
    pub baseline: String,
    pub time_change_percent: Option<f64>,
    pub cost_change_percent: Option<f64>,
}

/// Picks `current` as baseline when present, otherwise the first result.
pub fn baseline_of(results: &[ScenarioResult]) -> Option<&ScenarioResult> {
    results
        .iter()
        .find(|result| result.name == CURRENT_SCENARIO)
        .or_else(|| results.first())
}

/// Compares every non-baseline result against the baseline.
pub fn compare_to_baseline(results: &[ScenarioResult]) -> Vec<ScenarioComparison> {
    let Some(baseline) = baseline_of(results) else {
        return Vec::new();
    };

    results
        .iter()
        .filter(|result| result.name != baseline.name)
        .map(|result| ScenarioComparison {
            name: result.name.clone(),
            baseline: baseline.name.clone(),
            time_change_percent: percent_change(
                baseline.total_time_minutes,
                result.total_time_minutes,
            ),
            cost_change_percent: percent_change(baseline.total_cost, result.total_cost),
        })
        .collect()
}

fn percent_change(baseline: f64, value: f64) -> Option<f64> {
    if baseline == 0.0 {
        return None;
    }
    Some((value - baseline) / baseline * 100.0)
}
