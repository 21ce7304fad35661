use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    High,
    Medium,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StepResult {
    pub step_id: String,
    pub name: String,
    #[serde(rename = "duration")]
    pub duration_minutes: f64,
    pub cost: f64,
    pub utilization: f64,
    #[serde(rename = "waitTime")]
    pub wait_time_minutes: f64,
    #[serde(rename = "efficiency")]
    pub efficiency_percent: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bottleneck {
    pub step_id: String,
    pub name: String,
    pub utilization: f64,
    #[serde(rename = "waitTime")]
    pub wait_time_minutes: f64,
    pub impact: Impact,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub name: String,
    #[serde(rename = "totalTime")]
    pub total_time_minutes: f64,
    pub total_cost: f64,
    pub bottlenecks: Vec<Bottleneck>,
    pub steps: Vec<StepResult>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PercentileSummary {
    pub p0: f64,
    pub p50: f64,
    pub p85: f64,
    pub p100: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioDistribution {
    pub name: String,
    pub mean_time_minutes: f64,
    pub mean_cost: f64,
    pub time_minutes: PercentileSummary,
    pub cost: PercentileSummary,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RepeatedSimulationReport {
    pub data_source: String,
    pub iterations: usize,
    pub scenarios: Vec<ScenarioDistribution>,
}

/// Report plus the raw per-iteration total times, keyed by scenario name in
/// input order.
#[derive(Debug, Clone)]
pub struct RepeatedSimulationOutput {
    pub report: RepeatedSimulationReport,
    pub total_times: Vec<(String, Vec<f64>)>,
}

impl RepeatedSimulationOutput {
    pub fn total_times_of(&self, scenario: &str) -> Option<&[f64]> {
        self.total_times
            .iter()
            .find(|(name, _)| name == scenario)
            .map(|(_, values)| values.as_slice())
    }
}
