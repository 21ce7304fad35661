use thiserror::Error;

use crate::domain::scenario::{Scenario, ScenarioSet};
use crate::services::simulation_settings::SimulationSettings;
use crate::services::simulation_types::{Bottleneck, Impact, ScenarioResult};
use crate::services::step_sampler::StepSampler;
use crate::services::step_simulation::{StepSimulationError, simulate_step};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioSimulationError {
    #[error("scenario {scenario}: {source}")]
    InvalidInput {
        scenario: String,
        #[source]
        source: StepSimulationError,
    },
    #[error("no scenarios to simulate")]
    EmptyScenarioSet,
}

/// Simulates every step of `scenario` in order and folds the step results
/// into running totals. The first invalid step aborts the scenario.
pub fn simulate_scenario<S: StepSampler + ?Sized>(
    scenario: &Scenario,
    settings: &SimulationSettings,
    sampler: &mut S,
) -> Result<ScenarioResult, ScenarioSimulationError> {
    let mut result = ScenarioResult {
        name: scenario.name.clone(),
        total_time_minutes: 0.0,
        total_cost: 0.0,
        bottlenecks: Vec::new(),
        steps: Vec::with_capacity(scenario.steps.len()),
    };

    for step in &scenario.steps {
        let step_result = simulate_step(step, settings, sampler).map_err(|source| {
            ScenarioSimulationError::InvalidInput {
                scenario: scenario.name.clone(),
                source,
            }
        })?;

        result.total_time_minutes += step_result.duration_minutes;
        result.total_cost += step_result.cost;
        if step_result.utilization > settings.bottleneck_threshold {
            let impact = if step_result.utilization > settings.high_impact_threshold {
                Impact::High
            } else {
                Impact::Medium
            };
            result.bottlenecks.push(Bottleneck {
                step_id: step_result.step_id.clone(),
                name: step_result.name.clone(),
                utilization: step_result.utilization,
                wait_time_minutes: step_result.wait_time_minutes,
                impact,
            });
        }
        result.steps.push(step_result);
    }

    Ok(result)
}

/// Simulates each scenario of the set, results follow the input order.
pub fn simulate_scenario_set<S: StepSampler + ?Sized>(
    scenarios: &ScenarioSet,
    settings: &SimulationSettings,
    sampler: &mut S,
) -> Result<Vec<ScenarioResult>, ScenarioSimulationError> {
    if scenarios.is_empty() {
        return Err(ScenarioSimulationError::EmptyScenarioSet);
    }

    scenarios
        .scenarios
        .iter()
        .map(|scenario| simulate_scenario(scenario, settings, sampler))
        .collect()
}
