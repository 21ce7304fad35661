use thiserror::Error;

use crate::domain::scenario::ScenarioSet;
use crate::services::histogram::{HistogramError, write_histogram_png};
use crate::services::percentiles::{mean, summarize};
use crate::services::scenario_file::{ScenarioFileError, load_scenario_set_from_file};
use crate::services::scenario_simulation::{ScenarioSimulationError, simulate_scenario_set};
use crate::services::simulation_settings::SimulationSettings;
use crate::services::simulation_types::{
    RepeatedSimulationOutput, RepeatedSimulationReport, ScenarioDistribution,
};
use crate::services::step_sampler::StepSampler;

#[derive(Error, Debug)]
pub enum RepeatedSimulationError {
    #[error("failed to load scenarios: {0}")]
    Scenarios(#[from] ScenarioFileError),
    #[error("iterations must be greater than zero")]
    InvalidIterations,
    #[error(transparent)]
    Simulation(#[from] ScenarioSimulationError),
    #[error("unknown scenario: {0}")]
    UnknownScenario(String),
    #[error(transparent)]
    Histogram(#[from] HistogramError),
}

/// Where to write the total time histogram and for which scenario.
pub struct HistogramRequest<'a> {
    pub scenario: &'a str,
    pub path: &'a str,
}

pub fn simulate_n_from_scenario_file<S: StepSampler + ?Sized>(
    input_path: &str,
    iterations: usize,
    settings: &SimulationSettings,
    sampler: &mut S,
    histogram: Option<HistogramRequest<'_>>,
) -> Result<RepeatedSimulationReport, RepeatedSimulationError> {
    let scenarios = load_scenario_set_from_file(input_path)?;
    if let Some(request) = &histogram {
        if scenarios.get(request.scenario).is_none() {
            return Err(RepeatedSimulationError::UnknownScenario(
                request.scenario.to_string(),
            ));
        }
    }

    let mut output = run_repeated_simulation(&scenarios, iterations, settings, sampler)?;
    output.report.data_source = data_source_name(input_path);

    if let Some(request) = histogram {
        let total_times = output
            .total_times_of(request.scenario)
            .ok_or_else(|| RepeatedSimulationError::UnknownScenario(request.scenario.to_string()))?;
        write_histogram_png(request.path, request.scenario, total_times)?;
    }
    Ok(output.report)
}

/// Simulates the whole scenario set `iterations` times and summarizes the
/// spread of total time and total cost per scenario. Nothing is stored.
pub fn run_repeated_simulation<S: StepSampler + ?Sized>(
    scenarios: &ScenarioSet,
    iterations: usize,
    settings: &SimulationSettings,
    sampler: &mut S,
) -> Result<RepeatedSimulationOutput, RepeatedSimulationError> {
    if iterations == 0 {
        return Err(RepeatedSimulationError::InvalidIterations);
    }

    let scenario_count = scenarios.scenarios.len();
    let mut total_times = vec![Vec::with_capacity(iterations); scenario_count];
    let mut total_costs = vec![Vec::with_capacity(iterations); scenario_count];

    for _ in 0..iterations {
        let results = simulate_scenario_set(scenarios, settings, sampler)?;
        for (index, result) in results.iter().enumerate() {
            total_times[index].push(result.total_time_minutes);
            total_costs[index].push(result.total_cost);
        }
    }

    let distributions = scenarios
        .scenarios
        .iter()
        .zip(total_times.iter().zip(total_costs.iter()))
        .map(|(scenario, (times, costs))| ScenarioDistribution {
            name: scenario.name.clone(),
            mean_time_minutes: mean(times),
            mean_cost: mean(costs),
            time_minutes: summarize(times),
            cost: summarize(costs),
        })
        .collect();

    Ok(RepeatedSimulationOutput {
        report: RepeatedSimulationReport {
            data_source: String::new(),
            iterations,
            scenarios: distributions,
        },
        total_times: scenarios
            .scenarios
            .iter()
            .map(|scenario| scenario.name.clone())
            .zip(total_times)
            .collect(),
    })
}

fn data_source_name(path: &str) -> String {
    std::path::Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_string()
}
