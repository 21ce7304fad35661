use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::scenario::ScenarioSet;
use crate::services::run_store::{RunId, RunRecord, RunStore};
use crate::services::scenario_file::scenario_set_to_json_string;
use crate::services::scenario_simulation::{ScenarioSimulationError, simulate_scenario_set};
use crate::services::simulation_settings::SimulationSettings;
use crate::services::simulation_types::ScenarioResult;
use crate::services::step_sampler::StepSampler;

#[derive(Error, Debug)]
pub enum SimulationRunError {
    #[error(transparent)]
    Simulation(#[from] ScenarioSimulationError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunPersistence {
    Saved(RunId),
    /// The results were computed but could not be stored.
    Unsaved { warning: String },
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub results: Vec<ScenarioResult>,
    pub persistence: RunPersistence,
    pub created_at: DateTime<Utc>,
}

impl RunOutcome {
    pub fn run_id(&self) -> Option<&RunId> {
        match &self.persistence {
            RunPersistence::Saved(id) => Some(id),
            RunPersistence::Unsaved { .. } => None,
        }
    }

    pub fn warning(&self) -> Option<&str> {
        match &self.persistence {
            RunPersistence::Saved(_) => None,
            RunPersistence::Unsaved { warning } => Some(warning),
        }
    }
}

/// Simulates every scenario of the set and records the run.
///
/// Invalid input fails the whole run before anything is stored. A storage
/// failure does not: the results are returned with an unsaved marker.
pub fn run_scenarios<S, R>(
    process_id: &str,
    scenarios: &ScenarioSet,
    settings: &SimulationSettings,
    sampler: &mut S,
    store: &mut R,
) -> Result<RunOutcome, SimulationRunError>
where
    S: StepSampler + ?Sized,
    R: RunStore + ?Sized,
{
    let results = simulate_scenario_set(scenarios, settings, sampler)?;
    let created_at = Utc::now();
    log::info!(
        "simulated {} scenario(s) for process {process_id}",
        results.len()
    );

    let persistence = match persist_run(process_id, scenarios, &results, created_at, store) {
        Ok(id) => {
            log::info!("saved simulation run {id} for process {process_id}");
            RunPersistence::Saved(id)
        }
        Err(warning) => {
            log::warn!("simulation run for process {process_id} not saved: {warning}");
            RunPersistence::Unsaved { warning }
        }
    };

    Ok(RunOutcome {
        results,
        persistence,
        created_at,
    })
}

fn persist_run<R: RunStore + ?Sized>(
    process_id: &str,
    scenarios: &ScenarioSet,
    results: &[ScenarioResult],
    created_at: DateTime<Utc>,
    store: &mut R,
) -> Result<RunId, String> {
    let scenario_input_json =
        scenario_set_to_json_string(scenarios).map_err(|e| format!("failed to encode scenarios: {e}"))?;
    let scenario_result_json =
        serde_json::to_string(results).map_err(|e| format!("failed to encode results: {e}"))?;
    let record = RunRecord {
        process_id: process_id.to_string(),
        scenario_input_json,
        scenario_result_json,
        created_at,
    };
    store.save_run(&record).map_err(|e| e.to_string())
}
