use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::scenario::ScenarioSet;
use crate::domain::step::StepDefinition;
use crate::services::scenario_file::{
    ScenarioFileError, deserialize_scenario_set_from_json_str,
};
use crate::services::simulation_types::ScenarioResult;

#[derive(Error, Debug)]
pub enum RunStoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("failed to encode stored data: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to decode stored scenarios: {0}")]
    DecodeScenarios(#[from] ScenarioFileError),
    #[error("invalid stored timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("run not found: {0}")]
    NotFound(RunId),
    #[error("{0}")]
    Other(String),
}

/// Opaque identifier handed out by a store for a saved run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunId(pub String);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A run as the store sees it: the submitted scenarios and the computed
/// results as JSON text, plus the creation time.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    pub process_id: String,
    pub scenario_input_json: String,
    pub scenario_result_json: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredRun {
    pub id: RunId,
    pub record: RunRecord,
}

/// Decoded form of a stored run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRun {
    pub id: RunId,
    pub process_id: String,
    pub scenarios: ScenarioSet,
    pub results: Vec<ScenarioResult>,
    pub created_at: DateTime<Utc>,
}

impl StoredRun {
    pub fn decode(&self) -> Result<SimulationRun, RunStoreError> {
        Ok(SimulationRun {
            id: self.id.clone(),
            process_id: self.record.process_id.clone(),
            scenarios: deserialize_scenario_set_from_json_str(&self.record.scenario_input_json)?,
            results: serde_json::from_str(&self.record.scenario_result_json)?,
            created_at: self.record.created_at,
        })
    }
}

/// Append-only storage of simulation runs. Runs are never updated or deleted.
pub trait RunStore {
    fn save_run(&mut self, record: &RunRecord) -> Result<RunId, RunStoreError>;
    fn load_run(&self, id: &RunId) -> Result<StoredRun, RunStoreError>;
    /// Runs of one process, oldest first.
    fn list_runs(&self, process_id: &str) -> Result<Vec<StoredRun>, RunStoreError>;
}

/// Per-process step configuration, one entry per (scenario, step id).
/// Saving an existing entry overwrites it in place (last write wins).
pub trait StepConfigStore {
    fn upsert_step(
        &mut self,
        process_id: &str,
        scenario: &str,
        step: &StepDefinition,
    ) -> Result<(), RunStoreError>;
    fn load_scenario_set(&self, process_id: &str) -> Result<ScenarioSet, RunStoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    runs: Vec<StoredRun>,
    configs: Vec<(String, ScenarioSet)>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run_count(&self) -> usize {
        self.runs.len()
    }
}

impl RunStore for InMemoryStore {
    fn save_run(&mut self, record: &RunRecord) -> Result<RunId, RunStoreError> {
        let id = RunId((self.runs.len() + 1).to_string());
        self.runs.push(StoredRun {
            id: id.clone(),
            record: record.clone(),
        });
        Ok(id)
    }

    fn load_run(&self, id: &RunId) -> Result<StoredRun, RunStoreError> {
        self.runs
            .iter()
            .find(|run| run.id == *id)
            .cloned()
            .ok_or_else(|| RunStoreError::NotFound(id.clone()))
    }

    fn list_runs(&self, process_id: &str) -> Result<Vec<StoredRun>, RunStoreError> {
        Ok(self
            .runs
            .iter()
            .filter(|run| run.record.process_id == process_id)
            .cloned()
            .collect())
    }
}

impl StepConfigStore for InMemoryStore {
    fn upsert_step(
        &mut self,
        process_id: &str,
        scenario: &str,
        step: &StepDefinition,
    ) -> Result<(), RunStoreError> {
        let position = match self.configs.iter().position(|(id, _)| id == process_id) {
            Some(position) => position,
            None => {
                self.configs.push((process_id.to_string(), ScenarioSet::new()));
                self.configs.len() - 1
            }
        };
        self.configs[position]
            .1
            .scenario_mut(scenario)
            .upsert_step(step.clone());
        Ok(())
    }

    fn load_scenario_set(&self, process_id: &str) -> Result<ScenarioSet, RunStoreError> {
        Ok(self
            .configs
            .iter()
            .find(|(id, _)| id == process_id)
            .map(|(_, set)| set.clone())
            .unwrap_or_default())
    }
}
