use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};

use crate::domain::scenario::ScenarioSet;
use crate::domain::step::StepDefinition;
use crate::services::run_store::{
    RunId, RunRecord, RunStore, RunStoreError, StepConfigStore, StoredRun,
};
use crate::services::scenario_file::{step_from_json_str, step_to_json_string};

const SCHEMA_SQL: &str = r#"
-- Immutable log of simulation runs.
CREATE TABLE IF NOT EXISTS simulation_runs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    process_id TEXT NOT NULL,
    scenario_input_json TEXT NOT NULL,
    scenario_result_json TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_simulation_runs_process
    ON simulation_runs(process_id, id);

-- One row per step and scenario. The row id keeps first-insert order.
CREATE TABLE IF NOT EXISTS step_configs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    process_id TEXT NOT NULL,
    scenario TEXT NOT NULL,
    step_id TEXT NOT NULL,
    definition_json TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE (process_id, scenario, step_id)
);
"#;

/// SQLite backed run history and step configuration.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and makes sure the schema exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, RunStoreError> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, RunStoreError> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, RunStoreError> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self { conn })
    }
}

impl RunStore for SqliteStore {
    fn save_run(&mut self, record: &RunRecord) -> Result<RunId, RunStoreError> {
        self.conn.execute(
            "INSERT INTO simulation_runs (process_id, scenario_input_json, scenario_result_json, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                record.process_id,
                record.scenario_input_json,
                record.scenario_result_json,
                format_timestamp(&record.created_at),
            ],
        )?;
        Ok(RunId(self.conn.last_insert_rowid().to_string()))
    }

    fn load_run(&self, id: &RunId) -> Result<StoredRun, RunStoreError> {
        let row_id: i64 = id
            .0
            .parse()
            .map_err(|_| RunStoreError::NotFound(id.clone()))?;
        let row = self
            .conn
            .query_row(
                "SELECT id, process_id, scenario_input_json, scenario_result_json, created_at
                 FROM simulation_runs WHERE id = ?1",
                params![row_id],
                read_run_row,
            )
            .optional()?;
        match row {
            Some(row) => stored_run_from_row(row),
            None => Err(RunStoreError::NotFound(id.clone())),
        }
    }

    fn list_runs(&self, process_id: &str) -> Result<Vec<StoredRun>, RunStoreError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, process_id, scenario_input_json, scenario_result_json, created_at
             FROM simulation_runs WHERE process_id = ?1 ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![process_id], read_run_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(stored_run_from_row).collect()
    }
}

impl StepConfigStore for SqliteStore {
    fn upsert_step(
        &mut self,
        process_id: &str,
        scenario: &str,
        step: &StepDefinition,
    ) -> Result<(), RunStoreError> {
        let definition_json = step_to_json_string(step)?;
        self.conn.execute(
            "INSERT INTO step_configs (process_id, scenario, step_id, definition_json, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT (process_id, scenario, step_id) DO UPDATE SET
                definition_json = excluded.definition_json,
                updated_at = excluded.updated_at",
            params![
                process_id,
                scenario,
                step.id,
                definition_json,
                format_timestamp(&Utc::now()),
            ],
        )?;
        Ok(())
    }

    fn load_scenario_set(&self, process_id: &str) -> Result<ScenarioSet, RunStoreError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT scenario, step_id, definition_json
             FROM step_configs WHERE process_id = ?1 ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![process_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut set = ScenarioSet::new();
        for (scenario, step_id, definition_json) in rows {
            let step = step_from_json_str(&step_id, &definition_json)?;
            set.scenario_mut(&scenario).upsert_step(step);
        }
        Ok(set)
    }
}

struct RunRow {
    id: i64,
    process_id: String,
    scenario_input_json: String,
    scenario_result_json: String,
    created_at: String,
}

fn read_run_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RunRow> {
    Ok(RunRow {
        id: row.get(0)?,
        process_id: row.get(1)?,
        scenario_input_json: row.get(2)?,
        scenario_result_json: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn stored_run_from_row(row: RunRow) -> Result<StoredRun, RunStoreError> {
    Ok(StoredRun {
        id: RunId(row.id.to_string()),
        record: RunRecord {
            process_id: row.process_id,
            scenario_input_json: row.scenario_input_json,
            scenario_result_json: row.scenario_result_json,
            created_at: parse_timestamp(&row.created_at)?,
        },
    })
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, RunStoreError> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| RunStoreError::InvalidTimestamp(value.to_string()))
}
