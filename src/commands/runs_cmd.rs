use std::process::ExitCode;

use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_scenario_results;
use crate::services::run_store::{RunId, RunStore, StoredRun};
use crate::services::sqlite_store::SqliteStore;

pub fn list_runs_command(cmd: Commands) -> ExitCode {
    let Commands::ListRuns { process, database } = cmd else {
        return ExitCode::FAILURE;
    };

    let store = match SqliteStore::open(&database) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to open database {database}: {e}");
            return ExitCode::FAILURE;
        }
    };
    let runs = match store.list_runs(&process) {
        Ok(runs) => runs,
        Err(e) => {
            eprintln!("Failed to list runs: {e}");
            return ExitCode::FAILURE;
        }
    };

    if runs.is_empty() {
        println!("No simulation runs for process {process}");
        return ExitCode::SUCCESS;
    }
    println!("Run | Created at | Scenarios");
    println!("----|------------|----------");
    for run in &runs {
        println!("{}", format_run_row(run));
    }
    ExitCode::SUCCESS
}

pub fn show_run_command(cmd: Commands) -> ExitCode {
    let Commands::ShowRun { id, database } = cmd else {
        return ExitCode::FAILURE;
    };

    let store = match SqliteStore::open(&database) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to open database {database}: {e}");
            return ExitCode::FAILURE;
        }
    };
    let run = match store.load_run(&RunId(id)).and_then(|stored| stored.decode()) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("Failed to load run: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("Run {} of process {}", run.id, run.process_id);
    println!("Created at {}", run.created_at.to_rfc3339());
    println!("{}", format_scenario_results(&run.results));
    ExitCode::SUCCESS
}

fn format_run_row(run: &StoredRun) -> String {
    let scenarios = match run.decode() {
        Ok(decoded) => decoded
            .results
            .iter()
            .map(|result| result.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        Err(e) => {
            log::warn!("run {} could not be decoded: {e}", run.id);
            "?".to_string()
        }
    };
    format!(
        "{} | {} | {}",
        run.id,
        run.record.created_at.to_rfc3339(),
        scenarios
    )
}
