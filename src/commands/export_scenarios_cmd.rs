use std::process::ExitCode;

use crate::commands::base_commands::Commands;
use crate::services::run_store::StepConfigStore;
use crate::services::scenario_file::write_scenario_set_file;
use crate::services::sqlite_store::SqliteStore;

pub fn export_scenarios_command(cmd: Commands) -> ExitCode {
    let Commands::ExportScenarios {
        process,
        output,
        database,
    } = cmd
    else {
        return ExitCode::FAILURE;
    };

    let store = match SqliteStore::open(&database) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to open database {database}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let scenarios = match store.load_scenario_set(&process) {
        Ok(scenarios) => scenarios,
        Err(e) => {
            eprintln!("Failed to load stored scenarios: {e}");
            return ExitCode::FAILURE;
        }
    };
    if scenarios.is_empty() {
        eprintln!("No stored step configuration for process {process}");
        return ExitCode::FAILURE;
    }

    if let Err(e) = write_scenario_set_file(&output, &scenarios) {
        eprintln!("Failed to write scenario file: {e}");
        return ExitCode::FAILURE;
    }
    println!(
        "Scenarios {} of process {process} written to {output}",
        scenarios.names().join(", ")
    );
    ExitCode::SUCCESS
}
