use std::process::ExitCode;

use crate::commands::base_commands::Commands;
use crate::domain::step::StepDefinition;
use crate::services::run_store::StepConfigStore;
use crate::services::sqlite_store::SqliteStore;
use crate::services::step_simulation::validate_step;

pub fn configure_step_command(cmd: Commands) -> ExitCode {
    let Commands::ConfigureStep {
        process,
        scenario,
        id,
        name,
        duration,
        resources,
        hourly_rate,
        complexity,
        skill_level,
        equipment,
        database,
    } = cmd
    else {
        return ExitCode::FAILURE;
    };

    if id.trim().is_empty() {
        eprintln!("Failed to save step: step id must not be empty");
        return ExitCode::FAILURE;
    }
    if scenario.trim().is_empty() {
        eprintln!("Failed to save step: scenario name must not be empty");
        return ExitCode::FAILURE;
    }

    let step = StepDefinition {
        base_duration_minutes: duration,
        resource_count: resources,
        hourly_rate,
        complexity_factor: complexity,
        skill_level,
        equipment,
        ..StepDefinition::new(&id, &name)
    };
    if let Err(reason) = validate_step(&step) {
        eprintln!("Failed to save step {id}: {reason}");
        return ExitCode::FAILURE;
    }

    let mut store = match SqliteStore::open(&database) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to open database {database}: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = store.upsert_step(&process, &scenario, &step) {
        eprintln!("Failed to save step: {e}");
        return ExitCode::FAILURE;
    }
    log::info!("configured step {id} of scenario {scenario} for process {process}");
    println!("Step {id} saved for scenario {scenario}");
    ExitCode::SUCCESS
}
