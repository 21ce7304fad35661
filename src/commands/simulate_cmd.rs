use std::process::ExitCode;

use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_scenario_results;
use crate::domain::scenario::ScenarioSet;
use crate::services::run_store::StepConfigStore;
use crate::services::scenario_file::load_scenario_set_from_file;
use crate::services::scenario_simulation::simulate_scenario_set;
use crate::services::simulation_runner::{RunPersistence, run_scenarios};
use crate::services::simulation_settings::SimulationSettings;
use crate::services::simulation_types::ScenarioResult;
use crate::services::sqlite_store::SqliteStore;
use crate::services::step_sampler::sampler_from_seed;

pub fn simulate_command(cmd: Commands) -> ExitCode {
    let Commands::Simulate {
        input,
        process,
        output,
        seed,
        settings,
        database,
        from_store,
        no_store,
    } = cmd
    else {
        return ExitCode::FAILURE;
    };

    let settings = match SimulationSettings::load(settings.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load simulation settings: {e}");
            return ExitCode::FAILURE;
        }
    };

    // The database is only touched when reading stored steps or saving the run.
    let mut store = if from_store || !no_store {
        match SqliteStore::open(&database) {
            Ok(store) => Some(store),
            Err(e) if from_store => {
                eprintln!("Failed to open database {database}: {e}");
                return ExitCode::FAILURE;
            }
            Err(e) => {
                log::warn!("failed to open database {database}: {e}");
                eprintln!("Warning: run will not be saved, failed to open database {database}: {e}");
                None
            }
        }
    } else {
        None
    };

    let scenarios = match load_scenarios(input.as_deref(), &process, store.as_ref()) {
        Ok(scenarios) => scenarios,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let mut sampler = sampler_from_seed(seed, &settings);
    let (results, persistence) = match store.as_mut() {
        Some(store) => {
            match run_scenarios(&process, &scenarios, &settings, &mut sampler, store) {
                Ok(outcome) => (outcome.results, Some(outcome.persistence)),
                Err(e) => {
                    eprintln!("Failed to simulate scenarios: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
        None => match simulate_scenario_set(&scenarios, &settings, &mut sampler) {
            Ok(results) => (results, None),
            Err(e) => {
                eprintln!("Failed to simulate scenarios: {e}");
                return ExitCode::FAILURE;
            }
        },
    };

    println!("{}", format_scenario_results(&results));

    if let Some(output) = output {
        if let Err(e) = write_results_json(&output, &results) {
            eprintln!("Failed to write simulation output: {e}");
            return ExitCode::FAILURE;
        }
        println!("Simulation results written to {output}");
    }

    match persistence {
        Some(RunPersistence::Saved(id)) => println!("Simulation run saved with id {id}"),
        Some(RunPersistence::Unsaved { warning }) => {
            eprintln!("Warning: simulation run not saved: {warning}")
        }
        None => {}
    }
    ExitCode::SUCCESS
}

fn load_scenarios<S: StepConfigStore>(
    input: Option<&str>,
    process: &str,
    store: Option<&S>,
) -> Result<ScenarioSet, String> {
    match (input, store) {
        (Some(path), _) => load_scenario_set_from_file(path)
            .map_err(|e| format!("Failed to load scenarios from {path}: {e}")),
        (None, Some(store)) => {
            let scenarios = store
                .load_scenario_set(process)
                .map_err(|e| format!("Failed to load stored scenarios: {e}"))?;
            if scenarios.is_empty() {
                return Err(format!("No stored step configuration for process {process}"));
            }
            Ok(scenarios)
        }
        (None, None) => Err("No scenario input given".to_string()),
    }
}

fn write_results_json(path: &str, results: &[ScenarioResult]) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(results).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}
