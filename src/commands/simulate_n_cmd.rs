use std::process::ExitCode;

use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_repeated_report;
use crate::services::repeated_simulation::{HistogramRequest, simulate_n_from_scenario_file};
use crate::services::simulation_settings::SimulationSettings;
use crate::services::step_sampler::sampler_from_seed;

pub fn simulate_n_command(cmd: Commands) -> ExitCode {
    let Commands::SimulateN {
        input,
        iterations,
        output,
        seed,
        settings,
        histogram_scenario,
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

    let histogram_path = output.as_ref().map(|output| format!("{output}.png"));
    let histogram = match (&histogram_scenario, &histogram_path) {
        (Some(scenario), Some(path)) => Some(HistogramRequest { scenario, path }),
        _ => None,
    };

    let mut sampler = sampler_from_seed(seed, &settings);
    let report =
        match simulate_n_from_scenario_file(&input, iterations, &settings, &mut sampler, histogram)
        {
            Ok(report) => report,
            Err(e) => {
                eprintln!("Failed to simulate scenarios: {e}");
                return ExitCode::FAILURE;
            }
        };

    println!("{}", format_repeated_report(&report));

    if let Some(output) = output {
        let yaml = match serde_yaml::to_string(&report) {
            Ok(contents) => contents,
            Err(e) => {
                eprintln!("Failed to serialize simulation report: {e}");
                return ExitCode::FAILURE;
            }
        };
        if let Err(e) = std::fs::write(&output, yaml) {
            eprintln!("Failed to write simulation report: {e}");
            return ExitCode::FAILURE;
        }
        println!("Simulation report for {iterations} iterations written to {output}");
        if let (Some(_), Some(path)) = (histogram_scenario, histogram_path) {
            println!("Simulation histogram written to {path}");
        }
    }
    ExitCode::SUCCESS
}
