use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use procsim::commands::base_commands::{CliArgs, Commands};
use procsim::commands::configure_step_cmd::configure_step_command;
use procsim::commands::export_scenarios_cmd::export_scenarios_command;
use procsim::commands::runs_cmd::{list_runs_command, show_run_command};
use procsim::commands::simulate_cmd::simulate_command;
use procsim::commands::simulate_n_cmd::simulate_n_command;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = CliArgs::parse();
    match args.command {
        cmd @ Commands::Simulate { .. } => simulate_command(cmd),
        cmd @ Commands::SimulateN { .. } => simulate_n_command(cmd),
        cmd @ Commands::ConfigureStep { .. } => configure_step_command(cmd),
        cmd @ Commands::ExportScenarios { .. } => export_scenarios_command(cmd),
        cmd @ Commands::ListRuns { .. } => list_runs_command(cmd),
        cmd @ Commands::ShowRun { .. } => show_run_command(cmd),
        Commands::Completions { shell } => {
            let mut command = CliArgs::command();
            generate(shell, &mut command, "procsim", &mut std::io::stdout());
            ExitCode::SUCCESS
        }
    }
}
