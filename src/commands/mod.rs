pub mod base_commands;
pub mod configure_step_cmd;
pub mod export_scenarios_cmd;
pub mod report_format;
pub mod runs_cmd;
pub mod simulate_cmd;
pub mod simulate_n_cmd;
