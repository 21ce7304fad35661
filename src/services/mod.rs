pub mod comparison;
pub mod histogram;
pub mod percentiles;
pub mod repeated_simulation;
pub mod run_store;
pub mod scenario_file;
pub mod scenario_simulation;
pub mod simulation_runner;
pub mod simulation_settings;
pub mod simulation_types;
pub mod sqlite_store;
pub mod step_sampler;
pub mod step_simulation;
