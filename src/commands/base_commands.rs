use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::domain::step::SkillLevel;

pub const DEFAULT_DATABASE: &str = "procsim.db";

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Simulate all scenarios once and store the run
    Simulate {
        /// Scenario file (JSON or YAML)
        #[arg(short, long, required_unless_present = "from_store")]
        input: Option<String>,
        /// Process the run belongs to
        #[arg(short, long)]
        process: String,
        /// Optional JSON file for the scenario results
        #[arg(short, long)]
        output: Option<String>,
        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
        /// Optional simulation settings YAML
        #[arg(long)]
        settings: Option<String>,
        /// SQLite database file
        #[arg(short, long, default_value = DEFAULT_DATABASE)]
        database: String,
        /// Use the step configuration stored for the process instead of a file
        #[arg(long, conflicts_with = "input")]
        from_store: bool,
        /// Do not store the run
        #[arg(long, conflicts_with = "from_store")]
        no_store: bool,
    },
    /// Simulate all scenarios many times and summarize the spread
    SimulateN {
        /// Scenario file (JSON or YAML)
        #[arg(short, long)]
        input: String,
        /// Number of simulation iterations
        #[arg(short = 'n', long, default_value_t = 1000)]
        iterations: usize,
        /// Optional YAML file for the report
        #[arg(short, long)]
        output: Option<String>,
        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
        /// Optional simulation settings YAML
        #[arg(long)]
        settings: Option<String>,
        /// Scenario whose total time histogram is written next to the report
        #[arg(long, requires = "output")]
        histogram_scenario: Option<String>,
    },
    /// Create or overwrite the configuration of one step
    ConfigureStep {
        /// Process the step belongs to
        #[arg(short, long)]
        process: String,
        /// Scenario name, e.g. current, optimized or future
        #[arg(short, long)]
        scenario: String,
        /// Diagram element id of the task
        #[arg(long)]
        id: String,
        /// Display name of the step
        #[arg(long)]
        name: String,
        /// Base duration in minutes
        #[arg(long, allow_negative_numbers = true)]
        duration: f64,
        /// Number of people or machines working on the step
        #[arg(long, default_value_t = 1)]
        resources: u32,
        /// Hourly rate per resource
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        hourly_rate: f64,
        /// Complexity factor applied to the base duration
        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        complexity: f64,
        /// beginner, intermediate, expert or specialist
        #[arg(long, default_value_t = SkillLevel::Intermediate)]
        skill_level: SkillLevel,
        /// Free text equipment note
        #[arg(long)]
        equipment: Option<String>,
        /// SQLite database file
        #[arg(short, long, default_value = DEFAULT_DATABASE)]
        database: String,
    },
    /// Write the stored step configuration of a process as a scenario file
    ExportScenarios {
        /// Process to export
        #[arg(short, long)]
        process: String,
        /// Output file (.json, .yaml or .yml)
        #[arg(short, long)]
        output: String,
        /// SQLite database file
        #[arg(short, long, default_value = DEFAULT_DATABASE)]
        database: String,
    },
    /// List the stored simulation runs of a process
    ListRuns {
        /// Process whose runs are listed
        #[arg(short, long)]
        process: String,
        /// SQLite database file
        #[arg(short, long, default_value = DEFAULT_DATABASE)]
        database: String,
    },
    /// Show one stored simulation run
    ShowRun {
        /// Run id as printed by simulate or list-runs
        #[arg(long)]
        id: String,
        /// SQLite database file
        #[arg(short, long, default_value = DEFAULT_DATABASE)]
        database: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
