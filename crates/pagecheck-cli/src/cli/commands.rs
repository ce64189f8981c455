use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::validation::{parse_base_url, parse_timeout_ms};

/// Available pagecheck subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run verification scenarios
    ///
    /// Each scenario gets a fresh browser. Scenarios run one after another
    /// and a failing scenario does not stop the ones after it.
    Run(RunArgs),

    /// List available scenarios
    List(ListArgs),
}

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Scenarios to run, by name
    ///
    /// Examples:
    ///   pagecheck run automaton
    ///   pagecheck run contact-search ui-text
    #[arg(
        value_name = "SCENARIO",
        required_unless_present_any = ["all", "plan"]
    )]
    pub scenarios: Vec<String>,

    /// Run every built-in scenario
    #[arg(long, conflicts_with_all = ["scenarios", "plan"])]
    pub all: bool,

    /// Load scenarios from a plan file (.json or .toml)
    ///
    /// Named scenarios are then looked up in the plan instead of the
    /// built-in set. Without names, every scenario in the plan runs.
    #[arg(long, value_name = "FILE")]
    pub plan: Option<PathBuf>,

    /// Path to config file (default: pagecheck.toml if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Base URL of the application under verification
    #[arg(long, value_name = "URL", value_parser = parse_base_url)]
    pub base_url: Option<String>,

    /// Directory screenshots are written to
    #[arg(short = 'o', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Bound for navigation and readiness waits, in milliseconds
    #[arg(long, value_name = "MS", value_parser = parse_timeout_ms)]
    pub timeout_ms: Option<u64>,

    /// Show the browser window instead of running headless
    #[arg(long)]
    pub visible: bool,

    /// Log browser console messages as they arrive
    #[arg(long)]
    pub echo_console: bool,

    /// Exit with status 0 even when a scenario fails
    ///
    /// Failures are still reported. Useful when the screenshots are the
    /// point of the run and a human reviews them afterwards.
    #[arg(long)]
    pub exit_zero: bool,
}

/// Arguments for the list command
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// List scenarios from a plan file instead of the built-in set
    #[arg(long, value_name = "FILE")]
    pub plan: Option<PathBuf>,

    /// Print every step of each scenario
    #[arg(long)]
    pub steps: bool,
}
