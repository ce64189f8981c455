//! Command-line interface definition for pagecheck.
//!
//! This module defines the CLI structure using clap v4's derive macros.
//!
//! # Command Structure
//!
//! - `pagecheck run <SCENARIO>...` - Run built-in scenarios by name
//! - `pagecheck run --all` - Run every built-in scenario
//! - `pagecheck run --plan <FILE>` - Run scenarios from a JSON or TOML plan file
//! - `pagecheck list` - Show the available scenarios

mod commands;
mod tests;
mod validation;

use clap::Parser;

pub use commands::{Command, ListArgs, RunArgs};
pub use validation::{parse_base_url, parse_timeout_ms};

/// pagecheck - verify pages of a locally running web app
#[derive(Parser, Debug)]
#[command(
    name = "pagecheck",
    version,
    about = "Verify pages of a locally running web app in headless Chrome",
    long_about = "pagecheck opens pages of a locally running web application in headless Chrome,\n\
                  waits for them to be ready, asserts that localized text and controls are visible,\n\
                  clicks where needed, and writes screenshots for manual inspection."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Shows browser plumbing, locator resolution and page content dumps.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
