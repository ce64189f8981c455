//! pagecheck CLI - verify pages of a locally running web app.
//!
//! This crate provides the command-line interface over `pagecheck-browser`:
//! argument parsing, layered configuration, logging, the built-in scenarios
//! for the target application and terminal reporting.
//!
//! # Architecture
//!
//! - [`cli`] - clap definitions
//! - [`config`] - `pagecheck.toml` / `PAGECHECK_*` / flag layering
//! - [`error`] - Error types with actionable hints
//! - [`logger`] - Structured logging with tracing
//! - [`scenarios`] - Built-in scenarios
//! - [`plan`] - Scenarios loaded from JSON or TOML
//! - [`ui`] - Status messages and run reports
//! - `commands` - `run` and `list`
//!
//! # Example
//!
//! ```rust,no_run
//! use pagecheck_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     // CLI command implementations...
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod plan;
pub mod scenarios;
pub mod ui;

pub use error::{CliError, ConfigError, Result};
