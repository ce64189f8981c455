//! Error handling for the pagecheck CLI.
//!
//! `CliError` is what commands return. Configuration problems get their own
//! `ConfigError` so each can carry a hint, and browser-level failures are
//! wrapped from [`pagecheck_browser::VerifyError`].
//!
//! A scenario that fails its checks is not an error of the CLI itself; it
//! surfaces as [`CliError::VerificationFailed`] only after every selected
//! scenario has run, so the process exit status reflects the outcome.

mod miette;

pub use self::miette::cli_error_to_miette;

use pagecheck_browser::VerifyError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors (file not found, invalid values, etc.)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The browser could not be launched or driven
    #[error("Browser error: {0}")]
    Browser(#[from] VerifyError),

    /// A scenario name that is neither built in nor in the plan
    #[error("Unknown scenario '{name}'\n\nHint: Available scenarios: {available}")]
    UnknownScenario {
        /// The requested name
        name: String,
        /// Comma-separated list of known names
        available: String,
    },

    /// A scenario whose steps are out of order
    #[error("Invalid scenario '{name}': {reason}")]
    InvalidScenario {
        /// Scenario name
        name: String,
        /// The violated rule
        reason: String,
    },

    /// A plan file that cannot be read or parsed
    #[error("Invalid plan file {}: {reason}\n\nHint: Plan files are JSON or TOML with a list of scenarios", .path.display())]
    InvalidPlan {
        /// Plan file path
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// One or more scenarios failed their checks
    #[error("{failed} of {total} scenario(s) failed\n\nHint: Screenshots and failure.png are in {}; pass --exit-zero to report without failing", .out_dir.display())]
    VerificationFailed {
        /// Number of failed scenarios
        failed: usize,
        /// Number of scenarios run
        total: usize,
        /// Where artifacts were written
        out_dir: PathBuf,
    },

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file given with --config doesn't exist
    #[error("Config file not found: {}\n\nHint: Create a pagecheck.toml file or check the --config path", .0.display())]
    NotFound(PathBuf),

    /// Merged configuration could not be extracted
    #[error("Invalid configuration: {0}\n\nHint: Check pagecheck.toml syntax and PAGECHECK_* environment variables")]
    Extract(String),

    /// Missing required configuration field
    #[error("Missing required field: {field}\n\nHint: {hint}")]
    MissingField {
        /// Name of the missing field
        field: String,
        /// Helpful hint for providing the field
        hint: String,
    },

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;
