//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use miette::Report;
use pagecheck_browser::VerifyError;

/// Convert `CliError` to a miette `Report`.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Browser(e) => verify_error_to_miette(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert `VerifyError` to a miette `Report`, adding a hint for the
/// failures a user can act on.
pub fn verify_error_to_miette(err: VerifyError) -> Report {
    match err {
        VerifyError::LaunchFailed { .. } => miette::miette!(
            "{}\n\nHint: Install Chrome or Chromium, or set chrome_path in pagecheck.toml",
            err
        ),
        VerifyError::Navigation { .. } => miette::miette!(
            "{}\n\nHint: Start the application first, or point --base-url at it",
            err
        ),
        _ => miette::miette!("{}", err),
    }
}
