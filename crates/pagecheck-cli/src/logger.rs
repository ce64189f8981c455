//! Logging infrastructure for the pagecheck CLI.
//!
//! Step narration from the verifier (`Navigating to ...`, `Clicking ...`,
//! `Saved screenshot to ...`) is emitted at INFO by `pagecheck_browser`;
//! CDP plumbing and page content dumps are at DEBUG.
//!
//! # Example
//!
//! ```rust,no_run
//! use pagecheck_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false);
//! info!("Verifying /automaton");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "pagecheck=debug,pagecheck_browser=debug,pagecheck_cli=debug";
const QUIET_FILTER: &str = "pagecheck=error,pagecheck_browser=error,pagecheck_cli=error";
const DEFAULT_FILTER: &str = "pagecheck=info,pagecheck_browser=info,pagecheck_cli=info";

/// Pick the filter for the given flags.
///
/// The logging level is determined in this order:
/// 1. `--verbose` flag: DEBUG for pagecheck crates
/// 2. `--quiet` flag: ERROR only
/// 3. `RUST_LOG` environment variable: custom filter
/// 4. Default: INFO for pagecheck crates
pub fn build_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize the tracing subscriber with the specified options.
///
/// Call once at the start of the program, before any logging occurs.
///
/// # Arguments
///
/// * `verbose` - Enable debug-level logging
/// * `quiet` - Only show error-level logs
/// * `no_color` - Disable colored output
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && should_use_colors())
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(build_filter(verbose, quiet))
        .with(fmt_layer)
        .init();
}

/// Check if colored output should be enabled.
///
/// # Environment Variables
///
/// - `NO_COLOR`: If set, disables colors
/// - `FORCE_COLOR`: If set, forces colors even in non-TTY
pub fn should_use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    console::Term::stderr().features().colors_supported()
}
