//! Terminal output: status messages, run reports and scenario listings.
//!
//! Status messages and reports go to stderr so stdout stays clean for
//! `pagecheck list`. Colors follow `NO_COLOR`/`FORCE_COLOR` and TTY
//! detection.
//!
//! # Examples
//!
//! ```no_run
//! use pagecheck_cli::ui;
//!
//! ui::init_colors(false);
//! ui::info("Verifying 4 scenario(s) against http://localhost:3000");
//! ui::success("All scenarios passed");
//! ```

mod format;
mod messages;

pub use format::{format_duration, print_report, print_scenarios, print_summary, render_scenarios};
pub use messages::{info, success, warning};

/// Check if color output should be enabled.
///
/// Respects `NO_COLOR` and `FORCE_COLOR`, falls back to terminal
/// capability detection on stderr.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    console::user_attended_stderr()
}

/// Initialize color support. Call once, early in `main`.
///
/// `--no-color` and a non-color terminal both turn owo-colors' output off
/// globally.
pub fn init_colors(no_color: bool) {
    owo_colors::set_override(!no_color && should_use_color());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_should_use_color_no_color() {
        unsafe {
            std::env::set_var("NO_COLOR", "1");
            std::env::remove_var("FORCE_COLOR");
        }
        assert!(!should_use_color());
        unsafe {
            std::env::remove_var("NO_COLOR");
        }
    }

    #[test]
    #[serial]
    fn test_should_use_color_force_color() {
        unsafe {
            std::env::remove_var("NO_COLOR");
            std::env::set_var("FORCE_COLOR", "1");
        }
        assert!(should_use_color());
        unsafe {
            std::env::remove_var("FORCE_COLOR");
        }
    }
}
