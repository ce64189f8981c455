//! Configuration for pagecheck runs with multi-source loading.
//!
//! Merges settings from CLI args, environment variables, and config files.
//! Priority: CLI > Environment (`PAGECHECK_*`) > File (`pagecheck.toml`) > Defaults

mod defaults;
mod loading;
mod validation;

use pagecheck_browser::{TestBrowserConfig, VerifierOptions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub use defaults::*;
pub use loading::DEFAULT_CONFIG_FILE;

/// pagecheck configuration - loaded from pagecheck.toml, env and CLI args.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagecheckConfig {
    /// Base URL of the application under verification
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Directory screenshots and failure diagnostics are written to
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Bound for navigation and readiness waits
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Bound for assertion polling
    #[serde(default = "default_assert_timeout_ms")]
    pub assert_timeout_ms: u64,

    /// Interval between polls of a wait condition
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Run Chrome without a window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Browser viewport width
    #[serde(default = "default_window_width")]
    pub window_width: u32,

    /// Browser viewport height
    #[serde(default = "default_window_height")]
    pub window_height: u32,

    /// Chrome executable (auto-detected when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chrome_path: Option<PathBuf>,

    /// Log browser console messages as they arrive
    #[serde(default)]
    pub echo_console: bool,

    /// Exit with status 0 even when a scenario fails
    #[serde(default)]
    pub exit_zero: bool,
}

impl Default for PagecheckConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            out_dir: default_out_dir(),
            timeout_ms: default_timeout_ms(),
            assert_timeout_ms: default_assert_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            headless: default_headless(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            chrome_path: None,
            echo_console: false,
            exit_zero: false,
        }
    }
}

impl PagecheckConfig {
    /// Browser launch settings for one scenario run.
    pub fn browser_config(&self) -> TestBrowserConfig {
        let mut config = TestBrowserConfig::new()
            .with_window_size(self.window_width, self.window_height)
            .with_echo_console(self.echo_console);
        config.headless = self.headless;
        if let Some(path) = &self.chrome_path {
            config = config.with_chrome_path(path.clone());
        }
        config
    }

    /// Verifier timeouts and output locations.
    pub fn verifier_options(&self) -> VerifierOptions {
        VerifierOptions {
            ready_timeout: Duration::from_millis(self.timeout_ms),
            assert_timeout: Duration::from_millis(self.assert_timeout_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            out_dir: self.out_dir.clone(),
            ..VerifierOptions::default()
        }
    }
}
