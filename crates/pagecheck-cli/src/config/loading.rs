use crate::cli::RunArgs;
use crate::config::PagecheckConfig;
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "pagecheck.toml";

/// The subset of settings the run command can override. Only flags that
/// were actually given are serialized, so unset flags never mask the file
/// or the environment.
#[derive(Debug, Default, Serialize)]
struct RunOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    out_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    headless: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    echo_console: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exit_zero: Option<bool>,
}

impl From<&RunArgs> for RunOverrides {
    fn from(args: &RunArgs) -> Self {
        Self {
            base_url: args.base_url.clone(),
            out_dir: args.out_dir.clone(),
            timeout_ms: args.timeout_ms,
            headless: args.visible.then_some(false),
            echo_console: args.echo_console.then_some(true),
            exit_zero: args.exit_zero.then_some(true),
        }
    }
}

impl PagecheckConfig {
    /// Load configuration from multiple sources.
    /// Priority: CLI args > environment variables > config file > defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if `--config` names a missing file and
    /// `ConfigError::Extract` if a source has the wrong shape.
    pub fn load(args: &RunArgs) -> Result<Self> {
        let config_file = match args.config.as_deref() {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                default_path.exists().then(|| default_path.to_path_buf())
            }
        };

        Self::figment(config_file.as_deref(), &RunOverrides::from(args))
            .extract()
            .map_err(|e| ConfigError::Extract(e.to_string()).into())
    }

    fn figment(config_file: Option<&Path>, overrides: &RunOverrides) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = config_file {
            figment = figment.merge(Toml::file(path));
        }

        // PAGECHECK_BASE_URL, PAGECHECK_TIMEOUT_MS, ...
        figment = figment.merge(Env::prefixed("PAGECHECK_"));

        figment.merge(Serialized::defaults(overrides))
    }
}
