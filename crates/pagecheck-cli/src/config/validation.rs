use crate::config::PagecheckConfig;
use crate::error::ConfigError;

impl PagecheckConfig {
    /// Validate configuration for logical consistency.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "base_url".to_string(),
                hint: "Set base_url in pagecheck.toml, PAGECHECK_BASE_URL or --base-url"
                    .to_string(),
            });
        }

        if crate::cli::parse_base_url(&self.base_url).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "base_url".to_string(),
                value: self.base_url.clone(),
                hint: "Use an http:// or https:// URL, e.g. http://localhost:3000".to_string(),
            });
        }

        for (field, value) in [
            ("timeout_ms", self.timeout_ms),
            ("assert_timeout_ms", self.assert_timeout_ms),
            ("poll_interval_ms", self.poll_interval_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: value.to_string(),
                    hint: "Use a positive number of milliseconds".to_string(),
                });
            }
        }

        if self.poll_interval_ms > self.timeout_ms {
            return Err(ConfigError::InvalidValue {
                field: "poll_interval_ms".to_string(),
                value: self.poll_interval_ms.to_string(),
                hint: format!(
                    "The poll interval must not exceed timeout_ms ({})",
                    self.timeout_ms
                ),
            });
        }

        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "window_width/window_height".to_string(),
                value: format!("{}x{}", self.window_width, self.window_height),
                hint: "Both window dimensions must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}
