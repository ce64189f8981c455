use pagecheck_browser::{DEFAULT_ASSERT_TIMEOUT, DEFAULT_BASE_URL, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT};
use std::path::PathBuf;

pub fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

pub fn default_out_dir() -> PathBuf {
    PathBuf::from("verification")
}

pub fn default_timeout_ms() -> u64 {
    duration_ms(DEFAULT_TIMEOUT)
}

pub fn default_assert_timeout_ms() -> u64 {
    duration_ms(DEFAULT_ASSERT_TIMEOUT)
}

pub fn default_poll_interval_ms() -> u64 {
    duration_ms(DEFAULT_POLL_INTERVAL)
}

pub fn default_headless() -> bool {
    !cfg!(feature = "visible")
}

pub fn default_window_width() -> u32 {
    1280
}

pub fn default_window_height() -> u32 {
    720
}

fn duration_ms(duration: std::time::Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
