//! Error types for page verification.
//!
//! The four verification failures (`Navigation`, `ReadinessTimeout`,
//! `AssertionFailed`, `InteractionFailed`) are what a run reports back to the
//! caller. The remaining variants cover the browser plumbing underneath them.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// The main error type for all verification operations.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Failed to launch the browser process.
    ///
    /// This typically occurs when Chrome/Chromium is not installed,
    /// or when there are permission issues with the executable.
    #[error("failed to launch browser: {reason}")]
    LaunchFailed {
        /// Human-readable reason for the launch failure
        reason: String,
        /// Optional underlying error that caused the failure
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to establish or use the Chrome DevTools Protocol connection.
    #[error("CDP connection failed: {0}")]
    ConnectionFailed(String),

    /// The target was unreachable or navigation was aborted.
    #[error("navigation to '{url}' failed: {reason}")]
    Navigation {
        /// The URL that failed to load
        url: String,
        /// Reason for the navigation failure
        reason: String,
    },

    /// A readiness condition was not reached within its bound.
    #[error("readiness condition '{condition}' not met after {timeout:?}")]
    ReadinessTimeout {
        /// Description of the condition that timed out
        condition: String,
        /// How long we waited before giving up
        timeout: Duration,
    },

    /// A locator resolved to zero or several elements, or the element
    /// failed the expected visibility/content check.
    #[error("assertion failed for {locator}: {reason}")]
    AssertionFailed {
        /// Description of what was being asserted
        locator: String,
        /// Why the assertion did not hold
        reason: String,
    },

    /// An element required for an interaction could not be located or clicked.
    #[error("interaction with {locator} failed: {reason}")]
    InteractionFailed {
        /// Description of the element being interacted with
        locator: String,
        /// Why the interaction failed
        reason: String,
    },

    /// JavaScript execution in the page context failed.
    #[error("JavaScript execution failed: {0}")]
    ScriptExecutionFailed(String),

    /// Writing a screenshot artifact failed.
    #[error("failed to capture '{}': {reason}", path.display())]
    Capture {
        /// Destination of the screenshot
        path: PathBuf,
        /// Reason for the failure
        reason: String,
    },

    /// An operation was attempted on a closed browser instance.
    #[error("browser instance is already closed")]
    AlreadyClosed,

    /// Wraps errors from the chromiumoxide library.
    #[error("chromiumoxide error: {0}")]
    ChromiumOxide(#[from] chromiumoxide::error::CdpError),

    /// Generic I/O errors (file access, network, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VerifyError {
    /// Short machine-friendly name of the failure kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Navigation { .. } => "navigation",
            Self::ReadinessTimeout { .. } => "readiness-timeout",
            Self::AssertionFailed { .. } => "assertion",
            Self::InteractionFailed { .. } => "interaction",
            Self::LaunchFailed { .. } => "launch",
            Self::Capture { .. } => "capture",
            Self::ConnectionFailed(_)
            | Self::ScriptExecutionFailed(_)
            | Self::AlreadyClosed
            | Self::ChromiumOxide(_)
            | Self::Io(_) => "browser",
        }
    }

    pub(crate) fn assertion(locator: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::AssertionFailed {
            locator: locator.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn interaction(locator: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InteractionFailed {
            locator: locator.into(),
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for verification operations.
pub type Result<T> = std::result::Result<T, VerifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_cover_verification_failures() {
        assert_eq!(
            VerifyError::assertion("text \"Q4.3\"", "no element matches").kind(),
            "assertion"
        );
        assert_eq!(
            VerifyError::interaction("button", "detached").kind(),
            "interaction"
        );
        let timeout = VerifyError::ReadinessTimeout {
            condition: "network idle".into(),
            timeout: Duration::from_secs(10),
        };
        assert_eq!(timeout.kind(), "readiness-timeout");
        assert_eq!(VerifyError::AlreadyClosed.kind(), "browser");
    }

    #[test]
    fn messages_name_the_locator() {
        let err = VerifyError::assertion("role=button[name=\"Q4.7\"]", "element is not visible");
        assert_eq!(
            err.to_string(),
            "assertion failed for role=button[name=\"Q4.7\"]: element is not visible"
        );
    }
}
