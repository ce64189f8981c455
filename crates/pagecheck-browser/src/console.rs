//! Browser console capture.
//!
//! Each page accumulates the messages its scripts write to the console so a
//! run report can include them, and optionally echoes them to the log as
//! they arrive. Ordering is arrival order.

use chromiumoxide::cdp::js_protocol::runtime::{ConsoleApiCalledType, EventConsoleApiCalled};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// The severity level of a console message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleLevel {
    /// `console.log()`
    Log,
    /// `console.info()`
    Info,
    /// `console.warn()`
    Warning,
    /// `console.error()`
    Error,
    /// `console.debug()`
    Debug,
    /// Catch-all for other console APIs
    Other,
}

impl ConsoleLevel {
    /// Returns true if this is an error-level message.
    #[must_use]
    pub fn is_error(self) -> bool {
        matches!(self, ConsoleLevel::Error)
    }
}

impl fmt::Display for ConsoleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConsoleLevel::Log => "log",
            ConsoleLevel::Info => "info",
            ConsoleLevel::Warning => "warning",
            ConsoleLevel::Error => "error",
            ConsoleLevel::Debug => "debug",
            ConsoleLevel::Other => "other",
        };
        f.write_str(name)
    }
}

impl From<&ConsoleApiCalledType> for ConsoleLevel {
    fn from(kind: &ConsoleApiCalledType) -> Self {
        match kind {
            ConsoleApiCalledType::Log => ConsoleLevel::Log,
            ConsoleApiCalledType::Info => ConsoleLevel::Info,
            ConsoleApiCalledType::Warning => ConsoleLevel::Warning,
            ConsoleApiCalledType::Error => ConsoleLevel::Error,
            ConsoleApiCalledType::Debug => ConsoleLevel::Debug,
            _ => ConsoleLevel::Other,
        }
    }
}

/// A captured console message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleMessage {
    /// Severity level
    pub level: ConsoleLevel,

    /// Message text, arguments joined with spaces.
    pub text: String,

    /// Source location if available (e.g. "app.js:42:10").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl ConsoleMessage {
    /// Creates a new console message.
    #[must_use]
    pub fn new(level: ConsoleLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            source: None,
        }
    }

    /// Attaches a source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl fmt::Display for ConsoleMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.text)?;
        if let Some(source) = &self.source {
            write!(f, " ({source})")?;
        }
        Ok(())
    }
}

/// Thread-safe console message accumulator, shared between the CDP listener
/// task and the verifier.
#[derive(Debug, Clone, Default)]
pub struct ConsoleCapture {
    messages: Arc<Mutex<Vec<ConsoleMessage>>>,
}

impl ConsoleCapture {
    /// Creates a new, empty console capture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a message. A poisoned lock is recovered, not propagated.
    pub(crate) fn push(&self, message: ConsoleMessage) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message);
    }

    /// Snapshot of all captured messages.
    #[must_use]
    pub fn messages(&self) -> Vec<ConsoleMessage> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// All error-level messages.
    #[must_use]
    pub fn errors(&self) -> Vec<ConsoleMessage> {
        self.messages()
            .into_iter()
            .filter(|m| m.level.is_error())
            .collect()
    }

    /// Number of error-level messages.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|m| m.level.is_error())
            .count()
    }

    /// Clears all captured messages.
    pub fn clear(&self) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Total number of messages captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if no messages have been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Converts a CDP `Runtime.consoleAPICalled` event into a [`ConsoleMessage`].
///
/// Non-string arguments (objects, numbers) are rendered from their JSON
/// value when one is available.
pub(crate) fn parse_console_event(event: &EventConsoleApiCalled) -> ConsoleMessage {
    let text = event
        .args
        .iter()
        .map(|arg| match arg.value.as_ref() {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => arg
                .description
                .clone()
                .unwrap_or_else(|| "<object>".to_string()),
        })
        .collect::<Vec<_>>()
        .join(" ");

    let mut message = ConsoleMessage::new(ConsoleLevel::from(&event.r#type), text);

    if let Some(frame) = event
        .stack_trace
        .as_ref()
        .and_then(|trace| trace.call_frames.first())
    {
        message = message.with_source(format!(
            "{}:{}:{}",
            frame.url, frame.line_number, frame.column_number
        ));
    }

    message
}
