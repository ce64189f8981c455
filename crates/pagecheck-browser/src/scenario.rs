//! Declarative verification runs.
//!
//! A [`Scenario`] is a named, ordered list of [`Step`]s. Scenarios can be
//! built in code with the chaining methods below or deserialized from a plan
//! file; both produce the same values.

use crate::console::ConsoleMessage;
use crate::error::VerifyError;
use crate::locator::Locator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// A condition that says the page has rendered enough to be asserted on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Readiness {
    /// A visible element whose text contains the given string.
    Text(String),
    /// A visible element matching the CSS selector.
    Selector(String),
    /// No network request in flight for the quiet window.
    NetworkIdle,
    /// `document.readyState` is `complete`.
    Load,
}

impl Readiness {
    /// Waits for an element containing `text`.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Waits for an element matching `css`.
    pub fn selector(css: impl Into<String>) -> Self {
        Self::Selector(css.into())
    }

    /// The locator used to poll element-based conditions.
    #[must_use]
    pub fn locator(&self) -> Option<Locator> {
        match self {
            Self::Text(text) => Some(Locator::text(text.clone()).first()),
            Self::Selector(css) => Some(Locator::css(css.clone()).first()),
            Self::NetworkIdle | Self::Load => None,
        }
    }
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "text={text}"),
            Self::Selector(css) => write!(f, "selector {css}"),
            Self::NetworkIdle => f.write_str("network idle"),
            Self::Load => f.write_str("document load"),
        }
    }
}

/// An interaction performed on a located element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// A mouse click at the element's center.
    #[default]
    Click,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Click => f.write_str("click"),
        }
    }
}

/// One step of a verification run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// Navigate to `base_url + path`.
    Open {
        /// Application path, e.g. `/automaton`
        path: String,
    },
    /// Block until the condition holds.
    AwaitReady {
        /// The readiness condition
        condition: Readiness,
    },
    /// The locator must resolve to exactly one visible element.
    AssertVisible {
        /// Element to check
        locator: Locator,
    },
    /// The page HTML must contain `text` literally.
    AssertContent {
        /// Literal text to look for
        text: String,
    },
    /// Act on an element, then wait out the settle delay.
    Interact {
        /// Element to act on
        locator: Locator,
        /// What to do with it
        #[serde(default)]
        action: Action,
        /// Pause after the action for transitions to finish
        #[serde(default, skip_serializing_if = "Option::is_none")]
        settle_ms: Option<u64>,
    },
    /// Write a full-page screenshot.
    Capture {
        /// Path relative to the output directory
        path: PathBuf,
        /// An earlier capture of this run the screenshot must differ from
        #[serde(default, skip_serializing_if = "Option::is_none")]
        differs_from: Option<PathBuf>,
    },
}

impl Step {
    /// Settle delay of an interaction step.
    #[must_use]
    pub fn settle(&self) -> Option<Duration> {
        match self {
            Self::Interact {
                settle_ms: Some(ms),
                ..
            } => Some(Duration::from_millis(*ms)),
            _ => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path } => write!(f, "open {path}"),
            Self::AwaitReady { condition } => write!(f, "await {condition}"),
            Self::AssertVisible { locator } => write!(f, "assert visible {locator}"),
            Self::AssertContent { text } => write!(f, "assert content contains {text:?}"),
            Self::Interact {
                locator, action, ..
            } => {
                write!(f, "{action} {locator}")?;
                if let Some(settle) = self.settle() {
                    write!(f, " (settle {}ms)", settle.as_millis())?;
                }
                Ok(())
            }
            Self::Capture { path, .. } => write!(f, "capture {}", path.display()),
        }
    }
}

/// A named verification run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Name used to select the scenario
    pub name: String,
    /// One-line summary
    #[serde(default)]
    pub description: String,
    /// Steps in program order
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Creates an empty scenario.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            steps: Vec::new(),
        }
    }

    /// Appends an arbitrary step.
    #[must_use]
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Appends an `Open` step.
    #[must_use]
    pub fn open(self, path: impl Into<String>) -> Self {
        self.step(Step::Open { path: path.into() })
    }

    /// Appends an `AwaitReady` step.
    #[must_use]
    pub fn await_ready(self, condition: Readiness) -> Self {
        self.step(Step::AwaitReady { condition })
    }

    /// Appends an `AssertVisible` step.
    #[must_use]
    pub fn assert_visible(self, locator: Locator) -> Self {
        self.step(Step::AssertVisible { locator })
    }

    /// Appends an `AssertContent` step.
    #[must_use]
    pub fn assert_content(self, text: impl Into<String>) -> Self {
        self.step(Step::AssertContent { text: text.into() })
    }

    /// Appends a click without settle delay.
    #[must_use]
    pub fn click(self, locator: Locator) -> Self {
        self.step(Step::Interact {
            locator,
            action: Action::Click,
            settle_ms: None,
        })
    }

    /// Appends a click followed by a settle delay.
    #[must_use]
    pub fn click_and_settle(self, locator: Locator, settle: Duration) -> Self {
        self.step(Step::Interact {
            locator,
            action: Action::Click,
            settle_ms: Some(u64::try_from(settle.as_millis()).unwrap_or(u64::MAX)),
        })
    }

    /// Appends a `Capture` step.
    #[must_use]
    pub fn capture(self, path: impl Into<PathBuf>) -> Self {
        self.step(Step::Capture {
            path: path.into(),
            differs_from: None,
        })
    }

    /// Appends a `Capture` step that must differ from an earlier capture.
    #[must_use]
    pub fn capture_changed(self, path: impl Into<PathBuf>, baseline: impl Into<PathBuf>) -> Self {
        self.step(Step::Capture {
            path: path.into(),
            differs_from: Some(baseline.into()),
        })
    }

    /// Checks the step order invariants: the first step opens a page, every
    /// `Open` is followed by a readiness wait before any assertion or
    /// interaction, and `differs_from` names an earlier capture.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated rule.
    pub fn validate(&self) -> std::result::Result<(), String> {
        match self.steps.first() {
            None => return Err(format!("scenario '{}' has no steps", self.name)),
            Some(Step::Open { .. }) => {}
            Some(other) => {
                return Err(format!(
                    "scenario '{}' must start with an open step, not '{other}'",
                    self.name
                ));
            }
        }

        let mut ready = false;
        let mut captured: Vec<&PathBuf> = Vec::new();

        for (index, step) in self.steps.iter().enumerate() {
            match step {
                Step::Open { .. } => ready = false,
                Step::AwaitReady { .. } => ready = true,
                Step::AssertVisible { .. } | Step::AssertContent { .. } | Step::Interact { .. } => {
                    if !ready {
                        return Err(format!(
                            "scenario '{}' step {} ('{step}') runs before any readiness wait",
                            self.name,
                            index + 1
                        ));
                    }
                }
                Step::Capture { path, differs_from } => {
                    if let Some(baseline) = differs_from {
                        if !captured.contains(&baseline) {
                            return Err(format!(
                                "scenario '{}' step {} compares against '{}', which is not captured earlier",
                                self.name,
                                index + 1,
                                baseline.display()
                            ));
                        }
                    }
                    captured.push(path);
                }
            }
        }

        Ok(())
    }
}

/// A screenshot written during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    /// Where the PNG was written
    pub path: PathBuf,
    /// The capture path as named in the scenario
    pub label: PathBuf,
    /// SHA-256 of the PNG bytes, lowercase hex
    pub digest: String,
}

/// Outcome of one executed step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckpointOutcome {
    /// 1-based position in the scenario
    pub index: usize,
    /// Human-readable description of the step
    pub step: String,
    /// Whether the step succeeded
    pub passed: bool,
    /// Time spent on the step
    pub elapsed: Duration,
}

/// Everything a run produced.
#[derive(Debug)]
pub struct RunReport {
    /// Scenario name
    pub scenario: String,
    /// One entry per executed step, in order
    pub checkpoints: Vec<CheckpointOutcome>,
    /// Screenshots written, in order
    pub artifacts: Vec<Artifact>,
    /// Console messages the page produced
    pub console: Vec<ConsoleMessage>,
    /// The error that ended the run early, if any
    pub failure: Option<VerifyError>,
}

impl RunReport {
    /// True when every step passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }

    /// Number of steps that passed.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.checkpoints.iter().filter(|c| c.passed).count()
    }
}
