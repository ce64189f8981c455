//! # pagecheck-browser
//!
//! Page verification on top of headless Chrome (chromiumoxide).
//!
//! A verification run opens a page of a locally running application, waits
//! for it to be ready, asserts that specific elements and text are visible,
//! clicks where needed, and writes screenshots for manual inspection.
//!
//! ## Architecture
//!
//! - **TestBrowser**: one Chrome process per run, with a throwaway profile
//! - **Page**: one tab, with console capture and network activity tracking
//! - **Locator**: role+name, text (exact or substring) or CSS selector, all
//!   sharing the same strict-mode resolution contract
//! - **PageVerifier**: the open / await-ready / assert / interact / capture
//!   operations, plus best-effort failure diagnostics
//! - **Scenario**: a declarative, serde-loadable list of steps
//! - **WaitConfig**: bounded waits, no retries past the deadline
//!
//! ## Example
//!
//! ```ignore
//! use pagecheck_browser::{
//!     run_scenario, LocalApp, Locator, Readiness, Scenario, TestBrowserConfig, VerifierOptions,
//! };
//!
//! let scenario = Scenario::new("contact", "contact page copy")
//!     .open("/contact")
//!     .await_ready(Readiness::NetworkIdle)
//!     .assert_content("メッセージを送る")
//!     .capture("contact_page.png");
//!
//! let report = run_scenario(
//!     TestBrowserConfig::default(),
//!     &LocalApp::new("http://localhost:3000"),
//!     &scenario,
//!     VerifierOptions::default(),
//! )
//! .await?;
//! assert!(report.passed());
//! ```
//!
//! Browser-backed tests are `#[ignore]`d; run them with
//! `cargo test -p pagecheck-browser -- --ignored` on a machine with Chrome.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod browser;
pub mod console;
pub mod error;
pub mod locator;
pub mod network;
pub mod page;
pub mod scenario;
pub mod server;
pub mod verifier;
pub mod wait;

pub use browser::{TestBrowser, TestBrowserConfig};
pub use console::{ConsoleCapture, ConsoleLevel, ConsoleMessage};
pub use error::{Result, VerifyError};
pub use locator::{Locator, Pick, Resolution, Target};
pub use network::{NetworkActivity, DEFAULT_QUIET_WINDOW};
pub use page::Page;
pub use scenario::{Action, Artifact, CheckpointOutcome, Readiness, RunReport, Scenario, Step};
pub use server::{LocalApp, TargetApp, DEFAULT_BASE_URL};
pub use verifier::{run_scenario, PageVerifier, VerifierOptions};
pub use wait::{WaitConfig, DEFAULT_ASSERT_TIMEOUT, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT};
