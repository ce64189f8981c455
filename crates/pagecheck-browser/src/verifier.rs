//! The page verifier: one verification run, end to end.
//!
//! [`PageVerifier`] exposes the individual operations (open, await
//! readiness, assert, interact, capture) over a single page. [`run_scenario`]
//! owns the whole lifecycle: it launches the browser, executes the steps in
//! program order, stops at the first failure, attempts a best-effort failure
//! screenshot and always closes the browser.

use crate::browser::{TestBrowser, TestBrowserConfig};
use crate::error::{Result, VerifyError};
use crate::locator::{Locator, Resolution};
use crate::network::DEFAULT_QUIET_WINDOW;
use crate::page::Page;
use crate::scenario::{Action, Artifact, CheckpointOutcome, Readiness, RunReport, Scenario, Step};
use crate::server::TargetApp;
use crate::wait::{
    poll_until, WaitConfig, WaitOutcome, DEFAULT_ASSERT_TIMEOUT, DEFAULT_POLL_INTERVAL,
    DEFAULT_TIMEOUT,
};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Timeouts and output locations for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierOptions {
    /// Bound for navigation and readiness waits.
    pub ready_timeout: Duration,
    /// Bound for assertion and actionability polling.
    pub assert_timeout: Duration,
    /// Poll interval for all waits.
    pub poll_interval: Duration,
    /// Quiet window for the network-idle condition.
    pub idle_window: Duration,
    /// Directory capture paths are relative to.
    pub out_dir: PathBuf,
    /// File name of the failure screenshot inside `out_dir`.
    pub failure_screenshot: PathBuf,
}

impl Default for VerifierOptions {
    fn default() -> Self {
        Self {
            ready_timeout: DEFAULT_TIMEOUT,
            assert_timeout: DEFAULT_ASSERT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            idle_window: DEFAULT_QUIET_WINDOW,
            out_dir: PathBuf::from("verification"),
            failure_screenshot: PathBuf::from("failure.png"),
        }
    }
}

impl VerifierOptions {
    fn ready_wait(&self) -> WaitConfig {
        WaitConfig::new(self.ready_timeout, self.poll_interval)
    }

    fn assert_wait(&self) -> WaitConfig {
        WaitConfig::new(self.assert_timeout, self.poll_interval)
    }

    /// Where a capture named `path` is written.
    #[must_use]
    pub fn artifact_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.out_dir.join(path)
        }
    }

    /// Where the page HTML is dumped when a readiness wait times out.
    #[must_use]
    pub fn failure_dom_path(&self) -> PathBuf {
        self.artifact_path(&self.failure_screenshot.with_extension("html"))
    }
}

/// Lowercase hex SHA-256 of screenshot bytes.
#[must_use]
pub fn digest(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Runs verification operations against one page.
pub struct PageVerifier<'a> {
    page: Page,
    app: &'a dyn TargetApp,
    options: VerifierOptions,
    artifacts: Vec<Artifact>,
}

impl<'a> PageVerifier<'a> {
    /// Wraps an attached page.
    pub fn new(page: Page, app: &'a dyn TargetApp, options: VerifierOptions) -> Self {
        Self {
            page,
            app,
            options,
            artifacts: Vec::new(),
        }
    }

    /// The underlying page.
    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Screenshots written so far.
    #[must_use]
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// Navigates to `base_url + path`.
    ///
    /// # Errors
    ///
    /// Returns `Navigation` if the application is unreachable or the page
    /// does not load.
    pub async fn open(&self, path: &str) -> Result<()> {
        let url = self.app.url(path);
        info!("Navigating to {}...", path);
        self.app.health_check().await?;
        self.page.navigate(&url, self.options.ready_wait()).await
    }

    /// Blocks until `condition` holds.
    ///
    /// On timeout the current DOM is logged and written next to the failure
    /// screenshot before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns `ReadinessTimeout` if the condition is not met in time.
    pub async fn await_ready(&self, condition: &Readiness) -> Result<()> {
        info!("Waiting for {}...", condition);
        let config = self.options.ready_wait();

        let result = match condition {
            Readiness::Load => self.page.wait_for_load(config).await,
            Readiness::NetworkIdle => {
                self.page
                    .wait_for_network_idle(self.options.idle_window, config)
                    .await
            }
            Readiness::Text(_) | Readiness::Selector(_) => {
                let locator = condition.locator().ok_or_else(|| {
                    VerifyError::ScriptExecutionFailed(format!("{condition} has no locator"))
                })?;
                self.wait_resolved(&locator, config)
                    .await
                    .map(drop)
                    .map_err(|_| VerifyError::ReadinessTimeout {
                        condition: condition.to_string(),
                        timeout: config.timeout,
                    })
            }
        };

        if let Err(err @ VerifyError::ReadinessTimeout { .. }) = &result {
            warn!("{}. Checking page content...", err);
            self.dump_dom().await;
        }
        result
    }

    /// Asserts `locator` resolves to exactly one visible element.
    ///
    /// # Errors
    ///
    /// Returns `AssertionFailed` if no element, several elements, or an
    /// invisible element match until the assertion timeout.
    pub async fn assert_visible(&self, locator: &Locator) -> Result<()> {
        info!("Verifying {}...", locator);
        self.wait_resolved(locator, self.options.assert_wait())
            .await
            .map(drop)
    }

    /// Asserts the serialized page HTML contains `text` literally.
    ///
    /// # Errors
    ///
    /// Returns `AssertionFailed` if the text is absent.
    pub async fn assert_content(&self, text: &str) -> Result<()> {
        let content = self.page.content().await?;
        if content.contains(text) {
            info!("Found {:?} in page content", text);
            Ok(())
        } else {
            Err(VerifyError::assertion(
                format!("page content {text:?}"),
                "text not found in page content",
            ))
        }
    }

    /// Performs `action` on `locator`, then waits out `settle`.
    ///
    /// # Errors
    ///
    /// Returns `InteractionFailed` if the element never becomes actionable
    /// or the action is rejected.
    pub async fn interact(
        &self,
        locator: &Locator,
        action: Action,
        settle: Option<Duration>,
    ) -> Result<()> {
        info!("Performing {} on {}...", action, locator);
        let description = locator.to_string();
        let token = self
            .wait_resolved(locator, self.options.assert_wait())
            .await
            .map_err(|e| match e {
                VerifyError::AssertionFailed { locator, reason } => {
                    VerifyError::InteractionFailed { locator, reason }
                }
                other => other,
            })?;

        match action {
            Action::Click => self.page.click_tagged(&token, &description).await?,
        }

        if let Some(settle) = settle {
            debug!("Settling for {:?}", settle);
            tokio::time::sleep(settle).await;
        }
        Ok(())
    }

    /// Writes a full-page screenshot to `path` (relative to the output
    /// directory) and records it as an artifact.
    ///
    /// With `differs_from`, the screenshot must differ from that earlier
    /// capture of this run.
    ///
    /// # Errors
    ///
    /// Returns `Capture` if the screenshot cannot be taken or written, and
    /// `AssertionFailed` if it is identical to the baseline.
    pub async fn capture(&mut self, path: &Path, differs_from: Option<&Path>) -> Result<&Artifact> {
        let target = self.options.artifact_path(path);
        info!("Taking screenshot {}...", target.display());

        let bytes = write_screenshot(&self.page, &target).await?;
        let artifact = Artifact {
            path: target,
            label: path.to_path_buf(),
            digest: digest(&bytes),
        };

        if let Some(baseline) = differs_from {
            let earlier = self
                .artifacts
                .iter()
                .rev()
                .find(|a| a.label == baseline)
                .ok_or_else(|| {
                    VerifyError::assertion(
                        format!("capture {}", path.display()),
                        format!("no earlier capture named {}", baseline.display()),
                    )
                })?;
            if earlier.digest == artifact.digest {
                return Err(VerifyError::assertion(
                    format!("capture {}", path.display()),
                    format!("screenshot is identical to {}", baseline.display()),
                ));
            }
        }

        self.artifacts.push(artifact);
        Ok(&self.artifacts[self.artifacts.len() - 1])
    }

    /// Best-effort failure screenshot. Errors are logged, never returned.
    pub async fn capture_failure(&self) -> Option<PathBuf> {
        let target = self.options.artifact_path(&self.options.failure_screenshot);
        match write_screenshot(&self.page, &target).await {
            Ok(_) => {
                info!("Failure screenshot written to {}", target.display());
                Some(target)
            }
            Err(e) => {
                debug!("Could not write failure screenshot: {}", e);
                None
            }
        }
    }

    /// Executes one step.
    ///
    /// # Errors
    ///
    /// Returns whatever the step's operation returns.
    pub async fn execute(&mut self, step: &Step) -> Result<()> {
        match step {
            Step::Open { path } => self.open(path).await,
            Step::AwaitReady { condition } => self.await_ready(condition).await,
            Step::AssertVisible { locator } => self.assert_visible(locator).await,
            Step::AssertContent { text } => self.assert_content(text).await,
            Step::Interact {
                locator, action, ..
            } => self.interact(locator, *action, step.settle()).await,
            Step::Capture { path, differs_from } => self
                .capture(path, differs_from.as_deref())
                .await
                .map(drop),
        }
    }

    /// Executes `scenario` step by step, stopping at the first failure.
    ///
    /// Returns the per-step outcomes and the failure, if any. The failure
    /// screenshot is attempted here; the page stays open.
    pub async fn run_steps(&mut self, scenario: &Scenario) -> (Vec<CheckpointOutcome>, Option<VerifyError>) {
        let mut checkpoints = Vec::with_capacity(scenario.steps.len());

        for (index, step) in scenario.steps.iter().enumerate() {
            let started = Instant::now();
            let result = self.execute(step).await;
            let passed = result.is_ok();

            checkpoints.push(CheckpointOutcome {
                index: index + 1,
                step: step.to_string(),
                passed,
                elapsed: started.elapsed(),
            });

            if let Err(err) = result {
                error!("Verification failed at step {} ({}): {}", index + 1, step, err);
                self.capture_failure().await;
                return (checkpoints, Some(err));
            }
        }

        (checkpoints, None)
    }

    /// Consumes the verifier, returning the page and artifacts.
    #[must_use]
    pub fn into_parts(self) -> (Page, Vec<Artifact>) {
        (self.page, self.artifacts)
    }

    /// Polls `locator` until it resolves to one visible element and returns
    /// the tag token of that element.
    async fn wait_resolved(&self, locator: &Locator, config: WaitConfig) -> Result<String> {
        let token = uuid::Uuid::new_v4().to_string();
        let page = &self.page;
        let tag = token.as_str();

        let outcome = poll_until(
            move || page.resolve(locator, tag),
            Resolution::is_actionable,
            config,
        )
        .await;

        match outcome {
            WaitOutcome::Met(_) => Ok(token),
            WaitOutcome::Expired(last) => {
                let reason = last
                    .and_then(|r| r.failure_reason())
                    .unwrap_or_else(|| "locator could not be evaluated".to_string());
                Err(VerifyError::assertion(
                    locator.to_string(),
                    format!("{reason} (after {:?})", config.timeout),
                ))
            }
        }
    }

    async fn dump_dom(&self) {
        let content = match self.page.content().await {
            Ok(content) => content,
            Err(e) => {
                debug!("Could not read page content: {}", e);
                return;
            }
        };
        debug!("Page content at timeout:\n{}", content);

        let target = self.options.failure_dom_path();
        if let Err(e) = write_file(&target, content.as_bytes()).await {
            debug!("Could not write {}: {}", target.display(), e);
        }
    }
}

async fn write_screenshot(page: &Page, target: &Path) -> Result<Vec<u8>> {
    let bytes = page.screenshot().await.map_err(|e| VerifyError::Capture {
        path: target.to_path_buf(),
        reason: e.to_string(),
    })?;
    write_file(target, &bytes)
        .await
        .map_err(|e| VerifyError::Capture {
            path: target.to_path_buf(),
            reason: e.to_string(),
        })?;
    Ok(bytes)
}

async fn write_file(target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(target, bytes).await
}

/// Runs `scenario` in a fresh browser against `app`.
///
/// The browser is closed on every exit path. A failing step does not make
/// this function fail; it is recorded in [`RunReport::failure`].
///
/// # Errors
///
/// Returns an error only if the browser cannot be launched.
pub async fn run_scenario(
    browser_config: TestBrowserConfig,
    app: &dyn TargetApp,
    scenario: &Scenario,
    options: VerifierOptions,
) -> Result<RunReport> {
    info!("Launching browser for scenario '{}'...", scenario.name);
    let browser = TestBrowser::launch(browser_config).await?;

    let (checkpoints, artifacts, console, failure) = match browser.new_page().await {
        Ok(page) => {
            let mut verifier = PageVerifier::new(page, app, options);
            let (checkpoints, failure) = verifier.run_steps(scenario).await;
            let (page, artifacts) = verifier.into_parts();
            let console = page.console().messages();
            if let Err(e) = page.close().await {
                debug!("Page close failed: {}", e);
            }
            (checkpoints, artifacts, console, failure)
        }
        Err(e) => (Vec::new(), Vec::new(), Vec::new(), Some(e)),
    };

    if let Err(e) = browser.close().await {
        warn!("Browser close failed: {}", e);
    }

    if failure.is_none() {
        info!("Scenario '{}' completed successfully.", scenario.name);
    }

    Ok(RunReport {
        scenario: scenario.name.clone(),
        checkpoints,
        artifacts,
        console,
        failure,
    })
}
