//! Page-level browser operations.
//!
//! [`Page`] wraps a chromiumoxide page (one tab) and adds console capture,
//! network activity tracking, locator resolution, clicking and full-page
//! screenshots. Event listeners are registered when the page is attached,
//! before any navigation, so no early request or console call is missed.

use crate::console::{parse_console_event, ConsoleCapture};
use crate::error::{Result, VerifyError};
use crate::locator::{Locator, Resolution};
use crate::network::NetworkActivity;
use crate::wait::{wait_for, wait_for_result, WaitConfig};
use chromiumoxide::cdp::browser_protocol::network::{
    EventLoadingFailed, EventLoadingFinished, EventRequestWillBeSent,
};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::cdp::js_protocol::runtime::EventConsoleApiCalled;
use chromiumoxide::page::{Page as ChromePage, ScreenshotParams};
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// A browser page (tab) with verification capabilities.
#[derive(Debug)]
pub struct Page {
    inner: ChromePage,
    console: ConsoleCapture,
    network: NetworkActivity,
    listeners: Vec<JoinHandle<()>>,
}

impl Page {
    /// Wraps a freshly opened chromiumoxide page and starts its listeners.
    ///
    /// With `echo_console`, every console message is also logged as it
    /// arrives.
    pub(crate) async fn attach(page: ChromePage, echo_console: bool) -> Result<Self> {
        let console = ConsoleCapture::new();
        let network = NetworkActivity::new();

        let mut console_events = page.event_listener::<EventConsoleApiCalled>().await?;
        let mut started = page.event_listener::<EventRequestWillBeSent>().await?;
        let mut finished = page.event_listener::<EventLoadingFinished>().await?;
        let mut failed = page.event_listener::<EventLoadingFailed>().await?;

        let capture = console.clone();
        let console_task = tokio::spawn(async move {
            while let Some(event) = console_events.next().await {
                let message = parse_console_event(&event);
                if echo_console {
                    info!("Browser Console: {}", message.text);
                }
                capture.push(message);
            }
        });

        let activity = network.clone();
        let started_task = tokio::spawn(async move {
            while let Some(event) = started.next().await {
                activity.request_started(event.request_id.inner());
            }
        });

        let activity = network.clone();
        let finished_task = tokio::spawn(async move {
            while let Some(event) = finished.next().await {
                activity.request_finished(event.request_id.inner());
            }
        });

        let activity = network.clone();
        let failed_task = tokio::spawn(async move {
            while let Some(event) = failed.next().await {
                activity.request_finished(event.request_id.inner());
            }
        });

        Ok(Self {
            inner: page,
            console,
            network,
            listeners: vec![console_task, started_task, finished_task, failed_task],
        })
    }

    /// Console messages captured so far.
    #[must_use]
    pub fn console(&self) -> &ConsoleCapture {
        &self.console
    }

    /// In-flight request tracking for this page.
    #[must_use]
    pub fn network(&self) -> &NetworkActivity {
        &self.network
    }

    /// Navigates to an absolute URL and waits for the document to load.
    ///
    /// # Errors
    ///
    /// Returns `Navigation` if the browser cannot load the URL, lands on its
    /// own error page, or the document does not finish loading in time.
    pub async fn navigate(&self, url: &str, config: WaitConfig) -> Result<()> {
        let failed = |reason: String| VerifyError::Navigation {
            url: url.to_string(),
            reason,
        };

        self.network.reset();
        self.inner
            .goto(url)
            .await
            .map_err(|e| failed(e.to_string()))?;

        let landed = self.url().await.map_err(|e| failed(e.to_string()))?;
        if landed.starts_with("chrome-error://") {
            return Err(failed("browser displayed its network error page".to_string()));
        }

        self.wait_for_load(config)
            .await
            .map_err(|e| failed(e.to_string()))
    }

    /// Waits for `document.readyState` to become `complete`.
    ///
    /// # Errors
    ///
    /// Returns `ReadinessTimeout` if the document does not finish loading.
    pub async fn wait_for_load(&self, config: WaitConfig) -> Result<()> {
        wait_for_result(
            move || async move {
                let state: String = self.evaluate("document.readyState").await?;
                Ok(state == "complete")
            },
            config,
            "document ready",
        )
        .await
    }

    /// Waits until no request has been in flight for `quiet`.
    ///
    /// # Errors
    ///
    /// Returns `ReadinessTimeout` if the network keeps busy.
    pub async fn wait_for_network_idle(&self, quiet: Duration, config: WaitConfig) -> Result<()> {
        wait_for(
            move || async move { self.network.is_idle(quiet) },
            config,
            "network idle",
        )
        .await
    }

    /// Executes JavaScript in the page and deserializes the result.
    ///
    /// Do not pass unsanitized input; locators JSON-encode their arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if execution fails or the result has another shape.
    pub async fn evaluate<T>(&self, script: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let result = self
            .inner
            .evaluate(script)
            .await
            .map_err(|e| VerifyError::ScriptExecutionFailed(e.to_string()))?;

        result
            .into_value()
            .map_err(|e| VerifyError::ScriptExecutionFailed(e.to_string()))
    }

    /// Resolves `locator` once and tags the chosen element with `token`.
    ///
    /// # Errors
    ///
    /// Returns `ScriptExecutionFailed` if the resolver cannot run, e.g.
    /// while the page is navigating.
    pub async fn resolve(&self, locator: &Locator, token: &str) -> Result<Resolution> {
        let script = locator
            .resolve_script(token)
            .map_err(|e| VerifyError::ScriptExecutionFailed(e.to_string()))?;
        let raw: String = self.evaluate(&script).await?;
        let resolution: Resolution = serde_json::from_str(&raw)
            .map_err(|e| VerifyError::ScriptExecutionFailed(e.to_string()))?;
        debug!("{} resolved to {:?}", locator, resolution);
        Ok(resolution)
    }

    /// Clicks the element previously tagged with `token`.
    ///
    /// The browser scrolls the element into view and dispatches a real
    /// mouse press and release at its center.
    ///
    /// # Errors
    ///
    /// Returns `InteractionFailed` naming `description` if the element is
    /// gone or cannot be clicked.
    pub async fn click_tagged(&self, token: &str, description: &str) -> Result<()> {
        let element = self
            .inner
            .find_element(Locator::tagged_selector(token))
            .await
            .map_err(|e| VerifyError::interaction(description, e.to_string()))?;

        element
            .click()
            .await
            .map_err(|e| VerifyError::interaction(description, e.to_string()))?;
        Ok(())
    }

    /// Serialized HTML of the current document.
    ///
    /// # Errors
    ///
    /// Returns an error if the DOM cannot be read.
    pub async fn content(&self) -> Result<String> {
        self.inner
            .content()
            .await
            .map_err(|e| VerifyError::ScriptExecutionFailed(e.to_string()))
    }

    /// Returns the current page URL.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails.
    pub async fn url(&self) -> Result<String> {
        self.evaluate("window.location.href").await
    }

    /// Returns the page title.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails.
    pub async fn title(&self) -> Result<String> {
        self.evaluate("document.title").await
    }

    /// Takes a full-page PNG screenshot.
    ///
    /// # Errors
    ///
    /// Returns an error if screenshot capture fails.
    pub async fn screenshot(&self) -> Result<Vec<u8>> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(true)
            .build();

        self.inner
            .screenshot(params)
            .await
            .map_err(|e| VerifyError::ScriptExecutionFailed(e.to_string()))
    }

    /// Stops the listeners and closes the tab.
    ///
    /// # Errors
    ///
    /// Returns an error if closing the page fails.
    pub async fn close(mut self) -> Result<()> {
        for listener in self.listeners.drain(..) {
            listener.abort();
        }
        self.inner.clone().close().await?;
        Ok(())
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        for listener in &self.listeners {
            listener.abort();
        }
    }
}
