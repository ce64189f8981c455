//! Browser lifecycle management.
//!
//! [`TestBrowser`] owns one Chrome process for the length of a verification
//! run. Each launch gets its own throwaway profile directory, so runs never
//! share cookies, storage or cache.
//!
//! # Resource Safety
//!
//! `close()` shuts Chrome down and removes the profile directory. If a
//! `TestBrowser` is dropped without it, chromiumoxide's own `Drop` kills the
//! process.

use crate::error::{Result, VerifyError};
use crate::page::Page;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Configuration for launching a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestBrowserConfig {
    /// Run in headless mode (default: true).
    pub headless: bool,

    /// Browser window size (default: 1280x720).
    pub window_size: (u32, u32),

    /// Additional Chrome arguments.
    pub args: Vec<String>,

    /// Chrome executable path (None = auto-detect).
    pub chrome_path: Option<PathBuf>,

    /// Log page console messages as they arrive.
    pub echo_console: bool,
}

impl TestBrowserConfig {
    /// Creates a new config with defaults for headless runs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the browser window, for watching a run.
    #[must_use]
    pub fn visible(mut self) -> Self {
        self.headless = false;
        self
    }

    /// Sets a custom window size.
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Adds additional Chrome arguments.
    #[must_use]
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args.extend(args);
        self
    }

    /// Uses a specific Chrome executable.
    #[must_use]
    pub fn with_chrome_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    /// Echoes page console messages to the log.
    #[must_use]
    pub fn with_echo_console(mut self, echo: bool) -> Self {
        self.echo_console = echo;
        self
    }

    #[allow(clippy::result_large_err)]
    fn to_browser_config(&self, profile_dir: &Path) -> Result<BrowserConfig> {
        let mut config = BrowserConfig::builder()
            .window_size(self.window_size.0, self.window_size.1)
            .user_data_dir(profile_dir);

        if !self.headless {
            config = config.with_head();
        }

        for arg in &self.args {
            config = config.arg(arg.clone());
        }

        if let Some(path) = &self.chrome_path {
            config = config.chrome_executable(path);
        }

        config.build().map_err(|e| VerifyError::LaunchFailed {
            reason: format!("invalid browser configuration: {e}"),
            source: None,
        })
    }
}

impl Default for TestBrowserConfig {
    fn default() -> Self {
        Self {
            headless: !cfg!(feature = "visible"),
            window_size: (1280, 720),
            args: vec![
                // Needed where user namespaces are unavailable (containers).
                // Only ever point this at the local application.
                "--no-sandbox".to_string(),
                // Prevents /dev/shm exhaustion in containers
                "--disable-dev-shm-usage".to_string(),
            ],
            chrome_path: None,
            echo_console: false,
        }
    }
}

/// A managed browser instance.
///
/// ```ignore
/// let browser = TestBrowser::launch(TestBrowserConfig::default()).await?;
/// let page = browser.new_page().await?;
/// page.navigate("http://localhost:3000/contact", WaitConfig::default()).await?;
/// browser.close().await?;
/// ```
pub struct TestBrowser {
    inner: Arc<Mutex<Option<Browser>>>,
    profile_dir: PathBuf,
    echo_console: bool,
}

impl TestBrowser {
    /// Launches a new browser instance with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `LaunchFailed` if Chrome is not installed, not executable,
    /// or fails to start.
    pub async fn launch(config: TestBrowserConfig) -> Result<Self> {
        debug!("Launching browser with config: {:?}", config);

        let profile_dir =
            std::env::temp_dir().join(format!("pagecheck-profile-{}", uuid::Uuid::new_v4()));
        let browser_config = config.to_browser_config(&profile_dir)?;

        let (browser, mut handler) =
            Browser::launch(browser_config)
                .await
                .map_err(|e| VerifyError::LaunchFailed {
                    reason: "failed to launch Chrome process".to_string(),
                    source: Some(Box::new(e)),
                })?;

        // chromiumoxide only processes CDP traffic while the handler is polled
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler error: {}", e);
                }
            }
        });

        debug!("Browser launched with profile {}", profile_dir.display());

        Ok(Self {
            inner: Arc::new(Mutex::new(Some(browser))),
            profile_dir,
            echo_console: config.echo_console,
        })
    }

    /// Opens a new blank page (tab).
    ///
    /// # Errors
    ///
    /// Returns `AlreadyClosed` if the browser has been closed.
    pub async fn new_page(&self) -> Result<Page> {
        let browser = self.inner.lock().await;
        let browser = browser.as_ref().ok_or(VerifyError::AlreadyClosed)?;

        let chrome_page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| VerifyError::ConnectionFailed(e.to_string()))?;

        Page::attach(chrome_page, self.echo_console).await
    }

    /// Closes the browser, waits for the process to exit and removes the
    /// profile directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser fails to close gracefully.
    pub async fn close(self) -> Result<()> {
        let mut browser_guard = self.inner.lock().await;

        if let Some(mut browser) = browser_guard.take() {
            debug!("Closing browser gracefully");
            browser
                .close()
                .await
                .map_err(|e| VerifyError::ConnectionFailed(e.to_string()))?;
            if let Err(e) = browser.wait().await {
                warn!("Browser process did not exit cleanly: {}", e);
            }
        }

        if let Err(e) = tokio::fs::remove_dir_all(&self.profile_dir).await {
            debug!(
                "Could not remove profile {}: {}",
                self.profile_dir.display(),
                e
            );
        }

        Ok(())
    }

    /// Returns true if the browser has been closed.
    pub async fn is_closed(&self) -> bool {
        self.inner.lock().await.is_none()
    }
}

impl Drop for TestBrowser {
    fn drop(&mut self) {
        // chromiumoxide's Browser::drop kills the process if close() never ran
        if let Ok(guard) = self.inner.try_lock() {
            if guard.is_some() {
                warn!("TestBrowser dropped without close() - forcing shutdown");
            }
        }
    }
}
