//! The application under verification.
//!
//! The verifier is purely a client: it only needs a base URL to join paths
//! onto and a cheap reachability check so an unreachable server fails as a
//! navigation error before the browser spends its page-load timeout.

use crate::error::{Result, VerifyError};
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

/// Default base URL of the application under verification.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// How long the reachability probe may take.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// A running application the verifier navigates against.
#[async_trait]
pub trait TargetApp: Send + Sync {
    /// Base URL of the application (e.g. `http://localhost:3000`).
    fn base_url(&self) -> &str;

    /// Fails fast when the application is not reachable.
    ///
    /// The default implementation assumes it is.
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    /// Joins a path onto the base URL.
    ///
    /// ```ignore
    /// app.url("/automaton") // "http://localhost:3000/automaton"
    /// ```
    fn url(&self, path: &str) -> String {
        let base = self.base_url().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

impl fmt::Debug for dyn TargetApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetApp")
            .field("base_url", &self.base_url())
            .finish()
    }
}

/// An application already running at a fixed local URL.
#[derive(Debug, Clone)]
pub struct LocalApp {
    base_url: String,
}

impl LocalApp {
    /// Creates a handle for the application at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for LocalApp {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl TargetApp for LocalApp {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Opens (and drops) a TCP connection to the application's host.
    async fn health_check(&self) -> Result<()> {
        let unreachable = |reason: String| VerifyError::Navigation {
            url: self.base_url.clone(),
            reason,
        };

        let address = socket_address(&self.base_url)
            .ok_or_else(|| unreachable("base URL has no http(s) host".to_string()))?;

        debug!("Probing {} at {}", self.base_url, address);

        match timeout(CONNECT_TIMEOUT, TcpStream::connect(&address)).await {
            Ok(Ok(_stream)) => Ok(()),
            Ok(Err(e)) => Err(unreachable(e.to_string())),
            Err(_) => Err(unreachable(format!(
                "connection to {address} timed out after {:?}",
                CONNECT_TIMEOUT
            ))),
        }
    }
}

/// Extracts `host:port` from an http(s) URL, defaulting the port by scheme.
pub(crate) fn socket_address(url: &str) -> Option<String> {
    let (default_port, rest) = if let Some(rest) = url.strip_prefix("http://") {
        (80, rest)
    } else if let Some(rest) = url.strip_prefix("https://") {
        (443, rest)
    } else {
        return None;
    };

    let authority = rest.split(['/', '?', '#']).next()?;
    let authority = authority.rsplit('@').next()?;
    if authority.is_empty() {
        return None;
    }

    // Bracketed IPv6 literals carry colons of their own.
    let has_port = match authority.rfind(']') {
        Some(close) => authority[close..].contains(':'),
        None => authority.contains(':'),
    };

    if has_port {
        Some(authority.to_string())
    } else {
        Some(format!("{authority}:{default_port}"))
    }
}
