//! Bounded waits for browser conditions.
//!
//! Every suspension point in a run is a single bounded block: the probe is
//! re-evaluated at a fixed poll interval until it is satisfied or the
//! timeout expires. There is no backoff and nothing is retried after the
//! deadline.

use crate::error::{Result, VerifyError};
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// Default timeout for readiness waits (10 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default bound for assertion polling (5 seconds).
pub const DEFAULT_ASSERT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default poll interval for checking conditions (100ms).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Configuration for wait operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    /// Maximum time to wait for the condition.
    pub timeout: Duration,

    /// How often to check if the condition is satisfied.
    pub poll_interval: Duration,
}

impl WaitConfig {
    /// Creates a new wait configuration.
    #[must_use]
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Creates a config with custom timeout and default poll interval.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new(timeout, DEFAULT_POLL_INTERVAL)
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_POLL_INTERVAL)
    }
}

/// Result of [`poll_until`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOutcome<T> {
    /// The probe produced an accepted value.
    Met(T),
    /// The deadline passed. Holds the last value the probe produced, if any.
    Expired(Option<T>),
}

/// Polls `probe` until `accept` returns true for its value or the timeout
/// expires.
///
/// Probe errors are treated as transient (the DOM may be mid-render) and do
/// not end the wait early.
pub async fn poll_until<T, F, Fut, A>(probe: F, accept: A, config: WaitConfig) -> WaitOutcome<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
    A: Fn(&T) -> bool,
{
    let start = Instant::now();
    let mut last = None;

    loop {
        if let Ok(value) = probe().await {
            if accept(&value) {
                return WaitOutcome::Met(value);
            }
            last = Some(value);
        }

        if start.elapsed() >= config.timeout {
            return WaitOutcome::Expired(last);
        }

        sleep(config.poll_interval).await;
    }
}

/// Waits for a condition to become true, with timeout.
///
/// # Errors
///
/// Returns `ReadinessTimeout` naming `description` when the condition is not
/// met in time.
pub async fn wait_for<F, Fut>(condition: F, config: WaitConfig, description: &str) -> Result<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = bool>,
{
    let condition = &condition;
    wait_for_result(move || async move { Ok(condition().await) }, config, description).await
}

/// Waits for a condition that returns a `Result<bool>`.
///
/// Errors from the condition are treated as "not yet".
///
/// # Errors
///
/// Returns `ReadinessTimeout` naming `description` when the condition is not
/// met in time.
pub async fn wait_for_result<F, Fut>(
    condition: F,
    config: WaitConfig,
    description: &str,
) -> Result<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    match poll_until(condition, |ready| *ready, config).await {
        WaitOutcome::Met(_) => Ok(()),
        WaitOutcome::Expired(_) => Err(VerifyError::ReadinessTimeout {
            condition: description.to_string(),
            timeout: config.timeout,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn wait_for_succeeds_immediately() {
        let result = wait_for(|| async { true }, WaitConfig::default(), "test condition").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn wait_for_succeeds_eventually() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result = wait_for(
            move || {
                let c = counter_clone.clone();
                async move {
                    let count = c.fetch_add(1, Ordering::SeqCst);
                    count >= 3
                }
            },
            WaitConfig::new(Duration::from_secs(5), Duration::from_millis(5)),
            "counter >= 3",
        )
        .await;

        assert!(result.is_ok());
        assert!(counter.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test]
    async fn wait_for_times_out_as_readiness_timeout() {
        let result = wait_for(
            || async { false },
            WaitConfig::new(Duration::from_millis(100), Duration::from_millis(10)),
            "impossible condition",
        )
        .await;

        match result {
            Err(VerifyError::ReadinessTimeout { condition, timeout }) => {
                assert_eq!(condition, "impossible condition");
                assert_eq!(timeout, Duration::from_millis(100));
            }
            other => panic!("expected ReadinessTimeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn poll_until_keeps_last_rejected_value() {
        let counter = Arc::new(AtomicU32::new(0));
        let outcome = poll_until(
            || {
                let c = counter.clone();
                async move { Ok(c.fetch_add(1, Ordering::SeqCst)) }
            },
            |_| false,
            WaitConfig::new(Duration::from_millis(50), Duration::from_millis(10)),
        )
        .await;

        match outcome {
            WaitOutcome::Expired(Some(last)) => assert!(last >= 1),
            other => panic!("expected expiry with a value, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn poll_until_treats_errors_as_transient() {
        let counter = Arc::new(AtomicU32::new(0));
        let outcome = poll_until(
            || {
                let c = counter.clone();
                async move {
                    if c.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(VerifyError::ScriptExecutionFailed("not yet".into()))
                    } else {
                        Ok("ready")
                    }
                }
            },
            |_| true,
            WaitConfig::new(Duration::from_secs(5), Duration::from_millis(5)),
        )
        .await;

        assert_eq!(outcome, WaitOutcome::Met("ready"));
    }

    #[tokio::test]
    async fn poll_until_expires_without_value_when_probe_always_fails() {
        let outcome: WaitOutcome<u32> = poll_until(
            || async { Err(VerifyError::AlreadyClosed) },
            |_| true,
            WaitConfig::new(Duration::from_millis(30), Duration::from_millis(10)),
        )
        .await;

        assert_eq!(outcome, WaitOutcome::Expired(None));
    }
}
