//! In-flight request tracking for the network-idle readiness condition.
//!
//! The page feeds CDP `Network.requestWillBeSent`, `Network.loadingFinished`
//! and `Network.loadingFailed` events into a [`NetworkActivity`]. The network
//! counts as idle once no request has been in flight for a quiet window
//! (500ms by default, the same window browsers' "networkidle" uses).

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// How long the network must stay quiet before it counts as idle.
pub const DEFAULT_QUIET_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug)]
struct ActivityState {
    in_flight: HashSet<String>,
    last_change: Instant,
    total_requests: u64,
}

/// Thread-safe view of a page's outstanding network requests.
///
/// Cheaply cloneable; the CDP listener tasks and the verifier share one.
#[derive(Debug, Clone)]
pub struct NetworkActivity {
    state: Arc<Mutex<ActivityState>>,
}

impl NetworkActivity {
    /// Creates a tracker with nothing in flight.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ActivityState {
                in_flight: HashSet::new(),
                last_change: Instant::now(),
                total_requests: 0,
            })),
        }
    }

    /// Records a request leaving the page. Redirects reuse the request id,
    /// so a repeated start does not count twice.
    pub(crate) fn request_started(&self, request_id: &str) {
        let mut state = self.lock();
        if state.in_flight.insert(request_id.to_string()) {
            state.total_requests += 1;
        }
        state.last_change = Instant::now();
    }

    /// Records a request finishing or failing.
    pub(crate) fn request_finished(&self, request_id: &str) {
        let mut state = self.lock();
        if state.in_flight.remove(request_id) {
            state.last_change = Instant::now();
        }
    }

    /// Forgets outstanding requests, e.g. before a new navigation.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.in_flight.clear();
        state.last_change = Instant::now();
    }

    /// Number of requests currently in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.lock().in_flight.len()
    }

    /// Total number of distinct requests observed.
    #[must_use]
    pub fn total_requests(&self) -> u64 {
        self.lock().total_requests
    }

    /// True when nothing is in flight and nothing changed for `quiet`.
    #[must_use]
    pub fn is_idle(&self, quiet: Duration) -> bool {
        let state = self.lock();
        state.in_flight.is_empty() && state.last_change.elapsed() >= quiet
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ActivityState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for NetworkActivity {
    fn default() -> Self {
        Self::new()
    }
}
