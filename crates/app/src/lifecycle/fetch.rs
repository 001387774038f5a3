//! Fetch-on-focus lifecycle shared by every list/detail screen.
//!
//! The controller runs the same fetch path for first mount, every
//! not-visible -> visible focus transition, and explicit pull-to-refresh.
//! Each invocation is tagged with a monotonically increasing sequence
//! number; a resolution older than the newest one already applied is
//! discarded, so a slow stale fetch can never overwrite fresher records.

use std::future::Future;
use std::sync::{Mutex, MutexGuard};

use crate::error::AppError;

/// Raw controller state: `{records, loading, error}` plus bookkeeping.
#[derive(Debug)]
struct FetchState<T> {
    records: Vec<T>,
    loading: bool,
    error: Option<AppError>,
    /// Sequence number handed to the most recent invocation.
    issued_seq: u64,
    /// Highest sequence number whose resolution has been applied.
    applied_seq: u64,
    /// Set when the owning screen unmounts; late resolutions are dropped.
    retired: bool,
}

/// Deterministic projection of the raw state, pattern-matched for rendering.
///
/// Precedence, reproduced exactly:
/// 1. loading with nothing to show -> full-screen `Loading`
/// 2. an error -> `Error` with a retry affordance
/// 3. no records -> explicit `Empty` message (never a blank screen)
/// 4. otherwise `Ready`, with `refreshing` as the non-blocking indicator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    Loading,
    Error(String),
    Empty,
    Ready { records: Vec<T>, refreshing: bool },
}

/// The reusable fetch-on-focus controller.
///
/// Parameterized per invocation by a fetch future; the controller itself
/// only owns the state projection and the stale-resolution bookkeeping.
#[derive(Debug)]
pub struct FocusFetchController<T> {
    state: Mutex<FetchState<T>>,
}

impl<T> FocusFetchController<T> {
    /// Create a controller with no records and an initial loading state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FetchState {
                records: Vec::new(),
                loading: true,
                error: None,
                issued_seq: 0,
                applied_seq: 0,
                retired: false,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, FetchState<T>> {
        // A panic while holding the lock leaves plain data, not a broken
        // invariant; recover the guard instead of propagating the poison.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Run one fetch invocation.
    ///
    /// Used for mount, focus, and pull-to-refresh alike. Overlapping
    /// invocations each start a fresh call; only the resolution with the
    /// highest sequence number is applied.
    pub async fn refresh<F, Fut>(&self, fetch: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, AppError>>,
    {
        let seq = {
            let mut state = self.state();
            if state.retired {
                return;
            }
            state.issued_seq += 1;
            state.loading = true;
            state.error = None;
            state.issued_seq
        };

        let result = fetch().await;

        let mut state = self.state();
        if state.retired || seq <= state.applied_seq {
            tracing::debug!(seq, applied = state.applied_seq, "discarding stale fetch resolution");
            return;
        }
        state.applied_seq = seq;

        match result {
            Ok(records) => {
                state.records = records;
                state.error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "fetch failed");
                // Records already shown stay visible behind the error view.
                state.error = Some(err);
            }
        }

        // Loading clears only once the newest in-flight invocation resolved.
        if seq == state.issued_seq {
            state.loading = false;
        }
    }

    /// Mark the owning screen as unmounted.
    ///
    /// Any resolution arriving afterwards is discarded instead of being
    /// applied to a defunct view.
    pub fn retire(&self) {
        self.state().retired = true;
    }

    /// The current error, if any.
    #[must_use]
    pub fn error(&self) -> Option<AppError> {
        self.state().error.clone()
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state().loading
    }
}

impl<T: Clone> FocusFetchController<T> {
    /// Snapshot of the current records.
    #[must_use]
    pub fn records(&self) -> Vec<T> {
        self.state().records.clone()
    }

    /// Project the raw state for rendering.
    #[must_use]
    pub fn view(&self) -> ViewState<T> {
        let state = self.state();
        if state.loading && state.records.is_empty() {
            ViewState::Loading
        } else if let Some(err) = &state.error {
            ViewState::Error(err.to_string())
        } else if state.records.is_empty() {
            ViewState::Empty
        } else {
            ViewState::Ready {
                records: state.records.clone(),
                refreshing: state.loading,
            }
        }
    }
}

impl<T> Default for FocusFetchController<T> {
    fn default() -> Self {
        Self::new()
    }
}
