//! Query controller: validation, stale-request cancellation and result state.
//!
//! The controller reacts to each stable query published by the debouncer.
//! It owns the only request token, so "cancel the previous request, then
//! start the next" is a single synchronous step on the session loop.
//!
//! Fetches run on spawned tasks that never touch controller state. Each one
//! reports a [`Completion`] over a channel and the session loop feeds it back
//! through [`QueryController::on_completion`], where completions for anything
//! but the current request are dropped. Aborting the transport is only
//! best-effort; that id check is what keeps a slow early response from
//! overwriting a later one.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};
use wiki_search::{SearchBackend, SearchError, SearchHit};

use crate::display::DisplayState;

/// Minimum number of non-blank characters a query needs to be searched.
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;

/// Where the controller is in its per-query cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No stable query handled yet.
    Idle,
    /// The last stable query was too short; nothing was requested.
    Skipped,
    /// A request for the last stable query is in flight.
    Fetching,
    /// The last request succeeded.
    Succeeded,
    /// The last request failed.
    Failed,
}

/// Cancellation handle for the outstanding request.
#[derive(Debug)]
struct RequestToken {
    id: u64,
    cancel: CancellationToken,
}

/// Result of a finished fetch, reported back to the session loop.
#[derive(Debug)]
pub struct Completion {
    request_id: u64,
    outcome: Result<Vec<SearchHit>, SearchError>,
}

impl Completion {
    /// Id of the request this completion belongs to.
    pub fn request_id(&self) -> u64 {
        self.request_id
    }
}

/// Turns stable queries into requests and request outcomes into state.
pub struct QueryController<B> {
    backend: Arc<B>,
    min_query_len: usize,
    query: String,
    results: Vec<SearchHit>,
    loading: bool,
    error: Option<String>,
    phase: Phase,
    inflight: Option<RequestToken>,
    next_request_id: u64,
    completions: mpsc::UnboundedSender<Completion>,
}

impl<B> QueryController<B> {
    /// Cancel the outstanding request, if any.
    fn cancel_inflight(&mut self) {
        if let Some(token) = self.inflight.take() {
            token.cancel.cancel();
            debug!(request_id = token.id, "request cancelled");
        }
    }
}

impl<B: SearchBackend + 'static> QueryController<B> {
    /// Create a controller and the receiver its fetch completions arrive on.
    ///
    /// The receiver must be polled by the loop that owns the controller and
    /// each item passed to [`on_completion`](Self::on_completion).
    pub fn new(
        backend: Arc<B>,
        min_query_len: usize,
    ) -> (Self, mpsc::UnboundedReceiver<Completion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = Self {
            backend,
            min_query_len,
            query: String::new(),
            results: Vec::new(),
            loading: false,
            error: None,
            phase: Phase::Idle,
            inflight: None,
            next_request_id: 0,
            completions: tx,
        };
        (controller, rx)
    }

    /// Whether `query` is long enough to be searched.
    pub fn is_searchable(&self, query: &str) -> bool {
        query.trim().chars().count() >= self.min_query_len
    }

    /// Handle a newly published stable query.
    ///
    /// Too-short queries clear the results and cancel any outstanding
    /// request. Anything else cancels the previous request and starts a new
    /// one. Must be called from within a tokio runtime.
    pub fn on_stable_query_change(&mut self, value: &str) -> DisplayState {
        self.query = value.to_owned();

        if !self.is_searchable(value) {
            self.cancel_inflight();
            self.loading = false;
            self.error = None;
            self.results.clear();
            self.phase = Phase::Skipped;
            debug!(min_query_len = self.min_query_len, "query too short, results cleared");
            return self.display_state();
        }

        self.start_fetch(value.trim().to_owned());
        self.display_state()
    }

    fn start_fetch(&mut self, query: String) {
        self.next_request_id += 1;
        let id = self.next_request_id;
        let cancel = CancellationToken::new();

        // Swap first, then cancel the old token: there is never a moment
        // with two current tokens.
        let previous = self.inflight.replace(RequestToken {
            id,
            cancel: cancel.clone(),
        });
        if let Some(previous) = previous {
            previous.cancel.cancel();
            debug!(request_id = previous.id, superseded_by = id, "request superseded");
        }

        self.loading = true;
        self.error = None;
        self.phase = Phase::Fetching;
        trace!(request_id = id, query = %query, "issuing search");
        debug!(request_id = id, backend = self.backend.name(), "request issued");

        let backend = Arc::clone(&self.backend);
        let tx = self.completions.clone();
        tokio::spawn(async move {
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    trace!(request_id = id, "fetch aborted");
                    return;
                }
                outcome = backend.search(&query) => outcome,
            };
            if tx.send(Completion { request_id: id, outcome }).is_err() {
                trace!(request_id = id, "completion dropped, controller gone");
            }
        });
    }

    /// Apply a finished fetch.
    ///
    /// Returns the new display state, or `None` when the completion belongs
    /// to a cancelled or superseded request and was discarded untouched.
    pub fn on_completion(&mut self, completion: Completion) -> Option<DisplayState> {
        let current = matches!(
            &self.inflight,
            Some(token) if token.id == completion.request_id && !token.cancel.is_cancelled()
        );
        if !current {
            debug!(request_id = completion.request_id, "stale completion discarded");
            return None;
        }

        self.inflight = None;
        self.loading = false;
        match completion.outcome {
            Ok(hits) => {
                debug!(request_id = completion.request_id, count = hits.len(), "request succeeded");
                self.results = hits;
                self.phase = Phase::Succeeded;
            }
            Err(err) => {
                warn!(request_id = completion.request_id, error = %err, "request failed");
                // Previous results stay in place behind the error.
                self.error = Some(format!("Failed to fetch results: {err}"));
                self.phase = Phase::Failed;
            }
        }
        Some(self.display_state())
    }

    /// Current derived display state.
    pub fn display_state(&self) -> DisplayState {
        DisplayState::derive(
            self.is_searchable(&self.query),
            self.loading,
            self.error.as_deref(),
            &self.results,
        )
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Last stable query handled.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current result set, possibly stale behind an error.
    pub fn results(&self) -> &[SearchHit] {
        &self.results
    }

    /// Current error message, if the last request failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Cancel any outstanding request and stop loading.
    ///
    /// Completions that still arrive afterwards are discarded.
    pub fn shutdown(&mut self) {
        self.cancel_inflight();
        self.loading = false;
    }
}

impl<B> Drop for QueryController<B> {
    fn drop(&mut self) {
        self.cancel_inflight();
    }
}
