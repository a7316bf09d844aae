//! Trait definition for pluggable search backends.
//!
//! The query controller in `wiki-widget` is generic over [`SearchBackend`]
//! so the debounce and cancellation logic can be driven by a scripted
//! backend in tests and by [`crate::WikipediaClient`] in production.

use crate::error::SearchError;
use crate::types::SearchHit;

/// A source of search hits for a query string.
///
/// Implementors own URL construction, the HTTP round trip and response
/// parsing. Dropping the returned future must abort the request; this is
/// how a superseded query is cancelled.
///
/// All implementations must be `Send + Sync` because each request runs on
/// its own spawned task.
pub trait SearchBackend: Send + Sync {
    /// Search for `query` and return hits in the backend's ranking order.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the request fails, times out, or the
    /// response is malformed.
    fn search(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Vec<SearchHit>, SearchError>> + Send;

    /// Short human-readable name for logs.
    fn name(&self) -> &'static str;
}
