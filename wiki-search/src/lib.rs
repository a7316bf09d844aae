//! # wiki-search
//!
//! Wikipedia full-text search for the wiki-widget search box.
//!
//! This crate wraps the MediaWiki action API's `list=search` module: it
//! builds the request, enforces the transport timeout, validates the JSON
//! response and turns highlighted HTML snippets into plain segments.
//!
//! ## Design
//!
//! - One GET per query; no caching, paging or retries
//! - Responses are validated against a single canonical hit shape
//! - Dropping a search future aborts its HTTP request
//!
//! ## Logging
//!
//! Search queries are logged only at trace level.

pub mod backend;
pub mod config;
pub mod error;
pub mod http;
pub mod snippet;
pub mod types;
pub mod wikipedia;

pub use backend::SearchBackend;
pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use snippet::{Snippet, SnippetSegment};
pub use types::SearchHit;
pub use wikipedia::WikipediaClient;

/// Search Wikipedia once with the given configuration.
///
/// Builds a fresh [`WikipediaClient`] for the call. Long-lived callers
/// should construct the client once and reuse it.
///
/// # Errors
///
/// Returns [`SearchError::Config`] for an invalid configuration, and the
/// transport or parse error of the request otherwise.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> wiki_search::Result<()> {
/// let config = wiki_search::SearchConfig::default();
/// let hits = wiki_search::search("rust programming", &config).await?;
/// for hit in &hits {
///     println!("{}: {}", hit.page_id, hit.title);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(query: &str, config: &SearchConfig) -> Result<Vec<SearchHit>> {
    let client = WikipediaClient::new(config)?;
    client.search(query).await
}
