//! Shared HTTP client for action API requests.
//!
//! Provides a configured [`reqwest::Client`] with the transport timeout
//! and an identifying User-Agent, as the Wikimedia API etiquette asks.

use std::time::Duration;

use crate::config::SearchConfig;
use crate::error::SearchError;

/// User-Agent sent when the configuration does not override it.
pub const DEFAULT_USER_AGENT: &str = concat!("wiki-search/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] configured for the action API.
///
/// The client has:
/// - Timeout from config (covers connect, request and body)
/// - Custom User-Agent if configured, otherwise [`DEFAULT_USER_AGENT`]
/// - Brotli and gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let ua = config
        .user_agent
        .clone()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned());

    reqwest::Client::builder()
        .timeout(Duration::from_millis(config.timeout_ms))
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}
