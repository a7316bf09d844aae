//! Error types for the wiki-search crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling.

/// Errors that can occur during a Wikipedia search request.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The HTTP request could not be sent or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The server answered with a non-success status code.
    #[error("HTTP status {status}: {reason}")]
    Status {
        /// Numeric status code.
        status: u16,
        /// Canonical reason phrase, or `unknown` if none exists.
        reason: String,
    },

    /// The request exceeded the configured transport timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The response body was not the expected JSON shape.
    #[error("malformed response: {0}")]
    Parse(String),

    /// The API answered with an error object instead of results.
    #[error("API error {code}: {info}")]
    Api {
        /// Machine-readable error code from the API.
        code: String,
        /// Human-readable explanation from the API.
        info: String,
    },

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Map a transport-level [`reqwest::Error`] to the matching variant.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout(err.to_string());
        }
        if let Some(status) = err.status() {
            return Self::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_owned(),
            };
        }
        Self::Http(err.to_string())
    }
}

/// Convenience type alias for wiki-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
