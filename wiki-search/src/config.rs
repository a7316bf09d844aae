//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls which endpoint is queried, the transport
//! timeout and how many hits a single request asks for.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Default Wikipedia action API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";

/// Upper bound the action API accepts for `srlimit` on anonymous requests.
pub const MAX_RESULTS_LIMIT: usize = 500;

/// Configuration for Wikipedia search requests.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Base URL of the action API (`.../w/api.php`).
    pub endpoint: String,
    /// Transport timeout for one request, in milliseconds.
    pub timeout_ms: u64,
    /// Number of hits requested per query (`srlimit`).
    pub max_results: usize,
    /// Custom User-Agent string. If `None`, `wiki-search/<version>` is sent.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout_ms: 5_000,
            max_results: 10,
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `endpoint` must be an absolute `http` or `https` URL
    /// - `timeout_ms` must be greater than 0
    /// - `max_results` must be in `1..=500`
    pub fn validate(&self) -> Result<(), SearchError> {
        let endpoint = url::Url::parse(&self.endpoint)
            .map_err(|e| SearchError::Config(format!("endpoint is not a valid URL: {e}")))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(SearchError::Config(
                "endpoint must use http or https".into(),
            ));
        }
        if self.timeout_ms == 0 {
            return Err(SearchError::Config(
                "timeout_ms must be greater than 0".into(),
            ));
        }
        if self.max_results == 0 || self.max_results > MAX_RESULTS_LIMIT {
            return Err(SearchError::Config(format!(
                "max_results must be between 1 and {MAX_RESULTS_LIMIT}"
            )));
        }
        Ok(())
    }
}
