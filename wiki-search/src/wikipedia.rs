//! Wikipedia full-text search via the MediaWiki action API.
//!
//! Issues `GET <endpoint>?action=query&list=search&format=json&origin=*&srsearch=<q>`
//! and reads `query.search[]`. The page identifier arrives as `pageid`
//! from the live API but as `pageId` from some proxies and fixtures; both
//! are accepted and normalised to [`SearchHit::page_id`].

use serde::Deserialize;
use url::Url;

use crate::backend::SearchBackend;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::snippet::Snippet;
use crate::types::SearchHit;

/// Action API search client.
///
/// Cheap to clone: the underlying [`reqwest::Client`] is reference-counted.
#[derive(Debug, Clone)]
pub struct WikipediaClient {
    client: reqwest::Client,
    endpoint: Url,
    max_results: usize,
}

impl WikipediaClient {
    /// Build a client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` is invalid, or
    /// [`SearchError::Http`] if the HTTP client cannot be constructed.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| SearchError::Config(format!("endpoint is not a valid URL: {e}")))?;
        Ok(Self {
            client: http::build_client(config)?,
            endpoint,
            max_results: config.max_results,
        })
    }

    /// The configured endpoint.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Full request URL for `query`.
    pub(crate) fn request_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("action", "query")
            .append_pair("list", "search")
            .append_pair("format", "json")
            .append_pair("origin", "*")
            .append_pair("srlimit", &self.max_results.to_string())
            .append_pair("srsearch", query);
        url
    }
}

impl SearchBackend for WikipediaClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        tracing::trace!(query, "Wikipedia search");

        let response = self
            .client
            .get(self.request_url(query))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(SearchError::from_transport)?
            .error_for_status()
            .map_err(SearchError::from_transport)?;

        let body = response.text().await.map_err(SearchError::from_transport)?;

        tracing::trace!(bytes = body.len(), "Wikipedia response received");

        parse_search_response(&body)
    }

    fn name(&self) -> &'static str {
        "wikipedia"
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    query: Option<QueryBlock>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct QueryBlock {
    search: Vec<RawHit>,
}

#[derive(Debug, Deserialize)]
struct RawHit {
    #[serde(alias = "pageId")]
    pageid: u64,
    title: String,
    #[serde(default)]
    snippet: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

/// Parse an action API search response body into hits.
///
/// Extracted as a separate function for testability with canned bodies.
pub(crate) fn parse_search_response(body: &str) -> Result<Vec<SearchHit>, SearchError> {
    let parsed: ApiResponse =
        serde_json::from_str(body).map_err(|e| SearchError::Parse(e.to_string()))?;

    if let Some(err) = parsed.error {
        return Err(SearchError::Api {
            code: if err.code.is_empty() {
                "unknown".to_owned()
            } else {
                err.code
            },
            info: err.info,
        });
    }

    let query = parsed
        .query
        .ok_or_else(|| SearchError::Parse("missing field `query`".into()))?;

    let hits: Vec<SearchHit> = query
        .search
        .into_iter()
        .map(|raw| SearchHit {
            page_id: raw.pageid,
            title: raw.title,
            snippet: Snippet::parse(&raw.snippet),
        })
        .collect();

    tracing::debug!(count = hits.len(), "Wikipedia results parsed");
    Ok(hits)
}
