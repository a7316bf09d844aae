//! Core types for search hits.

use serde::{Deserialize, Serialize};

use crate::snippet::Snippet;

/// A single article matching a search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Numeric page identifier. Normalised from the API's `pageid`
    /// (or `pageId`) field.
    pub page_id: u64,
    /// Article title.
    pub title: String,
    /// Snippet around the match, with matched terms marked.
    pub snippet: Snippet,
}

impl SearchHit {
    /// Link to the article on the wiki that serves `endpoint`.
    ///
    /// Uses the `curid` form so the link survives page renames. Returns
    /// `None` if `endpoint` is not a valid base URL.
    pub fn article_url(&self, endpoint: &str) -> Option<String> {
        let mut url = url::Url::parse(endpoint).ok()?;
        if url.cannot_be_a_base() {
            return None;
        }
        url.set_path("/");
        url.set_fragment(None);
        url.set_query(Some(&format!("curid={}", self.page_id)));
        Some(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(page_id: u64) -> SearchHit {
        SearchHit {
            page_id,
            title: "Rust (programming language)".into(),
            snippet: Snippet::parse(r#"<span class="searchmatch">Rust</span> is fast"#),
        }
    }

    #[test]
    fn article_url_uses_curid_on_endpoint_host() {
        let url = hit(29414838).article_url("https://en.wikipedia.org/w/api.php");
        assert_eq!(url.as_deref(), Some("https://en.wikipedia.org/?curid=29414838"));
    }

    #[test]
    fn article_url_keeps_port() {
        let url = hit(7).article_url("http://127.0.0.1:8080/w/api.php?x=1");
        assert_eq!(url.as_deref(), Some("http://127.0.0.1:8080/?curid=7"));
    }

    #[test]
    fn article_url_rejects_garbage_endpoint() {
        assert!(hit(1).article_url("not a url").is_none());
    }

    #[test]
    fn serialized_hit_carries_segments() {
        let json = serde_json::to_value(hit(1)).expect("serialize");
        assert_eq!(json["page_id"], 1);
        assert_eq!(json["snippet"]["segments"][0]["highlighted"], true);
    }
}
