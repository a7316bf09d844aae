//! Action API contract tests.
//!
//! These tests run [`WikipediaClient`] against a mock HTTP server and verify
//! the request shape, response parsing and error mapping. No live network.

use std::time::Duration;

use serde_json::json;
use wiki_search::{SearchBackend, SearchConfig, SearchError, WikipediaClient};
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, timeout_ms: u64) -> WikipediaClient {
    let config = SearchConfig {
        endpoint: format!("{}/w/api.php", server.uri()),
        timeout_ms,
        max_results: 5,
        user_agent: None,
    };
    WikipediaClient::new(&config).expect("client")
}

#[tokio::test]
async fn request_carries_required_query_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("action", "query"))
        .and(query_param("list", "search"))
        .and(query_param("format", "json"))
        .and(query_param("origin", "*"))
        .and(query_param("srlimit", "5"))
        .and(query_param("srsearch", "black cat"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": { "search": [] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let hits = client_for(&server, 2_000)
        .search("black cat")
        .await
        .expect("search should succeed");
    assert!(hits.is_empty());
}

#[tokio::test]
async fn hits_keep_server_order_and_highlighting() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "batchcomplete": "",
            "query": {
                "searchinfo": { "totalhits": 3 },
                "search": [
                    { "ns": 0, "title": "Dog", "pageid": 4269567,
                      "snippet": "The <span class=\"searchmatch\">dog</span> is a domesticated" },
                    { "ns": 0, "title": "Hot dog", "pageid": 14229,
                      "snippet": "A hot <span class=\"searchmatch\">dog</span>" },
                    { "ns": 0, "title": "Dog (disambiguation)", "pageId": 9,
                      "snippet": "" }
                ]
            }
        })))
        .mount(&server)
        .await;

    let hits = client_for(&server, 2_000).search("dog").await.expect("search");
    let titles: Vec<&str> = hits.iter().map(|h| h.title.as_str()).collect();
    assert_eq!(titles, vec!["Dog", "Hot dog", "Dog (disambiguation)"]);
    assert_eq!(hits[0].page_id, 4269567);
    assert_eq!(hits[2].page_id, 9);
    assert_eq!(hits[0].snippet.matches().collect::<Vec<_>>(), vec!["dog"]);
    assert_eq!(hits[1].snippet.plain_text(), "A hot dog");
}

#[tokio::test]
async fn server_error_maps_to_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server, 2_000).search("xyz").await.unwrap_err();
    match err {
        SearchError::Status { status, .. } => assert_eq!(status, 503),
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_maps_to_parse() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": { "search": [ { "title": "No id" } ] }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server, 2_000).search("xyz").await.unwrap_err();
    assert!(matches!(err, SearchError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn api_error_object_maps_to_api() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": { "code": "maxlag", "info": "Waiting for a database server" }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server, 2_000).search("xyz").await.unwrap_err();
    assert!(matches!(err, SearchError::Api { ref code, .. } if code == "maxlag"));
}

#[tokio::test]
async fn slow_server_maps_to_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "query": { "search": [] } }))
                .set_delay(Duration::from_millis(800)),
        )
        .mount(&server)
        .await;

    let err = client_for(&server, 100).search("xyz").await.unwrap_err();
    assert!(matches!(err, SearchError::Timeout(_)), "got {err:?}");
    assert!(err.to_string().contains("timed out"));
}

#[tokio::test]
async fn unreachable_server_maps_to_http() {
    // Port 9 (discard) on localhost is closed in test environments.
    let config = SearchConfig {
        endpoint: "http://127.0.0.1:9/w/api.php".into(),
        timeout_ms: 1_000,
        ..Default::default()
    };
    let client = WikipediaClient::new(&config).expect("client");
    let err = client.search("xyz").await.unwrap_err();
    assert!(
        matches!(err, SearchError::Http(_) | SearchError::Timeout(_)),
        "got {err:?}"
    );
    assert!(!err.to_string().is_empty());
}
