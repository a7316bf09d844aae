//! Shared test utilities used across multiple test modules.
//!
//! A scripted search backend with per-query latency, and a presenter that
//! records every state it is shown.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use wiki_search::{SearchBackend, SearchError, SearchHit, Snippet};

use crate::display::DisplayState;
use crate::presenter::Presenter;

/// Canned reply for one query: how long it takes and what it returns.
#[derive(Clone)]
struct Reply {
    delay: Duration,
    outcome: Result<Vec<&'static str>, &'static str>,
}

/// Backend that answers from a script and records every query it sees.
///
/// Unscripted queries succeed immediately with no hits.
#[derive(Default)]
pub struct ScriptedBackend {
    replies: HashMap<&'static str, Reply>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    /// Answer `query` with hits titled `titles` after `delay_ms`.
    pub fn reply(mut self, query: &'static str, delay_ms: u64, titles: Vec<&'static str>) -> Self {
        self.replies.insert(
            query,
            Reply {
                delay: Duration::from_millis(delay_ms),
                outcome: Ok(titles),
            },
        );
        self
    }

    /// Fail `query` with an HTTP error carrying `message` after `delay_ms`.
    pub fn fail(mut self, query: &'static str, delay_ms: u64, message: &'static str) -> Self {
        self.replies.insert(
            query,
            Reply {
                delay: Duration::from_millis(delay_ms),
                outcome: Err(message),
            },
        );
        self
    }

    /// Queries received so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl SearchBackend for ScriptedBackend {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        self.calls.lock().expect("calls lock").push(query.to_owned());
        let reply = self.replies.get(query).cloned().unwrap_or(Reply {
            delay: Duration::ZERO,
            outcome: Ok(vec![]),
        });
        tokio::time::sleep(reply.delay).await;
        match reply.outcome {
            Ok(titles) => Ok(titles.into_iter().map(hit).collect()),
            Err(message) => Err(SearchError::Http(message.to_owned())),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// A hit with the given title and no snippet.
pub fn hit(title: &str) -> SearchHit {
    SearchHit {
        page_id: title.len() as u64,
        title: title.to_owned(),
        snippet: Snippet::default(),
    }
}

/// Titles of a results state; panics on any other state.
pub fn titles(state: &DisplayState) -> Vec<String> {
    match state {
        DisplayState::Results(hits) => hits.iter().map(|h| h.title.clone()).collect(),
        other => panic!("expected results, got {other:?}"),
    }
}

/// Presenter that keeps every state it is shown.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub states: Vec<DisplayState>,
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, state: &DisplayState) -> crate::error::Result<()> {
        self.states.push(state.clone());
        Ok(())
    }
}
