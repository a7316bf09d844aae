//! Display state handed to the presentation layer.
//!
//! Exactly one [`DisplayState`] is visible at a time, so a presenter can
//! never show a spinner, an error and a result list together.

use serde::Serialize;
use wiki_search::SearchHit;

/// What the search box should show right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum DisplayState {
    /// Nothing searched yet, or the query is too short.
    Idle,
    /// A request for the current query is in flight.
    Loading,
    /// The last request failed; carries a human-readable message.
    Error(String),
    /// Hits for the current query, in server order.
    Results(Vec<SearchHit>),
    /// The current query was searched and nothing matched.
    Empty,
}

impl DisplayState {
    /// Derive the visible state from controller state.
    ///
    /// Precedence: loading, then error, then empty, then results.
    /// `searchable` tells whether the stable query passed validation.
    pub fn derive(
        searchable: bool,
        loading: bool,
        error: Option<&str>,
        results: &[SearchHit],
    ) -> Self {
        if loading {
            Self::Loading
        } else if let Some(message) = error {
            Self::Error(message.to_owned())
        } else if results.is_empty() {
            if searchable {
                Self::Empty
            } else {
                Self::Idle
            }
        } else {
            Self::Results(results.to_vec())
        }
    }

    /// Stable lowercase name of the state, for logs.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Error(_) => "error",
            Self::Results(_) => "results",
            Self::Empty => "empty",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiki_search::Snippet;

    fn hits(titles: &[&str]) -> Vec<SearchHit> {
        titles
            .iter()
            .enumerate()
            .map(|(i, t)| SearchHit {
                page_id: i as u64 + 1,
                title: (*t).to_owned(),
                snippet: Snippet::default(),
            })
            .collect()
    }

    #[test]
    fn loading_wins_over_everything() {
        let state = DisplayState::derive(true, true, Some("boom"), &hits(&["Cat"]));
        assert_eq!(state, DisplayState::Loading);
    }

    #[test]
    fn error_wins_over_results() {
        let state = DisplayState::derive(true, false, Some("boom"), &hits(&["Cat"]));
        assert_eq!(state, DisplayState::Error("boom".into()));
    }

    #[test]
    fn searched_with_no_hits_is_empty() {
        let state = DisplayState::derive(true, false, None, &[]);
        assert_eq!(state, DisplayState::Empty);
    }

    #[test]
    fn unsearchable_with_no_hits_is_idle() {
        let state = DisplayState::derive(false, false, None, &[]);
        assert_eq!(state, DisplayState::Idle);
    }

    #[test]
    fn hits_are_results() {
        let state = DisplayState::derive(true, false, None, &hits(&["Cat", "Catalan"]));
        match state {
            DisplayState::Results(list) => {
                assert_eq!(list.len(), 2);
                assert_eq!(list[1].title, "Catalan");
            }
            other => panic!("expected results, got {other:?}"),
        }
    }

    #[test]
    fn tags_are_distinct() {
        let all = [
            DisplayState::Idle,
            DisplayState::Loading,
            DisplayState::Error(String::new()),
            DisplayState::Results(vec![]),
            DisplayState::Empty,
        ];
        let mut tags: Vec<&str> = all.iter().map(DisplayState::tag).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), 5);
    }

    #[test]
    fn serializes_with_state_tag() {
        let json = serde_json::to_value(DisplayState::Error("offline".into())).expect("serialize");
        assert_eq!(json["state"], "error");
        assert_eq!(json["data"], "offline");

        let json = serde_json::to_value(DisplayState::Empty).expect("serialize");
        assert_eq!(json["state"], "empty");
    }
}
