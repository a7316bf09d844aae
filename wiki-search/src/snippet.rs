//! Highlighted snippet parsing.
//!
//! The search API returns each snippet as an HTML fragment in which the
//! matched terms are wrapped in `<span class="searchmatch">`. This module
//! turns that fragment into ordered plain-text segments so presenters can
//! render the highlighting without handling markup themselves.

use scraper::Html;
use serde::{Deserialize, Serialize};

/// CSS class the API puts on spans wrapping matched terms.
const MATCH_CLASS: &str = "searchmatch";

/// One run of snippet text, either matched or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetSegment {
    /// Text with markup removed and entities decoded.
    pub text: String,
    /// Whether this run is a search match.
    pub highlighted: bool,
}

/// A parsed snippet: an ordered list of segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    /// Segments in document order. Adjacent segments never share the same
    /// `highlighted` flag.
    pub segments: Vec<SnippetSegment>,
}

impl Snippet {
    /// Parse an HTML snippet fragment.
    ///
    /// Unknown tags are dropped but their text is kept. Malformed markup is
    /// tolerated the way a browser would tolerate it.
    pub fn parse(html: &str) -> Self {
        let fragment = Html::parse_fragment(html);
        let mut segments: Vec<SnippetSegment> = Vec::new();

        for node in fragment.root_element().descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            let text: &str = text;
            if text.is_empty() {
                continue;
            }
            let highlighted = node.ancestors().any(|ancestor| {
                ancestor.value().as_element().is_some_and(|el| {
                    el.name() == "span" && el.classes().any(|c| c == MATCH_CLASS)
                })
            });

            match segments.last_mut() {
                Some(last) if last.highlighted == highlighted => last.text.push_str(text),
                _ => segments.push(SnippetSegment {
                    text: text.to_owned(),
                    highlighted,
                }),
            }
        }

        Self { segments }
    }

    /// The snippet as plain text with highlighting dropped.
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// The matched terms in order of appearance.
    pub fn matches(&self) -> impl Iterator<Item = &str> {
        self.segments
            .iter()
            .filter(|s| s.highlighted)
            .map(|s| s.text.as_str())
    }

    /// Whether the snippet has no text at all.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
