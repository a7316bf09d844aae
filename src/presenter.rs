//! Presentation layer: maps each [`DisplayState`] to visible output.
//!
//! The session calls [`Presenter::present`] after every state transition;
//! the presenter owns how and when that becomes output.

use std::io::Write;

use wiki_search::{SearchHit, Snippet};

use crate::display::DisplayState;
use crate::error::Result;

/// Marker placed around highlighted snippet terms in plain-text output.
const HIGHLIGHT_MARK: &str = "*";

/// Receives display states from the session.
pub trait Presenter {
    /// Show `state`, replacing whatever was shown before.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn present(&mut self, state: &DisplayState) -> Result<()>;
}

/// Human-readable line output for a terminal.
pub struct TerminalPresenter<W> {
    out: W,
    link_base: Option<String>,
}

impl<W: Write> TerminalPresenter<W> {
    /// Write rendered states to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            link_base: None,
        }
    }

    /// Print an article link under each hit, derived from `endpoint`.
    pub fn with_links(mut self, endpoint: impl Into<String>) -> Self {
        self.link_base = Some(endpoint.into());
        self
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn present(&mut self, state: &DisplayState) -> Result<()> {
        let text = render_text(state, self.link_base.as_deref());
        if !text.is_empty() {
            writeln!(self.out, "{text}")?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Render a state as plain text. Idle renders as an empty string.
pub fn render_text(state: &DisplayState, link_base: Option<&str>) -> String {
    match state {
        DisplayState::Idle => String::new(),
        DisplayState::Loading => "Loading...".to_owned(),
        DisplayState::Error(message) => message.clone(),
        DisplayState::Empty => "No results found.".to_owned(),
        DisplayState::Results(hits) => hits
            .iter()
            .enumerate()
            .map(|(i, hit)| render_hit(i + 1, hit, link_base))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn render_hit(rank: usize, hit: &SearchHit, link_base: Option<&str>) -> String {
    let mut text = format!("{rank}. {}", hit.title);
    if !hit.snippet.is_empty() {
        text.push_str("\n   ");
        text.push_str(&render_snippet(&hit.snippet));
    }
    if let Some(url) = link_base.and_then(|base| hit.article_url(base)) {
        text.push_str("\n   ");
        text.push_str(&url);
    }
    text
}

fn render_snippet(snippet: &Snippet) -> String {
    snippet
        .segments
        .iter()
        .map(|seg| {
            if seg.highlighted {
                format!("{HIGHLIGHT_MARK}{}{HIGHLIGHT_MARK}", seg.text)
            } else {
                seg.text.clone()
            }
        })
        .collect()
}

/// Newline-delimited JSON output, one serialized [`DisplayState`] per line.
///
/// For driving the widget from another process.
pub struct JsonPresenter<W> {
    out: W,
}

impl<W: Write> JsonPresenter<W> {
    /// Write JSON lines to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for JsonPresenter<W> {
    fn present(&mut self, state: &DisplayState) -> Result<()> {
        serde_json::to_writer(&mut self.out, state).map_err(std::io::Error::from)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}
