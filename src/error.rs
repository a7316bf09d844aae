//! Error types for the search widget.

use wiki_search::SearchError;

/// Top-level error type for the search widget.
///
/// Search failures inside a running session never surface here; the query
/// controller turns them into [`crate::DisplayState::Error`]. This type
/// covers setup and I/O around the session.
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Search client construction or request error.
    #[error("search error: {0}")]
    Search(#[from] SearchError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, WidgetError>;
