//! wiki-widget: a debounced, cancellable Wikipedia search box.
//!
//! Raw input flows through the pipeline:
//! Input → Debouncer → Query controller → Display state → Presenter
//!
//! # Architecture
//!
//! - **Debouncer**: publishes the input only after it has been quiet for the
//!   configured delay
//! - **Query controller**: validates each stable query, cancels the previous
//!   request and maps outcomes to a display state
//! - **Session**: the single event loop that owns both and drives the presenter
//! - **Presenter**: renders each display state (terminal text or JSON lines)
//!
//! Searching itself lives in the `wiki-search` crate.

pub mod config;
pub mod controller;
pub mod debounce;
pub mod display;
pub mod error;
pub mod presenter;
pub mod session;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::WidgetConfig;
pub use controller::{Completion, Phase, QueryController};
pub use debounce::Debouncer;
pub use display::DisplayState;
pub use error::{Result, WidgetError};
pub use presenter::{JsonPresenter, Presenter, TerminalPresenter};
pub use session::Session;
