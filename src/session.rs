//! The session event loop.
//!
//! [`Session::run`] is the single owner of the debouncer and the query
//! controller. It reacts to four event sources with `tokio::select!`:
//!
//! 1. cancellation (teardown)
//! 2. raw input values
//! 3. fetch completions
//! 4. debounce publishes
//!
//! and hands every new display state to the [`Presenter`]. A debounce
//! publish that trims to the previous stable query is ignored. All state
//! mutation happens on this loop, so no locks are needed.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};
use wiki_search::SearchBackend;

use crate::config::WidgetConfig;
use crate::controller::{Completion, QueryController};
use crate::debounce::Debouncer;
use crate::display::DisplayState;
use crate::error::Result;
use crate::presenter::Presenter;

/// One search box: input in, display states out.
pub struct Session<B, P> {
    debouncer: Debouncer<String>,
    controller: QueryController<B>,
    completions: mpsc::UnboundedReceiver<Completion>,
    presenter: P,
    /// Last stable query handed to the controller, trimmed.
    stable_query: String,
    last_published: Option<DisplayState>,
}

impl<B: SearchBackend + 'static, P: Presenter> Session<B, P> {
    /// Create a session searching `backend` and rendering to `presenter`.
    pub fn new(backend: Arc<B>, config: &WidgetConfig, presenter: P) -> Self {
        let (controller, completions) = QueryController::new(backend, config.min_query_len);
        Self {
            debouncer: Debouncer::new(String::new(), config.debounce_delay()),
            controller,
            completions,
            presenter,
            stable_query: String::new(),
            last_published: None,
        }
    }

    /// Run until `cancel` fires, or until `input` closes and the last value
    /// has been debounced and fetched.
    ///
    /// Each item on `input` is the full current query value. On return the
    /// pending debounce is discarded and any in-flight request cancelled; the
    /// presenter is handed back.
    ///
    /// # Errors
    ///
    /// Returns an error if the presenter fails to write.
    pub async fn run(
        mut self,
        mut input: mpsc::Receiver<String>,
        cancel: CancellationToken,
    ) -> Result<P> {
        info!(
            debounce_ms = self.debouncer.delay().as_millis() as u64,
            "search session started"
        );
        self.publish(self.controller.display_state())?;

        let mut input_open = true;
        loop {
            if !input_open && !self.debouncer.is_pending() && !self.controller.is_loading() {
                info!("input closed, session drained");
                break;
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("search session cancelled");
                    break;
                }
                value = input.recv(), if input_open => match value {
                    Some(value) => {
                        trace!(value = %value, "input changed");
                        self.debouncer.push(value);
                    }
                    None => {
                        debug!("input closed, draining");
                        input_open = false;
                    }
                },
                Some(completion) = self.completions.recv() => {
                    if let Some(state) = self.controller.on_completion(completion) {
                        self.publish(state)?;
                    }
                }
                stable = self.debouncer.ready() => {
                    if stable.trim() == self.stable_query {
                        trace!("stable query unchanged");
                    } else {
                        trace!(query = %stable, "stable query");
                        let state = self.controller.on_stable_query_change(&stable);
                        self.stable_query = stable.trim().to_owned();
                        self.publish(state)?;
                    }
                }
            }
        }

        self.debouncer.cancel();
        self.controller.shutdown();
        Ok(self.presenter)
    }

    /// Hand `state` to the presenter unless it is already showing.
    fn publish(&mut self, state: DisplayState) -> Result<()> {
        if self.last_published.as_ref() == Some(&state) {
            return Ok(());
        }
        debug!(state = state.tag(), "display state changed");
        self.presenter.present(&state)?;
        self.last_published = Some(state);
        Ok(())
    }
}
