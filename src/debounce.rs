//! Delay-based input debouncing.
//!
//! [`Debouncer`] turns a rapidly-changing value into a stable value that is
//! only published after the input has been quiet for the configured delay.
//! Intermediate values are never published.
//!
//! # Design
//!
//! The debouncer holds a deadline, not a timer task. [`Debouncer::ready`]
//! sleeps until that deadline and is cancel-safe, so it can sit in a
//! `tokio::select!` loop next to the input channel: every
//! [`push`](Debouncer::push) simply moves the deadline, which discards the
//! previous timer without it ever firing. Teardown is [`Debouncer::cancel`]
//! (or dropping the debouncer); there is no background task left to fire
//! after disposal.

use std::time::Duration;
use tokio::time::Instant;

/// Collapses bursts of changes into a single publish after a quiet period.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    /// Most recent raw value.
    latest: T,
    /// Last published value.
    stable: T,
    /// When `latest` becomes publishable, if a change is pending.
    deadline: Option<Instant>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    /// Create a debouncer whose stable value starts at `initial`.
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            delay,
            latest: initial.clone(),
            stable: initial,
            deadline: None,
        }
    }

    /// Record a new raw value and restart the quiet-period timer.
    ///
    /// A value equal to the latest raw value is not a change and leaves the
    /// timer alone. Returns whether the timer was restarted.
    pub fn push(&mut self, value: T) -> bool {
        if value == self.latest {
            return false;
        }
        self.latest = value;
        self.deadline = Some(Instant::now() + self.delay);
        true
    }

    /// Wait for the quiet period to end and return the published value.
    ///
    /// Pends forever while nothing is pending. The published value may equal
    /// the previous one (a change that was typed and then undone); callers
    /// that only care about changes compare against [`stable`](Self::stable)
    /// before calling.
    ///
    /// # Cancel safety
    ///
    /// This method is cancel-safe. State only changes once the deadline has
    /// passed, so dropping the future early loses nothing.
    pub async fn ready(&mut self) -> T {
        match self.deadline {
            Some(deadline) => {
                tokio::time::sleep_until(deadline).await;
                self.deadline = None;
                self.stable = self.latest.clone();
                self.stable.clone()
            }
            None => std::future::pending().await,
        }
    }

    /// Whether a change is waiting for its quiet period to end.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Last published value.
    pub fn stable(&self) -> &T {
        &self.stable
    }

    /// Most recent raw value.
    pub fn latest(&self) -> &T {
        &self.latest
    }

    /// The configured quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Discard the pending timer without publishing.
    ///
    /// The raw value is rolled back to the stable value so a later push of
    /// the discarded value counts as a change again.
    pub fn cancel(&mut self) {
        if self.deadline.take().is_some() {
            tracing::debug!("pending debounce discarded");
        }
        self.latest = self.stable.clone();
    }
}
