//! Trailing-edge debounce driven by the event loop.

use std::time::{Duration, Instant};

/// Holds the latest value until it has been left alone for the delay.
///
/// Time is passed in rather than read, so the loop decides when to look
/// and tests can step through time without sleeping.
#[derive(Debug)]
pub struct Debouncer<T> {
    pending: Option<(T, Instant)>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> Debouncer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any pending value and restarts the quiet period.
    pub fn schedule(&mut self, value: T, delay: Duration, now: Instant) {
        self.pending = Some((value, now + delay));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the pending value once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }
}
