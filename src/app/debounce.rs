//! Re-armable quiescence timer owned by the store.
//!
//! Zellij timers fire exactly once and cannot be cancelled, so the debouncer
//! hands out a generation for every arm. The host echoes that generation back
//! when its timer fires; only the newest generation still pending is honoured.
//! Re-arming therefore cancels the previous window without touching the host.

use std::time::Duration;

/// Quiet period after the last triggering change before the derivation runs.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    window: Duration,
    generation: u64,
    pending: Option<u64>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_WINDOW)
    }
}

impl Debouncer {
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            generation: 0,
            pending: None,
        }
    }

    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Starts a new window, superseding any window still pending.
    ///
    /// Returns the generation the host must report back when its timer fires.
    pub fn arm(&mut self) -> u64 {
        self.generation += 1;
        self.pending = Some(self.generation);
        tracing::trace!(generation = self.generation, "debounce armed");
        self.generation
    }

    /// Consumes a timer expiry.
    ///
    /// Returns `true` only for the generation of the most recent arm, and only
    /// once. Expiries of superseded windows return `false`.
    pub fn fire(&mut self, generation: u64) -> bool {
        if self.pending == Some(generation) {
            self.pending = None;
            true
        } else {
            tracing::trace!(generation, pending = ?self.pending, "stale debounce expiry");
            false
        }
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
