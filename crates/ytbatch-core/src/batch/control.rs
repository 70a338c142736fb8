//! Batch cancellation: a shared token checked between worker dispatches.

use std::sync::atomic::{AtomicBool, Ordering};

/// Cancellation token for one batch run.
///
/// Best-effort semantics: the coordinator checks the token before each
/// dispatch, never inside a worker. Fetches already handed to the engine run
/// to completion; links not yet dispatched are skipped.
#[derive(Debug, Default)]
pub struct BatchControl {
    cancelled: AtomicBool,
}

impl BatchControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation of all not-yet-dispatched work.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
