//! Cancellable processing delay.
//!
//! The orchestrator holds each assignment for a configured duration before
//! releasing the agent. A `DelayCancel` handle, obtained before the
//! orchestrator is shared, cuts any current and future waits short without
//! needing the orchestrator lock.

use std::{
    sync::{Arc, Condvar, Mutex},
    time::{Duration, Instant},
};

use tracing::debug;

#[derive(Default)]
struct CancelState {
    cancelled: Mutex<bool>,
    signal: Condvar,
}

/// Handle that stops processing delays from another thread.
#[derive(Clone, Default)]
pub struct DelayCancel {
    state: Arc<CancelState>,
}

impl DelayCancel {
    /// Wake any waiting delay and skip all later ones.
    pub fn cancel(&self) {
        if let Ok(mut cancelled) = self.state.cancelled.lock() {
            *cancelled = true;
        }
        self.state.signal.notify_all();
    }

    /// Re-enable delays after `cancel`.
    pub fn reset(&self) {
        if let Ok(mut cancelled) = self.state.cancelled.lock() {
            *cancelled = false;
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.lock().map(|c| *c).unwrap_or(true)
    }
}

/// A hold of fixed length that a `DelayCancel` can interrupt.
#[derive(Clone, Default)]
pub struct ProcessingDelay {
    duration: Duration,
    cancel: DelayCancel,
}

impl ProcessingDelay {
    pub fn new(duration: Duration) -> Self {
        Self { duration, cancel: DelayCancel::default() }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn cancel_handle(&self) -> DelayCancel {
        self.cancel.clone()
    }

    /// Block for the configured duration, or until cancelled.
    ///
    /// Returns true if the full duration elapsed.
    pub fn wait(&self) -> bool {
        if self.duration.is_zero() {
            return true;
        }
        let deadline = Instant::now() + self.duration;
        let state = &self.cancel.state;
        let Ok(mut cancelled) = state.cancelled.lock() else {
            return false;
        };
        while !*cancelled {
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            cancelled = match state.signal.wait_timeout(cancelled, deadline - now) {
                Ok((guard, _)) => guard,
                Err(_) => return false,
            };
        }
        debug!(delay_ms = self.duration.as_millis() as u64, "processing delay cancelled");
        false
    }
}
