//! In-memory implementation of `ActivityLog`.
//!
//! `InMemoryActivityLog` keeps the chain in a `Vec` behind a `Mutex`, so
//! the orchestrator can append through a shared reference and a renderer
//! holding an `Arc` can read or export at any time.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use tracing::debug;

use vheal_contracts::{
    activity::ActivityEntry,
    error::{DischargeError, DischargeResult},
};
use vheal_core::traits::ActivityLog;

use crate::{
    chain::{hash_entry, verify_chain},
    event::{ActivityEvent, ActivityExport},
};

// ── Internal mutable state ────────────────────────────────────────────────────

pub(crate) struct ChainState {
    pub(crate) events: Vec<ActivityEvent>,
    /// `this_hash` of the last event, or `GENESIS_HASH` before the first.
    pub(crate) last_hash: String,
}

// ── Public log ────────────────────────────────────────────────────────────────

/// An in-memory, append-only activity log backed by a SHA-256 hash chain.
pub struct InMemoryActivityLog {
    pub(crate) state: Mutex<ChainState>,
}

impl InMemoryActivityLog {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ChainState {
                events: Vec::new(),
                last_hash: ActivityEvent::GENESIS_HASH.to_string(),
            }),
        }
    }

    /// Number of entries written so far.
    pub fn len(&self) -> DischargeResult<usize> {
        Ok(self.lock()?.events.len())
    }

    pub fn is_empty(&self) -> DischargeResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Export every event written so far.
    pub fn export(&self) -> DischargeResult<ActivityExport> {
        let state = self.lock()?;
        Ok(ActivityExport {
            events: state.events.clone(),
            exported_at: Utc::now(),
            head_hash: state
                .events
                .last()
                .map(|e| e.this_hash.clone())
                .unwrap_or_default(),
        })
    }

    /// True if the in-memory chain has not been tampered with.
    ///
    /// A poisoned lock is an error, not a broken chain.
    pub fn verify_integrity(&self) -> DischargeResult<bool> {
        Ok(verify_chain(&self.lock()?.events))
    }

    fn lock(&self) -> DischargeResult<MutexGuard<'_, ChainState>> {
        self.state.lock().map_err(|e| DischargeError::ActivityWriteFailed {
            reason: format!("activity log lock poisoned: {}", e),
        })
    }
}

impl Default for InMemoryActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

// ── ActivityLog impl ──────────────────────────────────────────────────────────

impl ActivityLog for InMemoryActivityLog {
    /// Hash `entry` onto the end of the chain.
    fn append(&self, entry: &ActivityEntry) -> DischargeResult<()> {
        let mut state = self.lock()?;

        let sequence = state.events.len() as u64;
        let prev_hash = state.last_hash.clone();
        let this_hash = hash_entry(sequence, entry, &prev_hash)?;

        debug!(
            sequence,
            actor = %entry.actor.name(),
            action = %entry.action,
            "activity appended"
        );

        state.events.push(ActivityEvent {
            sequence,
            entry: entry.clone(),
            prev_hash,
            this_hash: this_hash.clone(),
        });
        state.last_hash = this_hash;
        Ok(())
    }

    fn entries(&self) -> DischargeResult<Vec<ActivityEntry>> {
        let state = self.lock()?;
        Ok(state.events.iter().map(|e| e.entry.clone()).collect())
    }
}
