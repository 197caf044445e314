//! Hash-chain primitives for the activity log.
//!
//! Hash input layout (bytes, in order):
//!   1. sequence as 8-byte little-endian
//!   2. prev_hash as UTF-8 bytes (64 ASCII hex chars)
//!   3. compact JSON of the entry

use sha2::{Digest, Sha256};

use vheal_contracts::{
    activity::ActivityEntry,
    error::{DischargeError, DischargeResult},
};

use crate::event::ActivityEvent;

/// Compute the SHA-256 hash of one chained entry.
///
/// Returns a lowercase 64-character hex string.
pub fn hash_entry(sequence: u64, entry: &ActivityEntry, prev_hash: &str) -> DischargeResult<String> {
    let entry_json = serde_json::to_vec(entry).map_err(|e| DischargeError::ActivityWriteFailed {
        reason: format!("entry {} is not serializable: {}", sequence, e),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(&entry_json);

    Ok(hex::encode(hasher.finalize()))
}

/// Verify a chain of activity events.
///
/// Valid when every event's `prev_hash` is the previous event's `this_hash`
/// (`GENESIS_HASH` for the first), every `this_hash` matches the recomputed
/// hash, and sequence numbers run 0, 1, 2, … without gaps. An empty chain
/// is valid.
pub fn verify_chain(events: &[ActivityEvent]) -> bool {
    let mut expected_prev = ActivityEvent::GENESIS_HASH.to_string();

    for (position, event) in events.iter().enumerate() {
        if event.sequence != position as u64 || event.prev_hash != expected_prev {
            return false;
        }

        match hash_entry(event.sequence, &event.entry, &event.prev_hash) {
            Ok(recomputed) if recomputed == event.this_hash => {}
            _ => return false,
        }

        expected_prev = event.this_hash.clone();
    }

    true
}
