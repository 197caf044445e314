//! Chained activity events and the exported log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vheal_contracts::activity::ActivityEntry;

/// One `ActivityEntry` at its position in the hash chain.
///
/// Editing any field of `entry` changes its hash, which breaks `this_hash`
/// and the `prev_hash` of every later event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// Position in the chain, starting at 0.
    pub sequence: u64,

    pub entry: ActivityEntry,

    /// `this_hash` of the previous event, or `GENESIS_HASH` for the first.
    pub prev_hash: String,

    /// SHA-256 (hex) over (sequence, prev_hash, entry JSON).
    pub this_hash: String,
}

impl ActivityEvent {
    /// The `prev_hash` of the first event in every chain: 64 hex zeros.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// A point-in-time export of the whole log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityExport {
    /// Every event in chain order.
    pub events: Vec<ActivityEvent>,

    pub exported_at: DateTime<Utc>,

    /// `this_hash` of the last event; empty when the log is empty.
    pub head_hash: String,
}
