//! Seam traits for the discharge orchestrator.
//!
//! - `TaskSelector`: picks which open checklist task an assist advances
//! - `AgentRouter`: maps an action to the agent role that should take it
//! - `ActivityLog`: append-only sink for completed actions
//!
//! The orchestrator owns one of each. Swapping implementations changes
//! policy (random vs. deterministic selection, configured routes, hashed
//! vs. plain logs) without touching the assist/bulk algorithms.

use std::sync::Arc;

use vheal_contracts::{
    action::{ActionKind, Route},
    activity::ActivityEntry,
    checklist::DischargeTask,
    error::DischargeResult,
};

/// Chooses one task out of a patient's incomplete tasks.
pub trait TaskSelector: Send {
    /// Return one element of `incomplete`.
    ///
    /// The orchestrator only calls this with a non-empty slice and rejects
    /// any returned task that is not in it.
    fn select(&mut self, incomplete: &[DischargeTask]) -> Option<DischargeTask>;

    /// Short policy name for logs.
    fn name(&self) -> &'static str;
}

/// Decides which agent role serves an action.
pub trait AgentRouter: Send + Sync {
    fn route(&self, action: ActionKind) -> Route;
}

/// The activity log: the chronological record of agent actions.
///
/// Implementations must treat `append` as append-only. Entries written
/// here are never modified or removed by the engine.
pub trait ActivityLog: Send + Sync {
    /// Append one entry.
    fn append(&self, entry: &ActivityEntry) -> DischargeResult<()>;

    /// All entries in chronological order.
    fn entries(&self) -> DischargeResult<Vec<ActivityEntry>>;
}

/// Lets a caller keep an `Arc` for reading while the orchestrator owns a
/// boxed clone.
impl<T: ActivityLog + ?Sized> ActivityLog for Arc<T> {
    fn append(&self, entry: &ActivityEntry) -> DischargeResult<()> {
        self.as_ref().append(entry)
    }

    fn entries(&self) -> DischargeResult<Vec<ActivityEntry>> {
        self.as_ref().entries()
    }
}
