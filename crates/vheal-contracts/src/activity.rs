//! Activity log entries.
//!
//! `ActivityEntry` is what the orchestrator appends after every assist or
//! bulk action. Entries are immutable once written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{agent::AgentId, patient::PatientId};

/// Who performed a logged action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Actor {
    /// A pool agent did the work.
    Agent { id: AgentId, name: String },
    /// The orchestrator recorded the entry without acquiring an agent,
    /// e.g. an assist on a patient whose checklist is already complete.
    Orchestrator,
}

impl Actor {
    /// Display name for the actor.
    pub fn name(&self) -> &str {
        match self {
            Actor::Agent { name, .. } => name,
            Actor::Orchestrator => "Orchestrator",
        }
    }
}

/// Result of a logged action. Actions are synchronous and either fully
/// apply or are rejected before logging, so only `Completed` is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityOutcome {
    Completed,
}

/// One immutable line of the activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Wall-clock time the action completed (UTC).
    pub timestamp: DateTime<Utc>,
    pub actor: Actor,
    /// The patient the action concerned; absent for bulk actions.
    pub patient_id: Option<PatientId>,
    /// Human-readable description, e.g. "Completed Lab Results for PT002".
    pub action: String,
    pub outcome: ActivityOutcome,
}

impl ActivityEntry {
    /// A completed entry stamped with the current time.
    pub fn completed(
        actor: Actor,
        patient_id: Option<PatientId>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            actor,
            patient_id,
            action: action.into(),
            outcome: ActivityOutcome::Completed,
        }
    }
}
