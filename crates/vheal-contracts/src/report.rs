//! Operation results and the read-only snapshot handed to renderers.

use serde::{Deserialize, Serialize};

use crate::{
    activity::ActivityEntry,
    agent::Agent,
    checklist::DischargeTask,
    patient::{Patient, PatientId},
};

/// What a single `assist` call did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistOutcome {
    pub patient_id: PatientId,
    /// The task that was completed, or `None` if the checklist was already
    /// complete.
    pub task_completed: Option<DischargeTask>,
    pub new_completion_pct: u8,
    /// The agent that did the work; `None` when no task was open.
    pub agent_name: Option<String>,
}

/// What a single `run_bulk` call did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkOutcome {
    pub agent_name: String,
    pub description: String,
}

/// Headline dashboard numbers derived from registry and pool state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub total_patients: usize,
    pub ready_for_discharge: usize,
    /// Mean checklist completion across all patients; 0 when there are none.
    pub average_completion: f64,
    /// Agents currently able to take work (Idle or Active).
    pub ready_agents: usize,
}

/// A consistent, read-only view of the whole engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub patients: Vec<Patient>,
    pub agents: Vec<Agent>,
    /// Activity log in chronological order.
    pub log: Vec<ActivityEntry>,
    pub metrics: Metrics,
}

impl Snapshot {
    /// The newest `n` log entries, newest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &ActivityEntry> {
        self.log.iter().rev().take(n)
    }

    pub fn patient(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id.as_str() == id)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
