//! Agent identity, role and status types.
//!
//! Agents are the workers that advance discharge checklists. Their status is
//! an explicit state machine (`Idle`/`Active` → `Processing` → `Active`);
//! the transitions themselves are enforced by the agent pool in vheal-core.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{action::BulkAction, checklist::DischargeTask, patient::PatientId};

/// Unique identifier for one agent, generated when the roster is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub uuid::Uuid);

impl AgentId {
    /// Create a new, unique agent ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for AgentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// What kind of work an agent is responsible for.
///
/// Roles are matched against routes when the orchestrator picks an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentRole {
    SummaryGeneration,
    StaffCoordination,
    ChecklistMonitoring,
    NotificationManagement,
}

impl AgentRole {
    /// Human-readable role description shown alongside the agent name.
    pub fn label(&self) -> &'static str {
        match self {
            AgentRole::SummaryGeneration => "Discharge Summary Generation",
            AgentRole::StaffCoordination => "Staff Coordination",
            AgentRole::ChecklistMonitoring => "Task Completion Monitoring",
            AgentRole::NotificationManagement => "Notification Management",
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle state of an agent.
///
/// There is no terminal state: agents cycle between `Active` and
/// `Processing` for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    /// Never assigned since the pool was created. Ready for work.
    Idle,
    /// No current assignment. Ready for work.
    Active,
    /// Holding exactly one assignment.
    Processing,
}

impl AgentStatus {
    /// True if an agent in this state may accept a new assignment.
    pub fn is_ready(&self) -> bool {
        matches!(self, AgentStatus::Idle | AgentStatus::Active)
    }
}

/// The unit of work an agent is holding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkItem {
    /// One checklist task for one patient.
    Checklist {
        patient_id: PatientId,
        task: DischargeTask,
    },
    /// A fleet-level action not attributable to a single patient.
    Bulk { action: BulkAction },
}

impl WorkItem {
    /// The patient this work is scoped to, if any.
    pub fn patient_id(&self) -> Option<&PatientId> {
        match self {
            WorkItem::Checklist { patient_id, .. } => Some(patient_id),
            WorkItem::Bulk { .. } => None,
        }
    }
}

impl fmt::Display for WorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkItem::Checklist { patient_id, task } => write!(f, "{} for {}", task, patient_id),
            WorkItem::Bulk { action } => write!(f, "{}", action),
        }
    }
}

/// An agent's current assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub work: WorkItem,
    pub started_at: DateTime<Utc>,
}

/// One worker in the agent pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub role: AgentRole,
    pub status: AgentStatus,
    /// Present exactly when `status` is `Processing`.
    pub current_assignment: Option<Assignment>,
    /// Monotonically increasing count of finished assignments.
    pub tasks_completed: u64,
    pub created_at: DateTime<Utc>,
}

impl Agent {
    /// Create an `Idle` agent with a fresh id.
    pub fn new(name: impl Into<String>, role: AgentRole) -> Self {
        Self {
            id: AgentId::new(),
            name: name.into(),
            role,
            status: AgentStatus::Idle,
            current_assignment: None,
            tasks_completed: 0,
            created_at: Utc::now(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status.is_ready()
    }
}

/// One roster line: the name and role of an agent to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSpec {
    pub name: String,
    pub role: AgentRole,
}

impl AgentSpec {
    pub fn new(name: impl Into<String>, role: AgentRole) -> Self {
        Self { name: name.into(), role }
    }
}
