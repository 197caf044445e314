//! Action kinds the orchestrator can be asked to perform.
//!
//! `ActionKind` is what routing rules match on. Bulk actions are the subset
//! that are not tied to one patient.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{agent::AgentRole, error::DischargeError};

/// A fleet-level action that is logged rather than applied to a patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BulkAction {
    SummaryGeneration,
    StaffCoordination,
    NotificationDispatch,
}

impl BulkAction {
    pub const ALL: [BulkAction; 3] = [
        BulkAction::SummaryGeneration,
        BulkAction::StaffCoordination,
        BulkAction::NotificationDispatch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BulkAction::SummaryGeneration => "summary-generation",
            BulkAction::StaffCoordination => "staff-coordination",
            BulkAction::NotificationDispatch => "notification-dispatch",
        }
    }

    /// The activity-log description recorded when this action completes.
    pub fn description(&self) -> &'static str {
        match self {
            BulkAction::SummaryGeneration => {
                "Discharge summary generated and sent to physician for review"
            }
            BulkAction::StaffCoordination => {
                "Notifications sent to nursing, pharmacy, and transport teams"
            }
            BulkAction::NotificationDispatch => {
                "SMS and email notifications sent to relevant staff members"
            }
        }
    }
}

impl fmt::Display for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BulkAction {
    type Err = DischargeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BulkAction::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| DischargeError::ConfigError {
                reason: format!("unknown bulk action '{}'", s),
            })
    }
}

/// Every action an agent can be routed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    /// Advance one checklist task for one patient.
    Assist,
    SummaryGeneration,
    StaffCoordination,
    NotificationDispatch,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Assist => "assist",
            ActionKind::SummaryGeneration => "summary-generation",
            ActionKind::StaffCoordination => "staff-coordination",
            ActionKind::NotificationDispatch => "notification-dispatch",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = DischargeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ActionKind::Assist.as_str() {
            return Ok(ActionKind::Assist);
        }
        s.parse::<BulkAction>().map(ActionKind::from).map_err(|_| DischargeError::ConfigError {
            reason: format!("unknown action '{}'", s),
        })
    }
}

impl From<BulkAction> for ActionKind {
    fn from(action: BulkAction) -> Self {
        match action {
            BulkAction::SummaryGeneration => ActionKind::SummaryGeneration,
            BulkAction::StaffCoordination => ActionKind::StaffCoordination,
            BulkAction::NotificationDispatch => ActionKind::NotificationDispatch,
        }
    }
}

/// Where an action should be sent: the preferred role, and whether any
/// ready agent may take it when no agent with that role is ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub role: AgentRole,
    pub allow_fallback: bool,
}
