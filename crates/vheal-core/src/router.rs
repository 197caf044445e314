//! The built-in action → role mapping.

use vheal_contracts::{
    action::{ActionKind, Route},
    agent::AgentRole,
};

use crate::traits::AgentRouter;

/// Routes every action to its natural role, with fallback to any ready
/// agent.
///
/// | action                  | role                     |
/// |-------------------------|--------------------------|
/// | `assist`                | `ChecklistMonitoring`    |
/// | `summary-generation`    | `SummaryGeneration`      |
/// | `staff-coordination`    | `StaffCoordination`      |
/// | `notification-dispatch` | `NotificationManagement` |
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRouter;

impl StandardRouter {
    pub fn route_for(action: ActionKind) -> Route {
        let role = match action {
            ActionKind::Assist => AgentRole::ChecklistMonitoring,
            ActionKind::SummaryGeneration => AgentRole::SummaryGeneration,
            ActionKind::StaffCoordination => AgentRole::StaffCoordination,
            ActionKind::NotificationDispatch => AgentRole::NotificationManagement,
        };
        Route { role, allow_fallback: true }
    }
}

impl AgentRouter for StandardRouter {
    fn route(&self, action: ActionKind) -> Route {
        Self::route_for(action)
    }
}
