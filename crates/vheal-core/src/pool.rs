//! The agent pool and its state machine.
//!
//! Transitions:
//!
//!   Idle | Active --assign--> Processing --complete--> Active
//!
//! `assign` on a `Processing` agent fails with `AgentBusy`; `complete` on
//! a ready agent fails with `NoActiveAssignment`. There is no terminal
//! state.

use chrono::Utc;
use tracing::{debug, info};

use vheal_contracts::{
    action::Route,
    agent::{Agent, AgentId, AgentSpec, AgentStatus, Assignment, WorkItem},
    error::{DischargeError, DischargeResult},
};

/// A fixed roster of agents in creation order.
#[derive(Debug, Clone, Default)]
pub struct AgentPool {
    agents: Vec<Agent>,
}

impl AgentPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool with one freshly created `Idle` agent per roster line.
    pub fn from_roster(roster: &[AgentSpec]) -> Self {
        let mut pool = Self::new();
        pool.initialize(roster);
        pool
    }

    /// Replace the roster with newly created agents.
    ///
    /// Returns the ids of the new agents in roster order.
    pub fn initialize(&mut self, roster: &[AgentSpec]) -> Vec<AgentId> {
        self.agents = roster
            .iter()
            .map(|spec| Agent::new(spec.name.clone(), spec.role))
            .collect();
        info!(agents = self.agents.len(), "agent pool initialized");
        self.agents.iter().map(|a| a.id).collect()
    }

    pub fn get(&self, id: AgentId) -> DischargeResult<&Agent> {
        self.agents
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| DischargeError::AgentNotFound { agent_id: id.to_string() })
    }

    /// All agents in pool order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn ready_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_ready()).count()
    }

    /// Pick an agent for `route` without changing any state.
    ///
    /// The first ready agent with the routed role wins. If none is ready and
    /// the route allows fallback, the first ready agent of any role is used.
    pub fn select(&self, route: Route) -> Option<AgentId> {
        let preferred = self
            .agents
            .iter()
            .find(|a| a.is_ready() && a.role == route.role);

        let chosen = match preferred {
            Some(agent) => Some(agent),
            None if route.allow_fallback => self.agents.iter().find(|a| a.is_ready()),
            None => None,
        };

        if let Some(agent) = chosen {
            debug!(
                agent = %agent.name,
                role = %agent.role,
                wanted = %route.role,
                "agent selected"
            );
        }
        chosen.map(|a| a.id)
    }

    /// Give `work` to a ready agent: status → `Processing`.
    pub fn assign(&mut self, id: AgentId, work: WorkItem) -> DischargeResult<()> {
        let agent = self.get_mut(id)?;

        if let Some(current) = &agent.current_assignment {
            return Err(DischargeError::AgentBusy {
                agent: agent.name.clone(),
                work: current.work.to_string(),
            });
        }
        if !agent.is_ready() {
            return Err(DischargeError::InvariantViolation {
                reason: format!(
                    "agent '{}' is {:?} without an assignment",
                    agent.name, agent.status
                ),
            });
        }

        debug!(agent = %agent.name, work = %work, "agent assigned");
        agent.current_assignment = Some(Assignment { work, started_at: Utc::now() });
        agent.status = AgentStatus::Processing;
        Ok(())
    }

    /// Finish the agent's assignment: counter + 1, status → `Active`.
    ///
    /// Returns the assignment that was finished.
    pub fn complete(&mut self, id: AgentId) -> DischargeResult<Assignment> {
        let agent = self.get_mut(id)?;

        if agent.status != AgentStatus::Processing {
            return Err(DischargeError::NoActiveAssignment { agent: agent.name.clone() });
        }
        let assignment = agent.current_assignment.take().ok_or_else(|| {
            DischargeError::InvariantViolation {
                reason: format!("agent '{}' is processing without an assignment", agent.name),
            }
        })?;

        agent.tasks_completed += 1;
        agent.status = AgentStatus::Active;
        debug!(
            agent = %agent.name,
            work = %assignment.work,
            tasks_completed = agent.tasks_completed,
            "agent assignment completed"
        );
        Ok(assignment)
    }

    /// Put back an agent taken before a cycle that must be undone.
    pub(crate) fn restore(&mut self, saved: Agent) {
        if let Some(slot) = self.agents.iter_mut().find(|a| a.id == saved.id) {
            debug!(agent = %saved.name, status = ?saved.status, "agent restored");
            *slot = saved;
        }
    }

    fn get_mut(&mut self, id: AgentId) -> DischargeResult<&mut Agent> {
        self.agents
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| DischargeError::AgentNotFound { agent_id: id.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use vheal_contracts::{
        action::BulkAction,
        agent::{AgentRole, AgentSpec, AgentStatus, WorkItem},
        checklist::DischargeTask,
        error::DischargeError,
        patient::PatientId,
    };

    use super::*;

    fn roster() -> Vec<AgentSpec> {
        vec![
            AgentSpec::new("Summary Agent", AgentRole::SummaryGeneration),
            AgentSpec::new("Checklist Agent", AgentRole::ChecklistMonitoring),
            AgentSpec::new("Backup Checklist Agent", AgentRole::ChecklistMonitoring),
        ]
    }

    fn checklist_work() -> WorkItem {
        WorkItem::Checklist {
            patient_id: PatientId::new("PT002"),
            task: DischargeTask::LabResults,
        }
    }

    fn route(role: AgentRole, allow_fallback: bool) -> Route {
        Route { role, allow_fallback }
    }

    #[test]
    fn new_agents_start_idle_and_ready() {
        let pool = AgentPool::from_roster(&roster());
        assert_eq!(pool.len(), 3);
        assert!(pool.agents().iter().all(|a| a.status == AgentStatus::Idle));
        assert_eq!(pool.ready_count(), 3);
    }

    #[test]
    fn assign_then_complete_cycles_status() {
        let mut pool = AgentPool::from_roster(&roster());
        let id = pool.agents()[1].id;

        pool.assign(id, checklist_work()).unwrap();
        let agent = pool.get(id).unwrap();
        assert_eq!(agent.status, AgentStatus::Processing);
        assert_eq!(agent.current_assignment.as_ref().unwrap().work, checklist_work());

        let finished = pool.complete(id).unwrap();
        assert_eq!(finished.work, checklist_work());

        let agent = pool.get(id).unwrap();
        assert_eq!(agent.status, AgentStatus::Active);
        assert!(agent.current_assignment.is_none());
        assert_eq!(agent.tasks_completed, 1);
    }

    #[test]
    fn assign_busy_agent_fails() {
        let mut pool = AgentPool::from_roster(&roster());
        let id = pool.agents()[0].id;
        pool.assign(id, WorkItem::Bulk { action: BulkAction::SummaryGeneration }).unwrap();

        let err = pool.assign(id, checklist_work()).unwrap_err();
        match err {
            DischargeError::AgentBusy { agent, work } => {
                assert_eq!(agent, "Summary Agent");
                assert_eq!(work, "summary-generation");
            }
            other => panic!("expected AgentBusy, got {:?}", other),
        }
    }

    #[test]
    fn complete_without_assignment_fails() {
        let mut pool = AgentPool::from_roster(&roster());
        let id = pool.agents()[0].id;

        // Idle agent.
        assert!(matches!(
            pool.complete(id),
            Err(DischargeError::NoActiveAssignment { .. })
        ));

        // Active agent after one full cycle.
        pool.assign(id, checklist_work()).unwrap();
        pool.complete(id).unwrap();
        assert!(matches!(
            pool.complete(id),
            Err(DischargeError::NoActiveAssignment { .. })
        ));
        assert_eq!(pool.get(id).unwrap().tasks_completed, 1);
    }

    #[test]
    fn unknown_agent_is_not_found() {
        let mut pool = AgentPool::from_roster(&roster());
        let stranger = AgentId::new();
        assert!(matches!(pool.get(stranger), Err(DischargeError::AgentNotFound { .. })));
        assert!(matches!(
            pool.assign(stranger, checklist_work()),
            Err(DischargeError::AgentNotFound { .. })
        ));
    }

    #[test]
    fn select_prefers_first_ready_agent_with_role() {
        let mut pool = AgentPool::from_roster(&roster());
        let first_checklist = pool.agents()[1].id;
        let second_checklist = pool.agents()[2].id;

        let wanted = route(AgentRole::ChecklistMonitoring, true);
        assert_eq!(pool.select(wanted), Some(first_checklist));

        pool.assign(first_checklist, checklist_work()).unwrap();
        assert_eq!(pool.select(wanted), Some(second_checklist));
    }

    #[test]
    fn select_falls_back_only_when_allowed() {
        let pool = AgentPool::from_roster(&roster());
        let summary = pool.agents()[0].id;

        assert_eq!(pool.select(route(AgentRole::NotificationManagement, true)), Some(summary));
        assert_eq!(pool.select(route(AgentRole::NotificationManagement, false)), None);
    }

    #[test]
    fn select_returns_none_when_everyone_is_busy() {
        let mut pool = AgentPool::from_roster(&roster());
        let ids: Vec<AgentId> = pool.agents().iter().map(|a| a.id).collect();
        for id in ids {
            pool.assign(id, checklist_work()).unwrap();
        }
        assert_eq!(pool.ready_count(), 0);
        assert_eq!(pool.select(route(AgentRole::ChecklistMonitoring, true)), None);
    }

    #[test]
    fn initialize_replaces_roster() {
        let mut pool = AgentPool::from_roster(&roster());
        let old: Vec<AgentId> = pool.agents().iter().map(|a| a.id).collect();

        let new_ids = pool.initialize(&[AgentSpec::new("Alert Agent", AgentRole::NotificationManagement)]);
        assert_eq!(pool.len(), 1);
        assert_eq!(new_ids.len(), 1);
        assert!(!old.contains(&new_ids[0]));
    }
}
