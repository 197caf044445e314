//! The discharge orchestrator.
//!
//! The orchestrator owns the patient registry, the agent pool and the three
//! seam implementations, and is the only component that mutates registry or
//! pool state. Each operation follows the same shape:
//!
//!   Resolve → Select task → Route agent → Assign → Apply → Complete → Log
//!
//! Every check that can fail for a caller-visible reason (unknown patient,
//! no ready agent) runs before the first mutation, so a rejected request
//! leaves registry and pool exactly as they were.

use std::time::Duration;

use tracing::{debug, info, warn};

use vheal_contracts::{
    action::{ActionKind, BulkAction},
    activity::{ActivityEntry, Actor},
    agent::{Agent, AgentId, AgentSpec, WorkItem},
    checklist::DischargeTask,
    error::{DischargeError, DischargeResult},
    patient::{DischargeStatus, Patient, PatientId, PatientSeed},
    report::{AssistOutcome, BulkOutcome, Metrics, Snapshot},
};

use crate::{
    delay::{DelayCancel, ProcessingDelay},
    pool::AgentPool,
    registry::PatientRegistry,
    traits::{ActivityLog, AgentRouter, TaskSelector},
};

/// Drives assists and bulk actions against one registry and one pool.
///
/// Operations take `&mut self`, so calls never overlap. Wrap in
/// [`SharedOrchestrator`](crate::shared::SharedOrchestrator) to serve
/// several callers.
pub struct Orchestrator {
    registry: PatientRegistry,
    pool: AgentPool,
    selector: Box<dyn TaskSelector>,
    router: Box<dyn AgentRouter>,
    activity: Box<dyn ActivityLog>,
    processing_delay: ProcessingDelay,
}

impl Orchestrator {
    /// Create an orchestrator with an empty registry and pool.
    pub fn new(
        selector: Box<dyn TaskSelector>,
        router: Box<dyn AgentRouter>,
        activity: Box<dyn ActivityLog>,
    ) -> Self {
        Self {
            registry: PatientRegistry::new(),
            pool: AgentPool::new(),
            selector,
            router,
            activity,
            processing_delay: ProcessingDelay::default(),
        }
    }

    /// Start from an existing registry instead of an empty one.
    pub fn with_registry(mut self, registry: PatientRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Start from an existing pool instead of an empty one.
    pub fn with_pool(mut self, pool: AgentPool) -> Self {
        self.pool = pool;
        self
    }

    /// Hold each assignment for `delay` before completing it.
    ///
    /// Purely cosmetic: the final state is the same for any delay.
    pub fn with_processing_delay(mut self, delay: Duration) -> Self {
        self.processing_delay = ProcessingDelay::new(delay);
        self
    }

    /// Handle that cuts the processing delay short from another thread.
    ///
    /// Take it before wrapping the orchestrator in a `SharedOrchestrator`;
    /// cancelling never needs the orchestrator lock.
    pub fn delay_cancel_handle(&self) -> DelayCancel {
        self.processing_delay.cancel_handle()
    }

    /// Load the initial patient set. No-op returning 0 if already populated.
    pub fn initialize_patients(&mut self, seeds: Vec<PatientSeed>) -> DischargeResult<usize> {
        self.registry.load(seeds)
    }

    /// Create the agent roster, replacing any existing agents.
    pub fn initialize_agents(&mut self, roster: &[AgentSpec]) -> Vec<AgentId> {
        self.pool.initialize(roster)
    }

    pub fn registry(&self) -> &PatientRegistry {
        &self.registry
    }

    pub fn pool(&self) -> &AgentPool {
        &self.pool
    }

    /// Detailed view of one patient.
    pub fn patient(&self, patient_id: &str) -> DischargeResult<&Patient> {
        self.registry.get(patient_id)
    }

    /// Advance one open checklist task for `patient_id`.
    ///
    /// # Pipeline
    ///
    /// 1. Resolve the patient (`PatientNotFound` if absent)
    /// 2. Collect open tasks; if there are none, log "all tasks complete"
    ///    and return without touching any agent
    /// 3. Ask the `TaskSelector` for one open task
    /// 4. Route an agent for `assist` (`NoAvailableAgent` if none is ready)
    /// 5. Assign the agent, flip the task, recompute completion
    /// 6. Complete the agent's assignment
    /// 7. Append the activity entry
    ///
    /// Steps 1–4 only read state. Exactly one task changes per call.
    ///
    /// # Errors
    ///
    /// `PatientNotFound` and `NoAvailableAgent` are returned before any
    /// mutation. `InvariantViolation` is returned, also before mutation, if
    /// the selector picks a task that is not open. If steps 5–7 fail,
    /// including `ActivityWriteFailed` from the log, the patient and agent
    /// are restored to their pre-call state before the error is returned.
    pub fn assist(&mut self, patient_id: &str) -> DischargeResult<AssistOutcome> {
        debug!(patient_id = %patient_id, selector = self.selector.name(), "assist starting");

        // ── Step 1: Resolve the patient ──────────────────────────────────────
        let patient = self.registry.get(patient_id).inspect_err(|_| {
            warn!(patient_id = %patient_id, "assist requested for unknown patient");
        })?;
        let patient_key = patient.id.clone();
        let current_pct = patient.checklist_completion();

        // ── Step 2: Open tasks ───────────────────────────────────────────────
        let open = patient.checklist().incomplete();
        if open.is_empty() {
            info!(patient_id = %patient_key, "all tasks already complete");
            let entry = ActivityEntry::completed(
                Actor::Orchestrator,
                Some(patient_key.clone()),
                format!("All tasks complete for {}", patient_key),
            );
            self.activity.append(&entry)?;
            return Ok(AssistOutcome {
                patient_id: patient_key,
                task_completed: None,
                new_completion_pct: current_pct,
                agent_name: None,
            });
        }

        // ── Step 3: Pick one task ────────────────────────────────────────────
        let task = self
            .selector
            .select(&open)
            .filter(|t| open.contains(t))
            .ok_or_else(|| DischargeError::InvariantViolation {
                reason: format!(
                    "task selector '{}' did not return an open task for patient '{}'",
                    self.selector.name(),
                    patient_key
                ),
            })?;

        // ── Step 4: Route an agent ───────────────────────────────────────────
        let agent_id = self.route_agent(ActionKind::Assist)?;

        // ── Step 5: Assign and apply ─────────────────────────────────────────
        //
        // Nothing above has mutated state. The patient and agent records are
        // saved here so a failed log write can put both back.
        let saved_patient = self.registry.get(patient_key.as_str())?.clone();
        let saved_agent = self.pool.get(agent_id)?.clone();

        let applied = self.apply_assist(agent_id, &patient_key, task);
        let (new_pct, agent_name) = match applied {
            Ok(done) => done,
            Err(e) => {
                self.rollback(saved_patient, saved_agent);
                return Err(e);
            }
        };

        info!(
            patient_id = %patient_key,
            task = %task,
            agent = %agent_name,
            completion = new_pct,
            "assist completed task"
        );

        Ok(AssistOutcome {
            patient_id: patient_key,
            task_completed: Some(task),
            new_completion_pct: new_pct,
            agent_name: Some(agent_name),
        })
    }

    /// Run a fleet-level action on a routed agent and log it.
    ///
    /// No patient state is touched. Fails with `NoAvailableAgent` before any
    /// mutation if no ready agent can be routed. A failed log write restores
    /// the agent.
    pub fn run_bulk(&mut self, action: BulkAction) -> DischargeResult<BulkOutcome> {
        debug!(action = %action, "bulk action starting");

        let agent_id = self.route_agent(ActionKind::from(action))?;
        let saved_agent = self.pool.get(agent_id)?.clone();

        let agent_name = match self.apply_bulk(agent_id, action) {
            Ok(name) => name,
            Err(e) => {
                warn!(action = %action, agent = %saved_agent.name, "bulk action rolled back");
                self.pool.restore(saved_agent);
                return Err(e);
            }
        };
        let description = action.description().to_string();

        info!(action = %action, agent = %agent_name, "bulk action completed");

        Ok(BulkOutcome { agent_name, description })
    }

    /// Dashboard headline numbers.
    pub fn metrics(&self) -> Metrics {
        Metrics {
            total_patients: self.registry.len(),
            ready_for_discharge: self.registry.count_by_status(DischargeStatus::ReadyForDischarge),
            average_completion: self.registry.aggregate_completion(),
            ready_agents: self.pool.ready_count(),
        }
    }

    /// A read-only copy of patients, agents, log and metrics.
    pub fn snapshot(&self) -> DischargeResult<Snapshot> {
        Ok(Snapshot {
            patients: self.registry.list().to_vec(),
            agents: self.pool.agents().to_vec(),
            log: self.activity.entries()?,
            metrics: self.metrics(),
        })
    }

    /// Steps 5 to 7 of `assist`. The caller restores state on error.
    fn apply_assist(
        &mut self,
        agent_id: AgentId,
        patient_id: &PatientId,
        task: DischargeTask,
    ) -> DischargeResult<(u8, String)> {
        self.pool.assign(
            agent_id,
            WorkItem::Checklist { patient_id: patient_id.clone(), task },
        )?;
        let new_pct = self.registry.complete_task(patient_id.as_str(), task)?;
        self.pause();

        // ── Step 6: Release the agent ────────────────────────────────────────
        self.pool.complete(agent_id)?;
        let agent_name = self.pool.get(agent_id)?.name.clone();

        // ── Step 7: Log ──────────────────────────────────────────────────────
        let entry = ActivityEntry::completed(
            Actor::Agent { id: agent_id, name: agent_name.clone() },
            Some(patient_id.clone()),
            format!("Completed {} for {}", task.label(), patient_id),
        );
        self.activity.append(&entry)?;

        Ok((new_pct, agent_name))
    }

    fn apply_bulk(&mut self, agent_id: AgentId, action: BulkAction) -> DischargeResult<String> {
        self.pool.assign(agent_id, WorkItem::Bulk { action })?;
        self.pause();
        self.pool.complete(agent_id)?;

        let agent_name = self.pool.get(agent_id)?.name.clone();
        let entry = ActivityEntry::completed(
            Actor::Agent { id: agent_id, name: agent_name.clone() },
            None,
            action.description(),
        );
        self.activity.append(&entry)?;

        Ok(agent_name)
    }

    fn rollback(&mut self, patient: Patient, agent: Agent) {
        warn!(
            patient_id = %patient.id,
            agent = %agent.name,
            "assist rolled back"
        );
        self.registry.restore(patient);
        self.pool.restore(agent);
    }

    fn route_agent(&self, action: ActionKind) -> DischargeResult<AgentId> {
        let route = self.router.route(action);
        self.pool.select(route).ok_or_else(|| {
            warn!(
                action = %action,
                role = %route.role,
                fallback = route.allow_fallback,
                ready_agents = self.pool.ready_count(),
                "no agent available"
            );
            DischargeError::NoAvailableAgent { action: action.to_string() }
        })
    }

    fn pause(&self) {
        self.processing_delay.wait();
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::{
        collections::BTreeMap,
        sync::{Arc, Mutex},
        time::Duration,
    };

    use chrono::NaiveDate;

    use vheal_contracts::{
        action::BulkAction,
        activity::{ActivityEntry, Actor},
        agent::{AgentRole, AgentSpec, AgentStatus, WorkItem},
        checklist::{completion_percent, DischargeTask},
        error::{DischargeError, DischargeResult},
        patient::{DischargeStatus, PatientId, PatientSeed, Priority},
    };

    use crate::{
        pool::AgentPool,
        router::StandardRouter,
        selector::{FirstDeclaredSelector, RandomSelector},
        traits::{ActivityLog, TaskSelector},
    };

    use super::Orchestrator;

    // ── Mock helpers ─────────────────────────────────────────────────────────

    /// An activity log that records every entry for later inspection.
    struct MockLog {
        entries: Arc<Mutex<Vec<ActivityEntry>>>,
    }

    impl MockLog {
        fn new() -> Self {
            Self { entries: Arc::new(Mutex::new(vec![])) }
        }
    }

    impl ActivityLog for MockLog {
        fn append(&self, entry: &ActivityEntry) -> DischargeResult<()> {
            self.entries.lock().unwrap().push(entry.clone());
            Ok(())
        }

        fn entries(&self) -> DischargeResult<Vec<ActivityEntry>> {
            Ok(self.entries.lock().unwrap().clone())
        }
    }

    /// An activity log whose disk is always full.
    struct FailingLog;

    impl ActivityLog for FailingLog {
        fn append(&self, _entry: &ActivityEntry) -> DischargeResult<()> {
            Err(DischargeError::ActivityWriteFailed { reason: "disk full".to_string() })
        }

        fn entries(&self) -> DischargeResult<Vec<ActivityEntry>> {
            Ok(vec![])
        }
    }

    /// A selector that always answers with the same task, open or not.
    struct FixedSelector(DischargeTask);

    impl TaskSelector for FixedSelector {
        fn select(&mut self, _incomplete: &[DischargeTask]) -> Option<DischargeTask> {
            Some(self.0)
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    fn seed(id: &str, status: DischargeStatus, done: &[DischargeTask]) -> PatientSeed {
        let tasks: BTreeMap<String, bool> = DischargeTask::ALL
            .iter()
            .map(|t| (t.as_str().to_string(), done.contains(t)))
            .collect();
        PatientSeed {
            id: id.to_string(),
            name: format!("Patient {}", id),
            age: 60,
            condition: "Observation".to_string(),
            room: "100A".to_string(),
            doctor: "Dr. Test".to_string(),
            admission_date: NaiveDate::from_ymd_opt(2024, 12, 15).unwrap(),
            estimated_discharge: NaiveDate::from_ymd_opt(2024, 12, 18).unwrap(),
            priority: Priority::Medium,
            discharge_status: status,
            tasks,
        }
    }

    /// PT002: vitals, meds and insurance done; lab, summary, transport open.
    fn pt002() -> PatientSeed {
        seed(
            "PT002",
            DischargeStatus::PendingMedicalReview,
            &[
                DischargeTask::VitalsCheck,
                DischargeTask::MedicationReview,
                DischargeTask::InsuranceApproval,
            ],
        )
    }

    fn finished(id: &str) -> PatientSeed {
        seed(id, DischargeStatus::ReadyForDischarge, &DischargeTask::ALL)
    }

    fn fresh(id: &str) -> PatientSeed {
        seed(id, DischargeStatus::InTreatment, &[])
    }

    fn standard_roster() -> Vec<AgentSpec> {
        vec![
            AgentSpec::new("Summary Agent", AgentRole::SummaryGeneration),
            AgentSpec::new("Coordination Agent", AgentRole::StaffCoordination),
            AgentSpec::new("Checklist Agent", AgentRole::ChecklistMonitoring),
            AgentSpec::new("Alert Agent", AgentRole::NotificationManagement),
        ]
    }

    fn orchestrator(
        selector: Box<dyn TaskSelector>,
        seeds: Vec<PatientSeed>,
        roster: &[AgentSpec],
    ) -> (Orchestrator, Arc<Mutex<Vec<ActivityEntry>>>) {
        let log = MockLog::new();
        let entries = log.entries.clone();
        let mut orch = Orchestrator::new(selector, Box::new(StandardRouter), Box::new(log));
        orch.initialize_patients(seeds).unwrap();
        orch.initialize_agents(roster);
        (orch, entries)
    }

    fn assert_completion_invariant(orch: &Orchestrator) {
        for p in orch.registry().list() {
            let c = p.checklist();
            assert_eq!(
                p.checklist_completion(),
                completion_percent(c.completed_count(), c.total()),
                "completion out of sync for {}",
                p.id
            );
        }
    }

    // ── Test cases ───────────────────────────────────────────────────────────

    /// One assist on PT002 flips exactly one of its three open tasks and
    /// moves completion from 50% to 66%.
    #[test]
    fn test_assist_pt002_flips_one_open_task() {
        let (mut orch, entries) =
            orchestrator(Box::new(RandomSelector::new()), vec![pt002()], &standard_roster());
        assert_eq!(orch.patient("PT002").unwrap().checklist_completion(), 50);

        let outcome = orch.assist("PT002").unwrap();

        let task = outcome.task_completed.expect("a task must be completed");
        assert!(
            [
                DischargeTask::LabResults,
                DischargeTask::DischargeSummary,
                DischargeTask::TransportArranged
            ]
            .contains(&task),
            "unexpected task {:?}",
            task
        );
        assert_eq!(outcome.new_completion_pct, 66);
        assert_eq!(outcome.agent_name.as_deref(), Some("Checklist Agent"));

        let patient = orch.patient("PT002").unwrap();
        assert!(patient.checklist().is_complete(task));
        assert_eq!(patient.checklist().completed_count(), 4);
        assert_completion_invariant(&orch);

        let log = entries.lock().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].patient_id, Some(PatientId::new("PT002")));
        assert!(log[0].action.contains(task.label()));
    }

    /// Assisting a fully complete patient touches no agent and logs once.
    #[test]
    fn test_assist_complete_patient_leaves_agents_alone() {
        let (mut orch, entries) =
            orchestrator(Box::new(FirstDeclaredSelector), vec![finished("PT003")], &standard_roster());
        let agents_before = orch.pool().agents().to_vec();

        let outcome = orch.assist("PT003").unwrap();

        assert_eq!(outcome.task_completed, None);
        assert_eq!(outcome.new_completion_pct, 100);
        assert_eq!(outcome.agent_name, None);
        assert_eq!(orch.pool().agents(), agents_before.as_slice());

        let log = entries.lock().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].actor, Actor::Orchestrator);
        assert!(log[0].action.contains("All tasks complete"));
    }

    /// With every agent processing, assist fails and nothing changes.
    #[test]
    fn test_assist_is_atomic_when_no_agent_is_ready() {
        let mut pool = AgentPool::from_roster(&standard_roster());
        let ids: Vec<_> = pool.agents().iter().map(|a| a.id).collect();
        for id in ids {
            pool.assign(id, WorkItem::Bulk { action: BulkAction::StaffCoordination }).unwrap();
        }

        let log = MockLog::new();
        let entries = log.entries.clone();
        let mut orch = Orchestrator::new(
            Box::new(RandomSelector::new()),
            Box::new(StandardRouter),
            Box::new(log),
        )
        .with_pool(pool);
        orch.initialize_patients(vec![pt002()]).unwrap();

        let before = orch.snapshot().unwrap();
        let result = orch.assist("PT002");

        match result {
            Err(DischargeError::NoAvailableAgent { action }) => assert_eq!(action, "assist"),
            other => panic!("expected NoAvailableAgent, got {:?}", other),
        }
        let after = orch.snapshot().unwrap();
        assert_eq!(before, after, "a failed assist must not change any state");
        assert!(entries.lock().unwrap().is_empty());
    }

    /// Repeated assists close one task each, then stay at zero open tasks.
    #[test]
    fn test_repeated_assist_converges_and_stabilizes() {
        let (mut orch, _entries) =
            orchestrator(Box::new(RandomSelector::seeded(42)), vec![fresh("PT010")], &standard_roster());

        let mut open = orch.patient("PT010").unwrap().checklist().incomplete().len();
        assert_eq!(open, 6);
        let mut last_pct = 0;

        while open > 0 {
            let outcome = orch.assist("PT010").unwrap();
            assert!(outcome.task_completed.is_some());
            assert!(outcome.new_completion_pct >= last_pct, "completion must not decrease");
            last_pct = outcome.new_completion_pct;

            let now_open = orch.patient("PT010").unwrap().checklist().incomplete().len();
            assert_eq!(now_open, open - 1, "exactly one task per assist");
            open = now_open;
            assert_completion_invariant(&orch);
        }

        for _ in 0..3 {
            let outcome = orch.assist("PT010").unwrap();
            assert_eq!(outcome.task_completed, None);
            assert_eq!(outcome.new_completion_pct, 100);
        }
    }

    /// A single checklist agent serves sequential assists on two patients.
    #[test]
    fn test_single_agent_serves_sequential_assists() {
        let (mut orch, _entries) = orchestrator(
            Box::new(FirstDeclaredSelector),
            vec![pt002(), fresh("PT011")],
            &[AgentSpec::new("Checklist Agent", AgentRole::ChecklistMonitoring)],
        );

        let first = orch.assist("PT002").unwrap();
        let second = orch.assist("PT011").unwrap();

        assert_eq!(first.task_completed, Some(DischargeTask::LabResults));
        assert_eq!(second.task_completed, Some(DischargeTask::VitalsCheck));

        let agent = &orch.pool().agents()[0];
        assert_eq!(agent.status, AgentStatus::Active);
        assert_eq!(agent.tasks_completed, 2);
        assert!(agent.current_assignment.is_none());
    }

    #[test]
    fn test_assist_unknown_patient() {
        let (mut orch, entries) =
            orchestrator(Box::new(FirstDeclaredSelector), vec![pt002()], &standard_roster());

        match orch.assist("PT404") {
            Err(DischargeError::PatientNotFound { patient_id }) => assert_eq!(patient_id, "PT404"),
            other => panic!("expected PatientNotFound, got {:?}", other),
        }
        assert!(entries.lock().unwrap().is_empty());
    }

    /// A selector that names a closed task is caught before any mutation.
    #[test]
    fn test_selector_returning_closed_task_is_rejected() {
        let (mut orch, entries) = orchestrator(
            Box::new(FixedSelector(DischargeTask::VitalsCheck)),
            vec![pt002()],
            &standard_roster(),
        );
        let before = orch.snapshot().unwrap();

        let err = orch.assist("PT002").unwrap_err();
        assert!(matches!(err, DischargeError::InvariantViolation { .. }));
        assert_eq!(orch.snapshot().unwrap(), before);
        assert!(entries.lock().unwrap().is_empty());
    }

    /// Without a checklist monitor, assist falls back to another ready agent.
    #[test]
    fn test_assist_falls_back_to_any_ready_agent() {
        let (mut orch, _entries) = orchestrator(
            Box::new(FirstDeclaredSelector),
            vec![pt002()],
            &[AgentSpec::new("Alert Agent", AgentRole::NotificationManagement)],
        );

        let outcome = orch.assist("PT002").unwrap();
        assert_eq!(outcome.agent_name.as_deref(), Some("Alert Agent"));
    }

    #[test]
    fn test_assist_with_empty_roster_fails() {
        let (mut orch, _entries) = orchestrator(Box::new(FirstDeclaredSelector), vec![pt002()], &[]);
        assert!(matches!(
            orch.assist("PT002"),
            Err(DischargeError::NoAvailableAgent { .. })
        ));
        assert_eq!(orch.patient("PT002").unwrap().checklist_completion(), 50);
    }

    /// Each bulk action is routed to its role and logged without a patient.
    #[test]
    fn test_run_bulk_routes_by_role() {
        let (mut orch, entries) =
            orchestrator(Box::new(FirstDeclaredSelector), vec![pt002()], &standard_roster());
        let patients_before = orch.registry().list().to_vec();

        let summary = orch.run_bulk(BulkAction::SummaryGeneration).unwrap();
        let coordination = orch.run_bulk(BulkAction::StaffCoordination).unwrap();
        let notify = orch.run_bulk(BulkAction::NotificationDispatch).unwrap();

        assert_eq!(summary.agent_name, "Summary Agent");
        assert_eq!(coordination.agent_name, "Coordination Agent");
        assert_eq!(notify.agent_name, "Alert Agent");
        assert_eq!(notify.description, BulkAction::NotificationDispatch.description());

        assert_eq!(orch.registry().list(), patients_before.as_slice());
        let log = entries.lock().unwrap();
        assert_eq!(log.len(), 3);
        assert!(log.iter().all(|e| e.patient_id.is_none()));

        for agent in orch.pool().agents() {
            if agent.role == AgentRole::ChecklistMonitoring {
                assert_eq!(agent.status, AgentStatus::Idle);
            } else {
                assert_eq!(agent.status, AgentStatus::Active);
                assert_eq!(agent.tasks_completed, 1);
            }
        }
    }

    #[test]
    fn test_run_bulk_without_agents_fails() {
        let (mut orch, entries) = orchestrator(Box::new(FirstDeclaredSelector), vec![], &[]);
        match orch.run_bulk(BulkAction::StaffCoordination) {
            Err(DischargeError::NoAvailableAgent { action }) => {
                assert_eq!(action, "staff-coordination");
            }
            other => panic!("expected NoAvailableAgent, got {:?}", other),
        }
        assert!(entries.lock().unwrap().is_empty());
    }

    #[test]
    fn test_initialize_patients_is_idempotent() {
        let (mut orch, _entries) =
            orchestrator(Box::new(FirstDeclaredSelector), vec![pt002()], &standard_roster());
        let loaded = orch.initialize_patients(vec![fresh("PT020"), fresh("PT021")]).unwrap();
        assert_eq!(loaded, 0);
        assert_eq!(orch.registry().len(), 1);
    }

    #[test]
    fn test_metrics_and_snapshot() {
        let (mut orch, _entries) = orchestrator(
            Box::new(FirstDeclaredSelector),
            vec![pt002(), finished("PT003"), fresh("PT012")],
            &standard_roster(),
        );
        orch.assist("PT002").unwrap();

        let snapshot = orch.snapshot().unwrap();
        assert_eq!(snapshot.patients.len(), 3);
        assert_eq!(snapshot.agents.len(), 4);
        assert_eq!(snapshot.log.len(), 1);
        assert_eq!(snapshot.metrics.total_patients, 3);
        assert_eq!(snapshot.metrics.ready_for_discharge, 1);
        assert_eq!(snapshot.metrics.ready_agents, 4);
        // (66 + 100 + 0) / 3
        assert!((snapshot.metrics.average_completion - 166.0 / 3.0).abs() < 1e-9);
        assert_eq!(snapshot.recent(1).count(), 1);
    }

    #[test]
    fn test_processing_delay_does_not_change_outcome() {
        let log = MockLog::new();
        let mut orch = Orchestrator::new(
            Box::new(FirstDeclaredSelector),
            Box::new(StandardRouter),
            Box::new(log),
        )
        .with_processing_delay(Duration::from_millis(5));
        orch.initialize_patients(vec![pt002()]).unwrap();
        orch.initialize_agents(&standard_roster());

        let outcome = orch.assist("PT002").unwrap();
        assert_eq!(outcome.task_completed, Some(DischargeTask::LabResults));
        assert_eq!(orch.pool().ready_count(), 4);
    }

    #[test]
    fn test_assist_log_failure_restores_patient_and_agent() {
        let mut orch = Orchestrator::new(
            Box::new(FirstDeclaredSelector),
            Box::new(StandardRouter),
            Box::new(FailingLog),
        );
        orch.initialize_patients(vec![fresh("PT012")]).unwrap();
        orch.initialize_agents(&standard_roster());
        let before = orch.snapshot().unwrap();

        let err = orch.assist("PT012").unwrap_err();

        assert!(matches!(err, DischargeError::ActivityWriteFailed { .. }));
        assert_eq!(orch.snapshot().unwrap(), before);
        assert_eq!(orch.patient("PT012").unwrap().checklist_completion(), 0);
        assert!(orch.pool().agents().iter().all(|a| a.tasks_completed == 0));
        assert!(orch.pool().agents().iter().all(|a| a.status == AgentStatus::Idle));
    }

    #[test]
    fn test_bulk_log_failure_restores_agent() {
        let mut orch = Orchestrator::new(
            Box::new(FirstDeclaredSelector),
            Box::new(StandardRouter),
            Box::new(FailingLog),
        );
        orch.initialize_agents(&standard_roster());
        let before = orch.snapshot().unwrap();

        let err = orch.run_bulk(BulkAction::SummaryGeneration).unwrap_err();

        assert!(matches!(err, DischargeError::ActivityWriteFailed { .. }));
        assert_eq!(orch.snapshot().unwrap(), before);
        assert_eq!(orch.pool().ready_count(), 4);
    }

    #[test]
    fn test_cancelled_delay_does_not_block_assist() {
        let mut orch = Orchestrator::new(
            Box::new(FirstDeclaredSelector),
            Box::new(StandardRouter),
            Box::new(MockLog::new()),
        )
        .with_processing_delay(Duration::from_secs(60));
        orch.initialize_patients(vec![pt002()]).unwrap();
        orch.initialize_agents(&standard_roster());

        orch.delay_cancel_handle().cancel();

        let start = std::time::Instant::now();
        let outcome = orch.assist("PT002").unwrap();
        assert_eq!(outcome.task_completed, Some(DischargeTask::LabResults));
        assert!(start.elapsed() < Duration::from_secs(10));
    }
}
