//! Scenario 3: Pool Exhaustion
//!
//! Every agent on the roster is already processing when an assist arrives.
//! The request is rejected with `NoAvailableAgent` and the ward is left
//! exactly as it was.

use vheal_activity::InMemoryActivityLog;
use vheal_config::{bootstrap, EngineConfig};
use vheal_contracts::{
    action::BulkAction,
    agent::{AgentId, WorkItem},
    error::{DischargeError, DischargeResult},
};
use vheal_core::pool::AgentPool;

pub fn run_scenario(config: &EngineConfig) -> DischargeResult<()> {
    println!("=== Scenario 3: Pool Exhaustion ===");
    println!();

    let patient_id = config
        .patients
        .first()
        .map(|p| p.id.clone())
        .ok_or_else(|| DischargeError::ConfigError {
            reason: "pool exhaustion scenario needs at least one patient".to_string(),
        })?;

    // Occupy every agent before handing the pool to the orchestrator.
    let mut pool = AgentPool::from_roster(&config.agents);
    let ids: Vec<AgentId> = pool.agents().iter().map(|a| a.id).collect();
    for id in ids {
        pool.assign(id, WorkItem::Bulk { action: BulkAction::NotificationDispatch })?;
    }

    let mut orch = bootstrap(config, Box::new(InMemoryActivityLog::new()))?.with_pool(pool);

    for agent in orch.pool().agents() {
        println!("  {:<18} {:?}", agent.name, agent.status);
    }
    println!();

    let before = orch.snapshot()?;
    println!("  Assist requested for {}", patient_id);

    match orch.assist(&patient_id) {
        Err(e @ DischargeError::NoAvailableAgent { .. }) => {
            println!("  REJECTED: {} ({:?})", e, e.kind());
        }
        Err(e) => return Err(e),
        Ok(outcome) => {
            return Err(DischargeError::InvariantViolation {
                reason: format!(
                    "assist for '{}' succeeded with every agent processing",
                    outcome.patient_id
                ),
            });
        }
    }

    let after = orch.snapshot()?;
    println!(
        "  Ward state: {}",
        if after == before { "UNCHANGED" } else { "CHANGED" }
    );
    println!();
    println!("  Scenario 3 complete.");
    println!();

    Ok(())
}
