//! Scenario 2: Bulk Actions
//!
//! Runs each fleet-level action once. Every action is routed to the agent
//! whose role matches it and leaves patient checklists untouched.

use std::sync::Arc;

use vheal_activity::InMemoryActivityLog;
use vheal_config::{bootstrap, EngineConfig};
use vheal_contracts::{action::BulkAction, error::DischargeResult};

pub fn run_scenario(config: &EngineConfig) -> DischargeResult<()> {
    println!("=== Scenario 2: Bulk Actions ===");
    println!();

    let log = Arc::new(InMemoryActivityLog::new());
    let mut orch = bootstrap(config, Box::new(Arc::clone(&log)))?;

    let before = orch.snapshot()?.patients;

    for action in BulkAction::ALL {
        let outcome = orch.run_bulk(action)?;
        println!("  Action:      {}", action);
        println!("  Agent:       {}", outcome.agent_name);
        println!("  Description: {}", outcome.description);
        println!();
    }

    let snapshot = orch.snapshot()?;
    println!(
        "  Patient checklists: {}",
        if snapshot.patients == before { "UNCHANGED" } else { "CHANGED" }
    );

    println!("  Recent activity:");
    for entry in snapshot.recent(BulkAction::ALL.len()) {
        println!(
            "    {} {:<18} {}",
            entry.timestamp.format("%H:%M:%S"),
            entry.actor.name(),
            entry.action
        );
    }
    println!();

    println!(
        "  Activity chain integrity: {}",
        if log.verify_integrity()? { "VERIFIED" } else { "FAILED" }
    );
    println!();
    println!("  Scenario 2 complete.");
    println!();

    Ok(())
}
