//! VHeal Discharge Engine Demo CLI
//!
//! Runs the reference ward scenarios or a single ad-hoc operation against a
//! freshly bootstrapped orchestrator.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- ward-round
//!   cargo run -p demo -- --deterministic assist PT002
//!   cargo run -p demo -- bulk summary-generation
//!   cargo run -p demo -- --config ward.toml snapshot

use std::{error::Error, path::PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use vheal_activity::InMemoryActivityLog;
use vheal_config::{bootstrap, EngineConfig, SelectionStrategy};
use vheal_contracts::{action::BulkAction, error::DischargeResult};
use vheal_ref_hospital::{
    scenarios::{bulk_actions, pool_exhaustion, ward_round},
    seed::reference_config,
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// VHeal: multi-agent hospital discharge orchestration demo.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "VHeal discharge engine demo",
    long_about = "Runs VHeal discharge scenarios showing checklist assists, agent routing,\n\
                  atomic rejection when the pool is exhausted, and activity chain integrity."
)]
struct Cli {
    /// Load the ward from this TOML file instead of the built-in reference ward.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for random task selection.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Always pick the first open task in checklist order.
    #[arg(long, global = true)]
    deterministic: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all three scenarios in sequence.
    RunAll,
    /// Scenario 1: drive every patient to a complete checklist.
    WardRound,
    /// Scenario 2: run each bulk action once.
    BulkActions,
    /// Scenario 3: assist with every agent busy.
    PoolExhaustion,
    /// Advance one open checklist task for a patient.
    Assist {
        /// Patient id, e.g. PT002.
        patient_id: String,
    },
    /// Run one bulk action: summary-generation, staff-coordination or
    /// notification-dispatch.
    Bulk { kind: BulkAction },
    /// Print the initial ward snapshot as JSON.
    Snapshot,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = load_config(&cli)?;

    match cli.command {
        Command::RunAll => {
            print_banner();
            ward_round::run_scenario(&config)?;
            bulk_actions::run_scenario(&config)?;
            pool_exhaustion::run_scenario(&config)?;
            println!("All selected scenarios completed successfully.");
        }
        Command::WardRound => {
            print_banner();
            ward_round::run_scenario(&config)?;
        }
        Command::BulkActions => {
            print_banner();
            bulk_actions::run_scenario(&config)?;
        }
        Command::PoolExhaustion => {
            print_banner();
            pool_exhaustion::run_scenario(&config)?;
        }
        Command::Assist { patient_id } => run_assist(&config, &patient_id)?,
        Command::Bulk { kind } => run_bulk(&config, kind)?,
        Command::Snapshot => {
            let orch = bootstrap(&config, Box::new(InMemoryActivityLog::new()))?;
            println!("{}", orch.snapshot()?.to_json_pretty()?);
        }
    }
    Ok(())
}

// ── Configuration ─────────────────────────────────────────────────────────────

fn load_config(cli: &Cli) -> DischargeResult<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            info!(path = %path.display(), "loading ward config");
            EngineConfig::from_file(path)?
        }
        None => reference_config()?,
    };

    if cli.deterministic {
        config.engine.selection = SelectionStrategy::FirstDeclared;
    }
    if cli.seed.is_some() {
        config.engine.seed = cli.seed;
    }
    Ok(config)
}

// ── Ad-hoc operations ─────────────────────────────────────────────────────────

fn run_assist(config: &EngineConfig, patient_id: &str) -> DischargeResult<()> {
    let mut orch = bootstrap(config, Box::new(InMemoryActivityLog::new()))?;
    let outcome = orch.assist(patient_id)?;

    match (&outcome.task_completed, &outcome.agent_name) {
        (Some(task), Some(agent)) => {
            println!("{} completed {} for {}", agent, task.label(), outcome.patient_id)
        }
        _ => println!("All tasks already complete for {}", outcome.patient_id),
    }

    let patient = orch.patient(patient_id)?;
    println!();
    println!("  {} ({}, {:?} priority)", patient.name, patient.id, patient.priority);
    println!("  Room {} under {}", patient.room, patient.doctor);
    println!("  Status:     {}", patient.discharge_status);
    println!("  Completion: {}%", patient.checklist_completion());
    for (task, done) in patient.checklist().iter() {
        println!("    [{}] {}", if done { "x" } else { " " }, task.label());
    }
    Ok(())
}

fn run_bulk(config: &EngineConfig, kind: BulkAction) -> DischargeResult<()> {
    let mut orch = bootstrap(config, Box::new(InMemoryActivityLog::new()))?;
    let outcome = orch.run_bulk(kind)?;
    println!("{}: {}", outcome.agent_name, outcome.description);
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("VHeal: Discharge Orchestration Engine");
    println!("Reference Ward Demo");
    println!("=====================================");
    println!();
    println!("Per assist:");
    println!("  [1] Resolve the patient and collect open checklist tasks");
    println!("  [2] Select one open task");
    println!("  [3] Route a ready agent by role, falling back to any ready agent");
    println!("  [4] Assign, complete the task, recompute completion, release the agent");
    println!("  [5] Append the activity entry to the SHA-256 chain");
    println!();
}
