//! # vheal-config
//!
//! TOML configuration for the VHeal discharge engine.
//!
//! ## Overview
//!
//! This crate provides [`EngineConfig`], the file format that describes a
//! ward (patients, agent roster, routing rules and engine settings), and
//! [`TomlRouter`], which implements the
//! [`AgentRouter`](vheal_core::traits::AgentRouter) trait from the
//! `[[routes]]` table. [`bootstrap`] turns a parsed config into a ready
//! [`Orchestrator`].
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use vheal_activity::InMemoryActivityLog;
//! use vheal_config::{bootstrap, EngineConfig};
//!
//! let config = EngineConfig::from_file(Path::new("config/hospital.toml"))?;
//! let mut orch = bootstrap(&config, Box::new(InMemoryActivityLog::new()))?;
//! orch.assist("PT002")?;
//! ```
//!
//! ## Route matching
//!
//! Each route names an `action` (or the wildcard `"*"`) and the agent role
//! that should take it. Routes are applied in declaration order; the first
//! match wins. Actions no route mentions use the standard mapping.

pub mod config;
pub mod router;

pub use config::{EngineConfig, EngineSettings, RouteRule, SelectionStrategy};
pub use router::TomlRouter;

use tracing::info;

use vheal_contracts::error::DischargeResult;
use vheal_core::{
    selector::{FirstDeclaredSelector, RandomSelector},
    traits::{ActivityLog, TaskSelector},
    Orchestrator,
};

/// Build the `TaskSelector` described by `settings`.
pub fn selector_for(settings: &EngineSettings) -> Box<dyn TaskSelector> {
    match (settings.selection, settings.seed) {
        (SelectionStrategy::FirstDeclared, _) => Box::new(FirstDeclaredSelector),
        (SelectionStrategy::Random, Some(seed)) => Box::new(RandomSelector::seeded(seed)),
        (SelectionStrategy::Random, None) => Box::new(RandomSelector::new()),
    }
}

/// Stand up an orchestrator from `config`, writing to `activity`.
///
/// Loads the configured patients and agents. Fails with `InvalidSeed` if a
/// patient record is rejected.
pub fn bootstrap(
    config: &EngineConfig,
    activity: Box<dyn ActivityLog>,
) -> DischargeResult<Orchestrator> {
    let router = TomlRouter::new(config.routes.clone());
    let mut orch = Orchestrator::new(selector_for(&config.engine), Box::new(router), activity)
        .with_processing_delay(config.engine.processing_delay());

    let patients = orch.initialize_patients(config.patients.clone())?;
    let agents = orch.initialize_agents(&config.agents).len();

    info!(
        patients,
        agents,
        routes = config.routes.len(),
        selection = ?config.engine.selection,
        "engine bootstrapped"
    );
    Ok(orch)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
