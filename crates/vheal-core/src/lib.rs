//! # vheal-core
//!
//! The discharge orchestration engine.
//!
//! This crate provides:
//! - The three seam traits (`TaskSelector`, `AgentRouter`, `ActivityLog`)
//! - `PatientRegistry` and `AgentPool`, the engine's two stores
//! - The `Orchestrator` that assigns agents, advances checklists and logs
//! - `SharedOrchestrator` for callers on several threads
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vheal_core::{Orchestrator, router::StandardRouter, selector::RandomSelector};
//!
//! let mut orch = Orchestrator::new(
//!     Box::new(RandomSelector::new()),
//!     Box::new(StandardRouter),
//!     Box::new(activity_log),
//! );
//! orch.initialize_patients(seeds)?;
//! orch.initialize_agents(&roster);
//! let outcome = orch.assist("PT002")?;
//! ```

pub mod delay;
pub mod orchestrator;
pub mod pool;
pub mod registry;
pub mod router;
pub mod selector;
pub mod shared;
pub mod traits;

pub use orchestrator::Orchestrator;
pub use shared::SharedOrchestrator;

// ── Tests ────────────────────────────────────────────────────────────────────
