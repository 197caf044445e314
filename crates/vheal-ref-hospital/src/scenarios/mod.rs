//! Reference ward demo scenarios.
//!
//! Each scenario bootstraps a fresh orchestrator from an `EngineConfig`
//! (normally the embedded reference ward), drives it through one pattern
//! and prints what happened.

pub mod bulk_actions;
pub mod pool_exhaustion;
pub mod ward_round;
