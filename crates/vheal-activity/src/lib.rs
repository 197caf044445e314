//! # vheal-activity
//!
//! Append-only, SHA-256 hash-chained activity log for the VHeal discharge
//! engine.
//!
//! Every entry the orchestrator appends is wrapped in an `ActivityEvent`
//! that links to the previous event by hash. Editing or reordering a stored
//! entry breaks the chain, which `verify_chain` detects.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vheal_activity::InMemoryActivityLog;
//!
//! let log = Arc::new(InMemoryActivityLog::new());
//! let orch = Orchestrator::new(selector, router, Box::new(Arc::clone(&log)));
//! // ... run assists ...
//! assert!(log.verify_integrity()?);
//! ```

pub mod chain;
pub mod event;
pub mod memory;

pub use chain::{hash_entry, verify_chain};
pub use event::{ActivityEvent, ActivityExport};
pub use memory::InMemoryActivityLog;

// ── Tests ─────────────────────────────────────────────────────────────────────
