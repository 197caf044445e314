//! # vheal-ref-hospital
//!
//! Reference ward for the VHeal discharge orchestration engine.
//!
//! Demonstrates three scenarios against fictional ward data:
//!
//! 1. **Ward Round**: the checklist agent drives every patient to a
//!    complete discharge checklist.
//! 2. **Bulk Actions**: summary, coordination and notification actions are
//!    routed to their role agents.
//! 3. **Pool Exhaustion**: with every agent processing, an assist is
//!    rejected and nothing changes.
//!
//! All data is hardcoded and fictional. No external systems are contacted.

pub mod scenarios;
pub mod seed;

// ── Tests ─────────────────────────────────────────────────────────────────────
