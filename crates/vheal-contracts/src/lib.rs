//! # vheal-contracts
//!
//! Shared types for the VHeal discharge orchestration engine.
//!
//! All crates in the workspace import from here. Beyond the checklist
//! arithmetic that keeps a patient's completion percentage honest, no
//! business logic lives in this crate. Only data definitions and errors.

pub mod action;
pub mod activity;
pub mod agent;
pub mod checklist;
pub mod error;
pub mod patient;
pub mod report;
