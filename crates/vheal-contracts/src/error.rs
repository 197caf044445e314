//! Error types for the discharge orchestration engine.
//!
//! All fallible operations return `DischargeResult<T>`. Orchestrator errors
//! are raised before any state is mutated, so a caller that receives an
//! error can re-issue the request without compensating for partial work.

use thiserror::Error;

/// The unified error type for the discharge engine.
#[derive(Debug, Error)]
pub enum DischargeError {
    /// No patient with this id is registered.
    #[error("patient '{patient_id}' not found")]
    PatientNotFound { patient_id: String },

    /// No agent with this id is in the pool.
    #[error("agent '{agent_id}' not found")]
    AgentNotFound { agent_id: String },

    /// The agent already holds an assignment.
    #[error("agent '{agent}' is busy with {work}")]
    AgentBusy { agent: String, work: String },

    /// No ready agent could be routed for the requested action.
    #[error("no available agent for action '{action}'")]
    NoAvailableAgent { action: String },

    /// `complete` was called on an agent that holds no assignment.
    ///
    /// Correct orchestrator code never produces this.
    #[error("agent '{agent}' has no active assignment")]
    NoActiveAssignment { agent: String },

    /// An internal consistency check failed.
    #[error("internal invariant violated: {reason}")]
    InvariantViolation { reason: String },

    /// The activity log could not record an entry.
    #[error("activity log write failed: {reason}")]
    ActivityWriteFailed { reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A patient seed record was rejected.
    #[error("invalid seed record: {reason}")]
    InvalidSeed { reason: String },
}

/// Coarse classification of a `DischargeError` for callers that render or
/// route failures without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The referenced patient or agent does not exist.
    NotFound,
    /// The agent pool could not serve the request right now.
    Contention,
    /// A broken internal invariant. Not a user-facing condition.
    Internal,
    /// Bad configuration or seed data.
    Configuration,
}

impl DischargeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DischargeError::PatientNotFound { .. } | DischargeError::AgentNotFound { .. } => {
                ErrorKind::NotFound
            }
            DischargeError::AgentBusy { .. } | DischargeError::NoAvailableAgent { .. } => {
                ErrorKind::Contention
            }
            DischargeError::NoActiveAssignment { .. }
            | DischargeError::InvariantViolation { .. }
            | DischargeError::ActivityWriteFailed { .. } => ErrorKind::Internal,
            DischargeError::ConfigError { .. } | DischargeError::InvalidSeed { .. } => {
                ErrorKind::Configuration
            }
        }
    }
}

/// Convenience alias used throughout the VHeal crates.
pub type DischargeResult<T> = Result<T, DischargeError>;
