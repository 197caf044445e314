//! Thread-safe handle for serving several callers.
//!
//! `SharedOrchestrator` puts the orchestrator behind one `Mutex`, so every
//! assist and bulk action runs to completion before the next begins. This
//! serializes access per agent and per patient as a side effect of
//! serializing everything.

use std::sync::{Arc, Mutex, MutexGuard};

use vheal_contracts::{
    action::BulkAction,
    error::{DischargeError, DischargeResult},
    report::{AssistOutcome, BulkOutcome, Snapshot},
};

use crate::orchestrator::Orchestrator;

/// A cloneable, `Send + Sync` handle to one orchestrator.
#[derive(Clone)]
pub struct SharedOrchestrator {
    inner: Arc<Mutex<Orchestrator>>,
}

impl SharedOrchestrator {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self { inner: Arc::new(Mutex::new(orchestrator)) }
    }

    pub fn assist(&self, patient_id: &str) -> DischargeResult<AssistOutcome> {
        self.lock()?.assist(patient_id)
    }

    pub fn run_bulk(&self, action: BulkAction) -> DischargeResult<BulkOutcome> {
        self.lock()?.run_bulk(action)
    }

    pub fn snapshot(&self) -> DischargeResult<Snapshot> {
        self.lock()?.snapshot()
    }

    /// Run `f` with exclusive access to the orchestrator.
    pub fn with<T>(&self, f: impl FnOnce(&mut Orchestrator) -> T) -> DischargeResult<T> {
        let mut guard = self.lock()?;
        Ok(f(&mut guard))
    }

    fn lock(&self) -> DischargeResult<MutexGuard<'_, Orchestrator>> {
        self.inner.lock().map_err(|e| DischargeError::InvariantViolation {
            reason: format!("orchestrator lock poisoned: {}", e),
        })
    }
}
