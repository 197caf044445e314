//! The patient registry.
//!
//! Holds every patient under discharge planning in admission order. The
//! registry stores and recomputes; it never decides which task to complete.

use std::collections::HashSet;

use tracing::{debug, info};

use vheal_contracts::{
    checklist::DischargeTask,
    error::{DischargeError, DischargeResult},
    patient::{DischargeStatus, Patient, PatientSeed},
};

/// Ordered store of patient records.
#[derive(Debug, Clone, Default)]
pub struct PatientRegistry {
    patients: Vec<Patient>,
}

impl PatientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the initial patient set.
    ///
    /// A no-op returning 0 when the registry already holds patients. Every
    /// seed is validated before any is inserted, so a bad record loads
    /// nothing. Returns the number of patients admitted.
    pub fn load(&mut self, seeds: Vec<PatientSeed>) -> DischargeResult<usize> {
        if !self.patients.is_empty() {
            debug!(
                existing = self.patients.len(),
                "registry already populated, skipping seed load"
            );
            return Ok(0);
        }

        let mut seen = HashSet::new();
        let mut admitted = Vec::with_capacity(seeds.len());
        for seed in seeds {
            if !seen.insert(seed.id.clone()) {
                return Err(DischargeError::InvalidSeed {
                    reason: format!("duplicate patient id '{}'", seed.id),
                });
            }
            admitted.push(Patient::admit(seed)?);
        }

        let count = admitted.len();
        self.patients = admitted;
        info!(patients = count, "patient registry initialized");
        Ok(count)
    }

    pub fn get(&self, id: &str) -> DischargeResult<&Patient> {
        self.patients
            .iter()
            .find(|p| p.id.as_str() == id)
            .ok_or_else(|| DischargeError::PatientNotFound { patient_id: id.to_string() })
    }

    /// All patients in insertion order.
    pub fn list(&self) -> &[Patient] {
        &self.patients
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    /// Mean checklist completion across all patients; 0 for an empty registry.
    pub fn aggregate_completion(&self) -> f64 {
        if self.patients.is_empty() {
            return 0.0;
        }
        let sum: u32 = self
            .patients
            .iter()
            .map(|p| u32::from(p.checklist_completion()))
            .sum();
        f64::from(sum) / self.patients.len() as f64
    }

    pub fn count_by_status(&self, status: DischargeStatus) -> usize {
        self.patients
            .iter()
            .filter(|p| p.discharge_status == status)
            .count()
    }

    /// Mark one task complete and return the patient's new completion.
    ///
    /// The only write path into the registry.
    pub(crate) fn complete_task(&mut self, id: &str, task: DischargeTask) -> DischargeResult<u8> {
        let patient = self
            .patients
            .iter_mut()
            .find(|p| p.id.as_str() == id)
            .ok_or_else(|| DischargeError::PatientNotFound { patient_id: id.to_string() })?;

        patient.complete_task(task);
        Ok(patient.checklist_completion())
    }

    /// Put back a record taken before a mutation that must be undone.
    pub(crate) fn restore(&mut self, saved: Patient) {
        if let Some(slot) = self.patients.iter_mut().find(|p| p.id == saved.id) {
            debug!(patient_id = %saved.id, "patient record restored");
            *slot = saved;
        }
    }
}
