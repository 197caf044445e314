//! Patient records and the seed format they are admitted from.
//!
//! A `Patient` owns its `Checklist` privately. `checklist_completion` is
//! recomputed inside `complete_task`, the only method that changes task
//! state, so the percentage can never drift from the checklist.

use std::{collections::BTreeMap, fmt};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    checklist::{Checklist, DischargeTask},
    error::{DischargeError, DischargeResult},
};

/// Stable hospital identifier for a patient, e.g. `PatientId("PT002")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(pub String);

impl PatientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Clinical priority for discharge planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// The free-standing discharge-status label shown for a patient.
///
/// This label is set from seed data and is not derived from checklist
/// progress; a patient may be "Ready for Discharge" with open tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DischargeStatus {
    #[serde(rename = "Ready for Discharge")]
    ReadyForDischarge,
    #[serde(rename = "Pending Medical Review")]
    PendingMedicalReview,
    #[serde(rename = "Awaiting Pharmacy")]
    AwaitingPharmacy,
    #[serde(rename = "Awaiting Transport")]
    AwaitingTransport,
    #[serde(rename = "Awaiting Insurance")]
    AwaitingInsurance,
    #[serde(rename = "In Treatment")]
    InTreatment,
}

impl fmt::Display for DischargeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DischargeStatus::ReadyForDischarge => "Ready for Discharge",
            DischargeStatus::PendingMedicalReview => "Pending Medical Review",
            DischargeStatus::AwaitingPharmacy => "Awaiting Pharmacy",
            DischargeStatus::AwaitingTransport => "Awaiting Transport",
            DischargeStatus::AwaitingInsurance => "Awaiting Insurance",
            DischargeStatus::InTreatment => "In Treatment",
        };
        f.write_str(label)
    }
}

/// A patient record as supplied by seed data or an admission feed.
///
/// Task names are kept as strings so that an unknown name is reported as an
/// `InvalidSeed` error rather than a generic deserialization failure. Any
/// completion percentage present in the source is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientSeed {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub condition: String,
    pub room: String,
    pub doctor: String,
    pub admission_date: NaiveDate,
    pub estimated_discharge: NaiveDate,
    pub priority: Priority,
    pub discharge_status: DischargeStatus,
    #[serde(default)]
    pub tasks: BTreeMap<String, bool>,
}

/// A patient under discharge planning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub age: u32,
    pub condition: String,
    pub room: String,
    pub doctor: String,
    pub admission_date: NaiveDate,
    pub estimated_discharge: NaiveDate,
    pub priority: Priority,
    pub discharge_status: DischargeStatus,
    tasks: Checklist,
    checklist_completion: u8,
}

impl Patient {
    /// Admit a patient from a seed record.
    ///
    /// Fails with `InvalidSeed` for an empty id, a zero age, or an unknown
    /// task name.
    pub fn admit(seed: PatientSeed) -> DischargeResult<Self> {
        if seed.id.trim().is_empty() {
            return Err(DischargeError::InvalidSeed {
                reason: format!("patient '{}' has an empty id", seed.name),
            });
        }
        if seed.age == 0 {
            return Err(DischargeError::InvalidSeed {
                reason: format!("patient '{}' must have a positive age", seed.id),
            });
        }
        let tasks = Checklist::from_named(seed.tasks.iter().map(|(k, v)| (k.as_str(), *v)))
            .map_err(|e| match e {
                DischargeError::InvalidSeed { reason } => DischargeError::InvalidSeed {
                    reason: format!("patient '{}': {}", seed.id, reason),
                },
                other => other,
            })?;

        Ok(Self::with_checklist(seed, tasks))
    }

    fn with_checklist(seed: PatientSeed, tasks: Checklist) -> Self {
        let checklist_completion = tasks.completion_percent();
        Self {
            id: PatientId(seed.id),
            name: seed.name,
            age: seed.age,
            condition: seed.condition,
            room: seed.room,
            doctor: seed.doctor,
            admission_date: seed.admission_date,
            estimated_discharge: seed.estimated_discharge,
            priority: seed.priority,
            discharge_status: seed.discharge_status,
            tasks,
            checklist_completion,
        }
    }

    pub fn checklist(&self) -> &Checklist {
        &self.tasks
    }

    /// Percentage of checklist tasks complete, truncated to an integer.
    pub fn checklist_completion(&self) -> u8 {
        self.checklist_completion
    }

    /// Mark `task` complete and recompute `checklist_completion`.
    ///
    /// Returns false if the task was already complete. Tasks are never
    /// reverted, so completion is non-decreasing.
    pub fn complete_task(&mut self, task: DischargeTask) -> bool {
        let changed = self.tasks.mark_complete(task);
        self.checklist_completion = self.tasks.completion_percent();
        changed
    }
}
