//! The discharge task checklist.
//!
//! Every patient carries the same fixed, ordered set of six discharge tasks.
//! A `Checklist` records which of them are complete and answers the derived
//! questions the rest of the engine needs: what is still open, how many are
//! done, and the completion percentage.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::DischargeError;

/// One step of the discharge checklist.
///
/// Variant order is the declared checklist order. `Ord` follows it, so a
/// `BTreeMap<DischargeTask, _>` iterates tasks in checklist order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DischargeTask {
    VitalsCheck,
    LabResults,
    MedicationReview,
    DischargeSummary,
    InsuranceApproval,
    TransportArranged,
}

impl DischargeTask {
    /// All tasks, in declared checklist order.
    pub const ALL: [DischargeTask; 6] = [
        DischargeTask::VitalsCheck,
        DischargeTask::LabResults,
        DischargeTask::MedicationReview,
        DischargeTask::DischargeSummary,
        DischargeTask::InsuranceApproval,
        DischargeTask::TransportArranged,
    ];

    /// The snake_case name used in seed files and serialized snapshots.
    pub fn as_str(&self) -> &'static str {
        match self {
            DischargeTask::VitalsCheck => "vitals_check",
            DischargeTask::LabResults => "lab_results",
            DischargeTask::MedicationReview => "medication_review",
            DischargeTask::DischargeSummary => "discharge_summary",
            DischargeTask::InsuranceApproval => "insurance_approval",
            DischargeTask::TransportArranged => "transport_arranged",
        }
    }

    /// Title-case label for display, e.g. "Medication Review".
    pub fn label(&self) -> &'static str {
        match self {
            DischargeTask::VitalsCheck => "Vitals Check",
            DischargeTask::LabResults => "Lab Results",
            DischargeTask::MedicationReview => "Medication Review",
            DischargeTask::DischargeSummary => "Discharge Summary",
            DischargeTask::InsuranceApproval => "Insurance Approval",
            DischargeTask::TransportArranged => "Transport Arranged",
        }
    }
}

impl fmt::Display for DischargeTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DischargeTask {
    type Err = DischargeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DischargeTask::ALL
            .into_iter()
            .find(|task| task.as_str() == s)
            .ok_or_else(|| DischargeError::InvalidSeed {
                reason: format!("unknown discharge task '{}'", s),
            })
    }
}

/// Integer completion percentage for `completed` of `total` tasks.
///
/// Truncates toward zero, so 4 of 6 is 66%. An empty checklist is 0%.
pub fn completion_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total);
    (100 * completed / total) as u8
}

/// The per-patient completion state of every discharge task.
///
/// Always holds an entry for each task in `DischargeTask::ALL`; tasks missing
/// from a seed mapping start incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Checklist {
    tasks: BTreeMap<DischargeTask, bool>,
}

impl Checklist {
    /// A checklist with every task incomplete.
    pub fn pending() -> Self {
        Self::from_completed(std::iter::empty())
    }

    /// A checklist where exactly the given tasks are complete.
    pub fn from_completed(done: impl IntoIterator<Item = DischargeTask>) -> Self {
        let mut tasks: BTreeMap<DischargeTask, bool> =
            DischargeTask::ALL.into_iter().map(|t| (t, false)).collect();
        for task in done {
            tasks.insert(task, true);
        }
        Self { tasks }
    }

    /// Build a checklist from named seed entries (`"lab_results" = true`).
    ///
    /// Unknown task names fail with `InvalidSeed`.
    pub fn from_named<'a>(
        entries: impl IntoIterator<Item = (&'a str, bool)>,
    ) -> Result<Self, DischargeError> {
        let mut checklist = Self::pending();
        for (name, done) in entries {
            let task: DischargeTask = name.parse()?;
            checklist.tasks.insert(task, done);
        }
        Ok(checklist)
    }

    pub fn is_complete(&self, task: DischargeTask) -> bool {
        self.tasks.get(&task).copied().unwrap_or(false)
    }

    /// Incomplete tasks in declared order.
    pub fn incomplete(&self) -> Vec<DischargeTask> {
        self.tasks
            .iter()
            .filter(|(_, done)| !**done)
            .map(|(task, _)| *task)
            .collect()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.values().filter(|done| **done).count()
    }

    pub fn total(&self) -> usize {
        self.tasks.len()
    }

    pub fn completion_percent(&self) -> u8 {
        completion_percent(self.completed_count(), self.total())
    }

    /// Iterate `(task, complete)` pairs in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (DischargeTask, bool)> + '_ {
        self.tasks.iter().map(|(task, done)| (*task, *done))
    }

    /// Mark `task` complete. Returns false if it already was.
    pub(crate) fn mark_complete(&mut self, task: DischargeTask) -> bool {
        let slot = self.tasks.entry(task).or_insert(false);
        let changed = !*slot;
        *slot = true;
        changed
    }
}

impl Default for Checklist {
    fn default() -> Self {
        Self::pending()
    }
}
