//! Derived statistic shapes.
//!
//! # Responsibility
//! - Describe grouped progress figures for departments and owners.
//! - Provide the owner entity key shared by stats, search and selection.
//!
//! # Invariants
//! - `objective_count == objectives.len()` and `objective_count > 0`.
//! - `avg_progress == round2(total_progress / objective_count)`.
//! - `objectives` keeps source order.

use crate::model::objective::{round2, Objective, ProgressBand};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Owner entity identity.
///
/// Owner names are only unique inside a department; the pair is the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerKey {
    pub owner: String,
    pub department: String,
}

impl OwnerKey {
    pub fn new(owner: impl Into<String>, department: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            department: department.into(),
        }
    }

    /// Key of the owner entity an objective belongs to.
    pub fn of(objective: &Objective) -> Self {
        Self::new(objective.owner(), objective.department())
    }

    pub fn matches(&self, objective: &Objective) -> bool {
        objective.is_owned_by(&self.owner, &self.department)
    }
}

impl Display for OwnerKey {
    /// Renders the `owner|department` composite form.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}", self.owner, self.department)
    }
}

/// Running sum of objectives for one group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressTally {
    objectives: Vec<Objective>,
    total_progress: f64,
}

impl ProgressTally {
    pub fn push(&mut self, objective: &Objective) {
        self.total_progress += objective.progress();
        self.objectives.push(objective.clone());
    }

    pub fn len(&self) -> usize {
        self.objectives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objectives.is_empty()
    }

    /// Rounded mean progress; `0` for an empty tally.
    pub fn average(&self) -> f64 {
        if self.objectives.is_empty() {
            return 0.0;
        }
        round2(self.total_progress / self.objectives.len() as f64)
    }

    pub fn total(&self) -> f64 {
        self.total_progress
    }

    pub fn into_objectives(self) -> Vec<Objective> {
        self.objectives
    }
}

/// Grouped progress for one department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentStats {
    pub department: String,
    pub objectives: Vec<Objective>,
    pub total_progress: f64,
    pub avg_progress: f64,
    pub objective_count: usize,
}

impl DepartmentStats {
    pub(crate) fn from_tally(department: String, tally: ProgressTally) -> Self {
        let total_progress = tally.total();
        let avg_progress = tally.average();
        let objective_count = tally.len();
        Self {
            department,
            objectives: tally.into_objectives(),
            total_progress,
            avg_progress,
            objective_count,
        }
    }

    pub fn band(&self) -> ProgressBand {
        ProgressBand::for_progress(self.avg_progress)
    }
}

/// Grouped progress for one `(owner, department)` entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerStats {
    pub owner: String,
    pub department: String,
    pub objectives: Vec<Objective>,
    pub total_progress: f64,
    pub avg_progress: f64,
    pub objective_count: usize,
}

impl OwnerStats {
    pub(crate) fn from_tally(key: OwnerKey, tally: ProgressTally) -> Self {
        let total_progress = tally.total();
        let avg_progress = tally.average();
        let objective_count = tally.len();
        Self {
            owner: key.owner,
            department: key.department,
            objectives: tally.into_objectives(),
            total_progress,
            avg_progress,
            objective_count,
        }
    }

    pub fn key(&self) -> OwnerKey {
        OwnerKey::new(self.owner.clone(), self.department.clone())
    }

    pub fn band(&self) -> ProgressBand {
        ProgressBand::for_progress(self.avg_progress)
    }
}
