//! Objective domain model.
//!
//! # Responsibility
//! - Define the canonical performance record (department, owner, text,
//!   progress).
//! - Centralize field validation and progress clamping.
//!
//! # Invariants
//! - `department`, `owner` and `objective` are trimmed and non-empty.
//! - `progress` is finite and inside `[0, 100]`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Lowest accepted progress percentage.
pub const MIN_PROGRESS: f64 = 0.0;
/// Highest accepted progress percentage.
pub const MAX_PROGRESS: f64 = 100.0;

/// Logical column of an objective row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Department,
    Owner,
    Objective,
    Progress,
}

impl Field {
    /// Stable lowercase name used in logs and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Department => "department",
            Self::Owner => "owner",
            Self::Objective => "objective",
            Self::Progress => "progress",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failure while building an [`Objective`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveValidationError {
    /// A text field is empty after trimming.
    EmptyField(Field),
}

impl Display for ObjectiveValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{field} must not be blank"),
        }
    }
}

impl Error for ObjectiveValidationError {}

/// Canonical performance record.
///
/// Serialized with camelCase names to match what the dashboard consumes.
/// Deserialization runs the same validation as [`Objective::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ObjectiveWire")]
pub struct Objective {
    department: String,
    owner: String,
    objective: String,
    progress: f64,
}

impl Objective {
    /// Builds a validated objective.
    ///
    /// Text fields are trimmed; progress is clamped into `[0, 100]` with `NaN`
    /// mapped to `0`.
    ///
    /// # Errors
    /// - Returns `EmptyField` for the first text field that is blank after trim,
    ///   checked in department, owner, objective order.
    pub fn new(
        department: impl AsRef<str>,
        owner: impl AsRef<str>,
        objective: impl AsRef<str>,
        progress: f64,
    ) -> Result<Self, ObjectiveValidationError> {
        let department = non_blank(department.as_ref(), Field::Department)?;
        let owner = non_blank(owner.as_ref(), Field::Owner)?;
        let objective = non_blank(objective.as_ref(), Field::Objective)?;

        Ok(Self {
            department,
            owner,
            objective,
            progress: clamp_progress(progress),
        })
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Objective description text.
    pub fn objective(&self) -> &str {
        &self.objective
    }

    /// Completion percentage in `[0, 100]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Returns whether this objective belongs to the given owner entity.
    ///
    /// Owner names are only unique inside a department, so both parts must
    /// match.
    pub fn is_owned_by(&self, owner: &str, department: &str) -> bool {
        self.owner == owner && self.department == department
    }

    /// Returns the objective text shortened to `max_chars` characters.
    ///
    /// Longer texts get a `...` suffix; shorter ones are returned as-is.
    pub fn label(&self, max_chars: usize) -> String {
        if self.objective.chars().count() <= max_chars {
            return self.objective.clone();
        }
        let mut label = self.objective.chars().take(max_chars).collect::<String>();
        label.push_str("...");
        label
    }

    /// Classifies this objective's progress.
    pub fn band(&self) -> ProgressBand {
        ProgressBand::for_progress(self.progress)
    }
}

#[derive(Deserialize)]
struct ObjectiveWire {
    department: String,
    owner: String,
    objective: String,
    progress: f64,
}

impl TryFrom<ObjectiveWire> for Objective {
    type Error = ObjectiveValidationError;

    fn try_from(value: ObjectiveWire) -> Result<Self, Self::Error> {
        Self::new(
            value.department,
            value.owner,
            value.objective,
            value.progress,
        )
    }
}

/// Coarse progress classification used to color bars and rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressBand {
    /// At least 80%.
    High,
    /// At least 50% and below 80%.
    Medium,
    /// Below 50%.
    Low,
}

impl ProgressBand {
    pub const HIGH_THRESHOLD: f64 = 80.0;
    pub const MEDIUM_THRESHOLD: f64 = 50.0;

    pub fn for_progress(progress: f64) -> Self {
        if progress >= Self::HIGH_THRESHOLD {
            Self::High
        } else if progress >= Self::MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Clamps any float into the valid progress range.
///
/// `NaN` becomes `0`; infinities saturate at the range bounds.
pub fn clamp_progress(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_PROGRESS;
    }
    value.clamp(MIN_PROGRESS, MAX_PROGRESS)
}

/// Rounds to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn non_blank(value: &str, field: Field) -> Result<String, ObjectiveValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ObjectiveValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{clamp_progress, round2, Field, Objective, ObjectiveValidationError, ProgressBand};

    #[test]
    fn new_trims_text_and_clamps_progress() {
        let objective = Objective::new("  TI ", " Ana", "Ship it  ", 140.0).unwrap();
        assert_eq!(objective.department(), "TI");
        assert_eq!(objective.owner(), "Ana");
        assert_eq!(objective.objective(), "Ship it");
        assert_eq!(objective.progress(), 100.0);
    }

    #[test]
    fn new_rejects_first_blank_field() {
        let err = Objective::new("TI", "   ", "", 10.0).unwrap_err();
        assert_eq!(err, ObjectiveValidationError::EmptyField(Field::Owner));
    }

    #[test]
    fn clamp_maps_nan_and_infinities() {
        assert_eq!(clamp_progress(f64::NAN), 0.0);
        assert_eq!(clamp_progress(f64::INFINITY), 100.0);
        assert_eq!(clamp_progress(f64::NEG_INFINITY), 0.0);
        assert_eq!(clamp_progress(-3.5), 0.0);
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(33.333_333), 33.33);
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(50.0), 50.0);
    }

    #[test]
    fn label_truncates_on_char_boundaries() {
        let objective = Objective::new("TI", "Ana", "Capacitación técnica", 0.0).unwrap();
        assert_eq!(objective.label(11), "Capacitació...");
        assert_eq!(objective.label(50), "Capacitación técnica");
    }

    #[test]
    fn bands_follow_thresholds() {
        assert_eq!(ProgressBand::for_progress(80.0), ProgressBand::High);
        assert_eq!(ProgressBand::for_progress(79.99), ProgressBand::Medium);
        assert_eq!(ProgressBand::for_progress(50.0), ProgressBand::Medium);
        assert_eq!(ProgressBand::for_progress(49.0), ProgressBand::Low);
    }
}
