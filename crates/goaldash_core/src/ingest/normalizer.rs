//! Row normalization into canonical objectives.
//!
//! # Responsibility
//! - Resolve each logical column through its alias list.
//! - Coerce progress from numbers or percentage-like text.
//! - Report incomplete rows without stopping the batch.
//!
//! # Invariants
//! - Accepted rows always produce `progress` in `[0, 100]`, never `NaN`.
//! - A row is rejected iff department, owner or objective is blank.
//! - Normalization has no side effects besides diagnostics.

use crate::ingest::aliases::aliases_for;
use crate::logging::sanitize_message;
use crate::model::objective::{Field, Objective, ObjectiveValidationError};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Untyped key-value row as produced by a row source.
pub type RawRow = Map<String, Value>;

const MAX_LOGGED_VALUE_CHARS: usize = 80;

// Longest numeric prefix, mirroring lenient float parsing of spreadsheet text.
static FLOAT_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("valid float prefix regex")
});

/// Why a row was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// A required text column resolved to nothing.
    MissingField(Field),
}

impl From<ObjectiveValidationError> for RejectReason {
    fn from(value: ObjectiveValidationError) -> Self {
        match value {
            ObjectiveValidationError::EmptyField(field) => Self::MissingField(field),
        }
    }
}

/// Rejection notice for one malformed row.
///
/// Carries the partially resolved values so the caller can tell which
/// columns were present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRejected {
    /// Zero-based position of the row in the source sequence.
    pub row_index: usize,
    pub reason: RejectReason,
    pub department: String,
    pub owner: String,
    pub objective: String,
}

impl Display for RowRejected {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.reason {
            RejectReason::MissingField(field) => write!(
                f,
                "row {} ignored: missing {field} (department=`{}`, owner=`{}`, objective=`{}`)",
                self.row_index + 1,
                self.department,
                self.owner,
                self.objective
            ),
        }
    }
}

impl Error for RowRejected {}

/// Outcome of normalizing a batch of rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizeReport {
    /// Accepted objectives in row order.
    pub records: Vec<Objective>,
    /// Rejections in row order.
    pub rejected: Vec<RowRejected>,
}

/// Converts one raw row into an objective or a rejection notice.
///
/// `row_index` is only used for reporting.
pub fn normalize_row(row: &RawRow, row_index: usize) -> Result<Objective, RowRejected> {
    let department = resolve_text(row, Field::Department).unwrap_or_default();
    let owner = resolve_text(row, Field::Owner).unwrap_or_default();
    let objective = resolve_text(row, Field::Objective).unwrap_or_default();
    let progress = resolve_progress(row);

    Objective::new(&department, &owner, &objective, progress).map_err(|err| RowRejected {
        row_index,
        reason: err.into(),
        department,
        owner,
        objective,
    })
}

/// Normalizes every row, logging and collecting rejections.
pub fn normalize_rows(rows: &[RawRow]) -> NormalizeReport {
    let mut report = NormalizeReport::default();
    for (index, row) in rows.iter().enumerate() {
        match normalize_row(row, index) {
            Ok(objective) => report.records.push(objective),
            Err(rejected) => {
                warn!(
                    "event=row_rejected module=ingest row={} reason={} department={} owner={} objective={}",
                    rejected.row_index + 1,
                    reason_tag(rejected.reason),
                    sanitize_message(&rejected.department, MAX_LOGGED_VALUE_CHARS),
                    sanitize_message(&rejected.owner, MAX_LOGGED_VALUE_CHARS),
                    sanitize_message(&rejected.objective, MAX_LOGGED_VALUE_CHARS),
                );
                report.rejected.push(rejected);
            }
        }
    }
    debug!(
        "event=rows_normalized module=ingest accepted={} rejected={}",
        report.records.len(),
        report.rejected.len()
    );
    report
}

/// Converts a raw progress cell into a percentage before clamping.
///
/// Numbers pass through; text is parsed by [`parse_progress_text`]; every
/// other value counts as `0`.
pub fn parse_progress(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => parse_progress_text(text),
        _ => 0.0,
    }
}

/// Parses percentage-like text such as `"45%"`, `"12,5"` or `"80 pts"`.
///
/// Removes the first `%`, turns the first decimal comma into a point and
/// reads the longest leading float. Unparseable text yields `0`.
pub fn parse_progress_text(text: &str) -> f64 {
    let cleaned = text.replacen('%', "", 1).replacen(',', ".", 1);
    let cleaned = cleaned.trim();
    FLOAT_PREFIX_RE
        .find(cleaned)
        .and_then(|found| found.as_str().parse::<f64>().ok())
        .filter(|value| !value.is_nan())
        .unwrap_or(0.0)
}

fn resolve_text(row: &RawRow, field: Field) -> Option<String> {
    aliases_for(field)
        .iter()
        .filter_map(|alias| row.get(*alias))
        .find_map(cell_text)
}

fn resolve_progress(row: &RawRow) -> f64 {
    aliases_for(Field::Progress)
        .iter()
        .filter_map(|alias| row.get(*alias))
        .find(|value| is_present(value))
        .map(parse_progress)
        .unwrap_or(0.0)
}

fn cell_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) if is_zero(number) => return None,
        Value::Number(number) => number.to_string(),
        Value::Bool(true) => "true".to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Falsy cells (null, `false`, blank text, numeric zero) never win an alias.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(text) => !text.trim().is_empty(),
        Value::Number(number) => !is_zero(number),
        _ => true,
    }
}

fn is_zero(number: &serde_json::Number) -> bool {
    number.as_f64() == Some(0.0)
}

fn reason_tag(reason: RejectReason) -> String {
    match reason {
        RejectReason::MissingField(field) => format!("missing_{field}"),
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_row, parse_progress_text, RawRow, RejectReason};
    use crate::model::objective::Field;
    use serde_json::json;

    fn row(value: serde_json::Value) -> RawRow {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn parse_progress_text_handles_common_shapes() {
        assert_eq!(parse_progress_text("45%"), 45.0);
        assert_eq!(parse_progress_text(" 12,5 % "), 12.5);
        assert_eq!(parse_progress_text("80 pts"), 80.0);
        assert_eq!(parse_progress_text(".5"), 0.5);
        assert_eq!(parse_progress_text("n/a"), 0.0);
        assert_eq!(parse_progress_text(""), 0.0);
        assert_eq!(parse_progress_text("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn only_first_comma_becomes_decimal_point() {
        assert_eq!(parse_progress_text("1,5,0"), 1.5);
    }

    #[test]
    fn earlier_alias_wins_over_later_alias() {
        let raw = row(json!({
            "Departamento": "Finanzas",
            "Nombre del departamento": "TI",
            "Responsable": "Ana",
            "Objetivo": "Cerrar auditoria",
            "AVANCE": 30,
            "Avance": "70%"
        }));
        let objective = normalize_row(&raw, 0).unwrap();
        assert_eq!(objective.department(), "TI");
        assert_eq!(objective.progress(), 70.0);
    }

    #[test]
    fn blank_alias_falls_through_to_next_candidate() {
        let raw = row(json!({
            "Nombre del departamento": "   ",
            "DEPARTAMENTO": "VENTAS",
            "PROPIETARIO": "Luis",
            "OBJETIVO": "Crecer",
        }));
        let objective = normalize_row(&raw, 0).unwrap();
        assert_eq!(objective.department(), "VENTAS");
        assert_eq!(objective.progress(), 0.0);
    }

    #[test]
    fn numeric_text_fields_are_rendered() {
        let raw = row(json!({
            "Departamento": 401,
            "Propietario": "Ana",
            "Objetivo": "Meta",
            "Progreso": true
        }));
        let objective = normalize_row(&raw, 0).unwrap();
        assert_eq!(objective.department(), "401");
        assert_eq!(objective.progress(), 0.0);
    }

    #[test]
    fn zero_progress_falls_through_to_next_alias() {
        let raw = row(json!({
            "Departamento": "TI",
            "Responsable": "Ana",
            "Objetivo": "Meta",
            "Promedio de realizacion": 0,
            "Avance": 70
        }));
        let objective = normalize_row(&raw, 0).unwrap();
        assert_eq!(objective.progress(), 70.0);

        let only_zero = row(json!({
            "Departamento": "TI",
            "Responsable": "Ana",
            "Objetivo": "Meta",
            "Promedio de realizacion": 0.0
        }));
        assert_eq!(normalize_row(&only_zero, 0).unwrap().progress(), 0.0);
    }

    #[test]
    fn zero_department_cell_counts_as_missing() {
        let raw = row(json!({
            "Departamento": 0,
            "Responsable": "Ana",
            "Objetivo": "Meta"
        }));
        let rejected = normalize_row(&raw, 0).unwrap_err();
        assert_eq!(rejected.reason, RejectReason::MissingField(Field::Department));

        let fallthrough = row(json!({
            "Nombre del departamento": 0,
            "Departamento": "TI",
            "Responsable": "Ana",
            "Objetivo": "Meta"
        }));
        assert_eq!(normalize_row(&fallthrough, 0).unwrap().department(), "TI");
    }

    #[test]
    fn missing_owner_reports_partial_values() {
        let raw = row(json!({ "Departamento": "TI", "Objetivo": "Meta" }));
        let rejected = normalize_row(&raw, 3).unwrap_err();
        assert_eq!(rejected.row_index, 3);
        assert_eq!(rejected.reason, RejectReason::MissingField(Field::Owner));
        assert_eq!(rejected.department, "TI");
        assert_eq!(rejected.owner, "");
        assert!(rejected.to_string().starts_with("row 4 ignored: missing owner"));
    }
}
