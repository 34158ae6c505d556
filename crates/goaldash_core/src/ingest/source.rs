//! Row source contracts.
//!
//! # Responsibility
//! - Define the boundary with the external producer of raw rows.
//! - Ship an in-memory source and a JSON file source for callers and tests.
//!
//! # Invariants
//! - Sources return rows in their natural order and never drop rows;
//!   malformed rows are left for the normalizer to reject.

use crate::ingest::normalizer::RawRow;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Failure to obtain rows at all.
#[derive(Debug)]
pub enum SourceError {
    /// The source could not be reached (fetch failure, missing sheet, ...).
    Unavailable(String),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    /// Payload was readable but is not a sequence of rows.
    NotATable(String),
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "row source unavailable: {message}"),
            Self::Io { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "failed to parse rows: {err}"),
            Self::NotATable(message) => write!(f, "row source is not a table: {message}"),
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Unavailable(_) | Self::NotATable(_) => None,
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// External producer of raw rows.
pub trait RowSource {
    /// Short human-readable origin used in status messages and logs.
    fn describe(&self) -> String;

    /// Fetches the full row sequence.
    fn fetch_rows(&self) -> Result<Vec<RawRow>, SourceError>;
}

/// Row source over rows already held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticRowSource {
    label: String,
    rows: Vec<RawRow>,
}

impl StaticRowSource {
    pub fn new(label: impl Into<String>, rows: Vec<RawRow>) -> Self {
        Self {
            label: label.into(),
            rows,
        }
    }
}

impl RowSource for StaticRowSource {
    fn describe(&self) -> String {
        self.label.clone()
    }

    fn fetch_rows(&self) -> Result<Vec<RawRow>, SourceError> {
        Ok(self.rows.clone())
    }
}

/// Row source reading a JSON array of objects from disk.
///
/// This is the format spreadsheet exporters usually emit for "sheet to
/// JSON". Elements that are not objects become empty rows.
#[derive(Debug, Clone)]
pub struct JsonFileRowSource {
    path: PathBuf,
}

impl JsonFileRowSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RowSource for JsonFileRowSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch_rows(&self) -> Result<Vec<RawRow>, SourceError> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_json_rows(&text)
    }
}

/// Parses a JSON document into raw rows.
///
/// # Errors
/// - `Parse` when the text is not JSON.
/// - `NotATable` when the top-level value is not an array.
pub fn parse_json_rows(text: &str) -> Result<Vec<RawRow>, SourceError> {
    let value: Value = serde_json::from_str(text)?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(SourceError::NotATable(format!(
                "expected a JSON array, got {}",
                json_kind(&other)
            )))
        }
    };

    Ok(items
        .into_iter()
        .map(|item| match item {
            Value::Object(row) => row,
            _ => RawRow::new(),
        })
        .collect())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_json_rows, SourceError};

    #[test]
    fn parse_json_rows_keeps_order_and_blanks_non_objects() {
        let rows = parse_json_rows(r#"[{"Departamento":"TI"}, 7, {"Departamento":"RH"}]"#).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["Departamento"], "TI");
        assert!(rows[1].is_empty());
        assert_eq!(rows[2]["Departamento"], "RH");
    }

    #[test]
    fn parse_json_rows_rejects_non_array() {
        let err = parse_json_rows(r#"{"Departamento":"TI"}"#).unwrap_err();
        assert!(matches!(err, SourceError::NotATable(_)));
        assert!(err.to_string().contains("object"));
    }

    #[test]
    fn parse_json_rows_reports_syntax_errors() {
        let err = parse_json_rows("[{").unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }
}
