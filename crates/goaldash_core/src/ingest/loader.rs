//! Source-to-records pipeline.
//!
//! # Responsibility
//! - Fetch rows from a [`RowSource`] and normalize them.
//! - Classify whole-batch failures into the load error taxonomy.
//!
//! # Invariants
//! - Success always carries at least one objective.
//! - Row rejections alone never fail a load unless nothing survives.

use crate::ingest::normalizer::{normalize_rows, RowRejected};
use crate::ingest::source::{RowSource, SourceError};
use crate::model::objective::Objective;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Whole-batch load failure. Every variant is recovered with the fallback.
#[derive(Debug)]
pub enum LoadError {
    SourceUnavailable(SourceError),
    /// The source answered with zero rows.
    EmptySource,
    /// Every row was rejected by the normalizer.
    EmptyAfterNormalization { rejected: usize },
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SourceUnavailable(err) => write!(f, "{err}"),
            Self::EmptySource => write!(f, "row source is empty"),
            Self::EmptyAfterNormalization { rejected } => write!(
                f,
                "no usable rows: all {rejected} rows were rejected; check the column headers"
            ),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::SourceUnavailable(err) => Some(err),
            Self::EmptySource | Self::EmptyAfterNormalization { .. } => None,
        }
    }
}

impl From<SourceError> for LoadError {
    fn from(value: SourceError) -> Self {
        Self::SourceUnavailable(value)
    }
}

/// Records produced by a successful load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedRecords {
    pub records: Vec<Objective>,
    pub rejected: Vec<RowRejected>,
}

/// Fetches and normalizes one batch of rows.
///
/// # Errors
/// - `SourceUnavailable` when the source fails.
/// - `EmptySource` when the source returns no rows.
/// - `EmptyAfterNormalization` when no row survives normalization.
pub fn load_records(source: &dyn RowSource) -> Result<LoadedRecords, LoadError> {
    let origin = source.describe();
    let rows = source.fetch_rows().map_err(|err| {
        error!("event=source_failed module=ingest origin={origin} error={err}");
        LoadError::from(err)
    })?;

    if rows.is_empty() {
        error!("event=source_empty module=ingest origin={origin}");
        return Err(LoadError::EmptySource);
    }

    let report = normalize_rows(&rows);
    if report.records.is_empty() {
        error!(
            "event=source_unusable module=ingest origin={origin} rejected={}",
            report.rejected.len()
        );
        return Err(LoadError::EmptyAfterNormalization {
            rejected: report.rejected.len(),
        });
    }

    info!(
        "event=source_loaded module=ingest origin={origin} rows={} accepted={} rejected={}",
        rows.len(),
        report.records.len(),
        report.rejected.len()
    );
    Ok(LoadedRecords {
        records: report.records,
        rejected: report.rejected,
    })
}
