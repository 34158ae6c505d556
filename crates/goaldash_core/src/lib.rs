//! Core aggregation and search engine for the objectives dashboard.
//! This crate is the single source of truth for record invariants.

pub mod config;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod search;
pub mod session;
pub mod stats;

pub use config::{ConfigError, EngineConfig};
pub use ingest::fallback::fallback_dataset;
pub use ingest::loader::{load_records, LoadError, LoadedRecords};
pub use ingest::normalizer::{
    normalize_row, normalize_rows, NormalizeReport, RawRow, RejectReason, RowRejected,
};
pub use ingest::source::{JsonFileRowSource, RowSource, SourceError, StaticRowSource};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::objective::{Field, Objective, ObjectiveValidationError, ProgressBand};
pub use model::stats::{DepartmentStats, OwnerKey, OwnerStats};
pub use search::directory::{search_owners, DirectoryQuery, OwnerDirectory, SearchResult};
pub use session::coordinator::{Dashboard, Dataset, DatasetId, DatasetOrigin, LoadStatus, Session};
pub use session::selection::{
    selected_objectives, Drilldown, SelectionIntent, SelectionPhase, SelectionState,
};
pub use stats::aggregate::{by_department, by_owner, departments, owner_breakdown, OwnerBreakdown};
pub use stats::compliance::compliance;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
