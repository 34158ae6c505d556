//! Session coordinator.
//!
//! # Responsibility
//! - Hold the installed dataset and swap it atomically on reload.
//! - Run the load lifecycle `loading -> error -> success(fallback)`.
//! - Expose selection intents, search and the dashboard read model.
//!
//! # Invariants
//! - Records are replaced wholesale, never mutated in place.
//! - A pending fallback fires at most once and only through `tick`.
//! - Installing a dataset resets selection and search results.

use crate::config::EngineConfig;
use crate::ingest::fallback::fallback_dataset;
use crate::ingest::loader::{load_records, LoadError};
use crate::ingest::normalizer::RowRejected;
use crate::ingest::source::RowSource;
use crate::model::objective::Objective;
use crate::model::stats::{DepartmentStats, OwnerStats};
use crate::search::directory::{DirectoryQuery, OwnerDirectory, SearchResult};
use crate::session::selection::{selected_objectives, SelectionIntent, SelectionState};
use crate::stats::aggregate::{by_department, by_owner, departments, owner_breakdown, OwnerBreakdown};
use crate::stats::compliance::compliance;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Identity of one installed record snapshot.
pub type DatasetId = Uuid;

/// Where the installed records came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetOrigin {
    /// Nothing loaded yet, or the fallback was disabled.
    Empty,
    Source,
    Fallback,
}

/// Immutable record snapshot.
#[derive(Debug, Clone)]
pub struct Dataset {
    id: DatasetId,
    origin: DatasetOrigin,
    records: Arc<[Objective]>,
}

impl Dataset {
    fn new(origin: DatasetOrigin, records: Vec<Objective>) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            records: records.into(),
        }
    }

    pub fn id(&self) -> DatasetId {
        self.id
    }

    pub fn origin(&self) -> DatasetOrigin {
        self.origin
    }

    pub fn records(&self) -> &[Objective] {
        &self.records
    }

    /// Shared handle to the records, valid even after the session reloads.
    pub fn shared_records(&self) -> Arc<[Objective]> {
        Arc::clone(&self.records)
    }
}

/// User-visible load status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LoadStatus {
    Loading {
        message: String,
    },
    Error {
        message: String,
    },
    Success {
        message: String,
        origin: DatasetOrigin,
        count: usize,
    },
}

impl LoadStatus {
    pub fn message(&self) -> &str {
        match self {
            Self::Loading { message } | Self::Error { message } | Self::Success { message, .. } => {
                message
            }
        }
    }
}

/// Everything the presentation layer renders, computed in one call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub dataset_id: DatasetId,
    pub origin: DatasetOrigin,
    pub status: LoadStatus,
    pub departments: Vec<String>,
    pub department_stats: Vec<DepartmentStats>,
    /// Scoped by the current department filter.
    pub owner_stats: Vec<OwnerStats>,
    /// Scoped by the current department filter.
    pub compliance: f64,
    pub selection: SelectionState,
    pub selected_objectives: Vec<Objective>,
    /// Truncated objective texts, parallel to `selected_objectives`.
    pub selected_labels: Vec<String>,
    /// Populated only during a department drilldown.
    pub department_breakdown: Vec<OwnerBreakdown>,
    pub search_results: Vec<SearchResult>,
}

/// Single-user session over one record set.
#[derive(Debug)]
pub struct Session {
    config: EngineConfig,
    dataset: Dataset,
    status: LoadStatus,
    selection: SelectionState,
    search_results: Vec<SearchResult>,
    last_rejected: Vec<RowRejected>,
    fallback_due: Option<Instant>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Session {
    /// Creates an empty session in the `loading` status.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            dataset: Dataset::new(DatasetOrigin::Empty, Vec::new()),
            status: LoadStatus::Loading {
                message: "waiting for data".to_string(),
            },
            selection: SelectionState::new(),
            search_results: Vec::new(),
            last_rejected: Vec::new(),
            fallback_due: None,
        }
    }

    /// Loads records from `source`.
    ///
    /// On success the records are installed immediately. On failure the
    /// status becomes `error`, the current records stay in place and the
    /// fallback is scheduled `fallback_delay` after `now`; call
    /// [`Session::tick`] to let it fire.
    ///
    /// # Errors
    /// Returns the load error after recording it in the status. The session
    /// remains usable.
    pub fn load(&mut self, source: &dyn RowSource, now: Instant) -> Result<usize, LoadError> {
        let origin = source.describe();
        self.fallback_due = None;
        self.last_rejected.clear();
        self.status = LoadStatus::Loading {
            message: format!("loading rows from {origin}"),
        };

        match load_records(source) {
            Ok(loaded) => {
                let count = loaded.records.len();
                self.last_rejected = loaded.rejected;
                self.install(DatasetOrigin::Source, loaded.records);
                self.status = LoadStatus::Success {
                    message: format!("loaded {count} objectives from {origin}"),
                    origin: DatasetOrigin::Source,
                    count,
                };
                Ok(count)
            }
            Err(err) => {
                if let LoadError::EmptyAfterNormalization { rejected } = &err {
                    warn!("event=load_unusable module=session origin={origin} rejected={rejected}");
                }
                self.status = LoadStatus::Error {
                    message: format!("{err}; loading sample data"),
                };
                self.fallback_due = Some(now + self.config.fallback_delay());
                info!(
                    "event=fallback_scheduled module=session delay_ms={}",
                    self.config.fallback_delay_ms
                );
                Err(err)
            }
        }
    }

    /// Fires the pending fallback when its deadline has passed.
    ///
    /// Returns `true` when a dataset was installed by this call.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.fallback_due {
            Some(due) if now >= due => {
                self.fallback_due = None;
                self.install_fallback();
                true
            }
            _ => false,
        }
    }

    /// Deadline of the pending fallback, if any.
    pub fn fallback_due(&self) -> Option<Instant> {
        self.fallback_due
    }

    fn install_fallback(&mut self) {
        if !self.config.use_fallback_dataset {
            warn!("event=fallback_disabled module=session");
            self.install(DatasetOrigin::Empty, Vec::new());
            return;
        }

        self.status = LoadStatus::Loading {
            message: "loading sample data".to_string(),
        };
        let records = fallback_dataset();
        let count = records.len();
        self.install(DatasetOrigin::Fallback, records);
        self.status = LoadStatus::Success {
            message: format!("sample data loaded ({count} objectives)"),
            origin: DatasetOrigin::Fallback,
            count,
        };
    }

    fn install(&mut self, origin: DatasetOrigin, records: Vec<Objective>) {
        self.dataset = Dataset::new(origin, records);
        self.selection = SelectionState::new();
        self.search_results.clear();
        info!(
            "event=dataset_installed module=session origin={:?} records={} dataset_id={}",
            origin,
            self.dataset.records().len(),
            self.dataset.id()
        );
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn records(&self) -> &[Objective] {
        self.dataset.records()
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Rows rejected by the last successful source load.
    pub fn last_rejected(&self) -> &[RowRejected] {
        &self.last_rejected
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn filter(&mut self, department: &str) {
        self.selection.filter(department);
    }

    pub fn select_department(&mut self, department: &str) {
        self.selection.select_department(department);
    }

    pub fn select_owner(&mut self, owner: &str, department: &str) {
        self.selection.select_owner(owner, department);
    }

    pub fn clear(&mut self) {
        self.selection.clear();
    }

    pub fn apply(&mut self, intent: &SelectionIntent) {
        self.selection.apply(intent);
    }

    /// Runs an owner search and keeps the results for the dashboard.
    pub fn search(&mut self, text: &str) -> &[SearchResult] {
        let mut query = DirectoryQuery::new(text);
        query.min_chars = self.config.min_query_chars;
        self.search_results = OwnerDirectory::build(self.records()).query(&query);
        &self.search_results
    }

    pub fn search_results(&self) -> &[SearchResult] {
        &self.search_results
    }

    pub fn clear_search(&mut self) {
        self.search_results.clear();
    }

    /// Selects an owner picked from the search results and closes them.
    pub fn select_owner_from_search(&mut self, owner: &str, department: &str) {
        self.selection.select_owner(owner, department);
        self.search_results.clear();
    }

    pub fn department_stats(&self) -> Vec<DepartmentStats> {
        by_department(self.records())
    }

    pub fn owner_stats(&self) -> Vec<OwnerStats> {
        by_owner(self.records(), self.selection.current_department())
    }

    pub fn compliance(&self) -> f64 {
        compliance(self.records(), self.selection.current_department())
    }

    pub fn departments(&self) -> Vec<String> {
        departments(self.records())
    }

    pub fn selected_objectives(&self) -> Vec<Objective> {
        selected_objectives(self.records(), &self.selection)
    }

    /// Chart labels for the selected objectives, truncated per config.
    pub fn selected_labels(&self) -> Vec<String> {
        self.labels_for(&self.selected_objectives())
    }

    fn labels_for(&self, objectives: &[Objective]) -> Vec<String> {
        objectives
            .iter()
            .map(|item| item.label(self.config.label_max_chars))
            .collect()
    }

    /// Per-owner breakdown of the drilled-into department.
    pub fn department_breakdown(&self) -> Vec<OwnerBreakdown> {
        self.selection
            .selected_department()
            .map(|department| owner_breakdown(self.records(), department))
            .unwrap_or_default()
    }

    /// Builds the full read model for the presentation layer.
    pub fn dashboard(&self) -> Dashboard {
        let selected_objectives = self.selected_objectives();
        let selected_labels = self.labels_for(&selected_objectives);
        Dashboard {
            dataset_id: self.dataset.id(),
            origin: self.dataset.origin(),
            status: self.status.clone(),
            departments: self.departments(),
            department_stats: self.department_stats(),
            owner_stats: self.owner_stats(),
            compliance: self.compliance(),
            selection: self.selection.clone(),
            selected_objectives,
            selected_labels,
            department_breakdown: self.department_breakdown(),
            search_results: self.search_results.clone(),
        }
    }
}
