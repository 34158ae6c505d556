//! In-memory owner directory.
//!
//! # Invariants
//! - One entry per `(owner, department)` pair, in first-encounter order.
//! - `objective_count` equals the number of records of that pair.
//! - Query results preserve directory order; there is no relevance ranking.

use crate::model::objective::Objective;
use crate::model::stats::OwnerKey;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default minimum query length; shorter queries are treated as noise.
pub const DEFAULT_MIN_QUERY_CHARS: usize = 2;

/// One owner entity as listed by search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Owner name.
    pub name: String,
    pub department: String,
    pub objective_count: usize,
}

impl SearchResult {
    pub fn key(&self) -> OwnerKey {
        OwnerKey::new(self.name.clone(), self.department.clone())
    }

    fn matches(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.department.to_lowercase().contains(needle_lower)
    }
}

/// Search options.
#[derive(Debug, Clone)]
pub struct DirectoryQuery {
    /// User query text; trimmed before use.
    pub text: String,
    /// Queries shorter than this (in chars, after trim) return nothing.
    pub min_chars: usize,
}

impl DirectoryQuery {
    /// Creates a query with the default noise threshold.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            min_chars: DEFAULT_MIN_QUERY_CHARS,
        }
    }
}

/// Deduplicated owner listing built from an objective set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnerDirectory {
    entries: Vec<SearchResult>,
}

impl OwnerDirectory {
    /// Builds the directory in one pass over `records`.
    pub fn build(records: &[Objective]) -> Self {
        let mut slots = HashMap::<OwnerKey, usize>::new();
        let mut entries = Vec::<SearchResult>::new();
        for item in records {
            let slot = *slots.entry(OwnerKey::of(item)).or_insert_with(|| {
                entries.push(SearchResult {
                    name: item.owner().to_string(),
                    department: item.department().to_string(),
                    objective_count: 0,
                });
                entries.len() - 1
            });
            entries[slot].objective_count += 1;
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[SearchResult] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns entries whose owner or department contains the query text,
    /// ignoring case.
    ///
    /// Returns an empty list when the trimmed query is shorter than
    /// `query.min_chars`.
    pub fn query(&self, query: &DirectoryQuery) -> Vec<SearchResult> {
        let text = query.text.trim();
        if text.chars().count() < query.min_chars {
            return Vec::new();
        }

        let needle = text.to_lowercase();
        let hits = self
            .entries
            .iter()
            .filter(|entry| entry.matches(&needle))
            .cloned()
            .collect::<Vec<_>>();
        debug!(
            "event=directory_query module=search query_chars={} hits={}",
            text.chars().count(),
            hits.len()
        );
        hits
    }
}

/// Builds a directory and queries it in one step.
pub fn search_owners(records: &[Objective], text: &str) -> Vec<SearchResult> {
    OwnerDirectory::build(records).query(&DirectoryQuery::new(text))
}

#[cfg(test)]
mod tests {
    use super::{DirectoryQuery, OwnerDirectory};
    use crate::model::objective::Objective;

    fn records() -> Vec<Objective> {
        vec![
            Objective::new("TI", "Ana Ruiz", "a", 10.0).unwrap(),
            Objective::new("Ventas", "Luis", "b", 20.0).unwrap(),
            Objective::new("TI", "Ana Ruiz", "c", 30.0).unwrap(),
        ]
    }

    #[test]
    fn build_counts_objectives_per_owner() {
        let directory = OwnerDirectory::build(&records());
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.entries()[0].name, "Ana Ruiz");
        assert_eq!(directory.entries()[0].objective_count, 2);
        assert_eq!(directory.entries()[1].objective_count, 1);
    }

    #[test]
    fn custom_threshold_is_respected() {
        let directory = OwnerDirectory::build(&records());
        let mut query = DirectoryQuery::new("an");
        query.min_chars = 3;
        assert!(directory.query(&query).is_empty());
        query.min_chars = 1;
        assert_eq!(directory.query(&query).len(), 1);
    }

    #[test]
    fn whitespace_does_not_count_toward_threshold() {
        let directory = OwnerDirectory::build(&records());
        assert!(directory.query(&DirectoryQuery::new("  t  ")).is_empty());
        assert_eq!(directory.query(&DirectoryQuery::new("  ti  ")).len(), 1);
    }
}
