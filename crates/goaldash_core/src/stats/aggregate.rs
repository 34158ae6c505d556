//! Department and owner aggregation.
//!
//! # Invariants
//! - Groups only exist for observed records, so no group is empty.
//! - Sorted outputs are ordered by `avg_progress` descending; ties keep
//!   first-encounter order (stable sort).
//! - `sum(objective_count)` over `by_department` equals the input length.

use crate::model::objective::Objective;
use crate::model::stats::{DepartmentStats, OwnerKey, OwnerStats, ProgressTally};
use crate::stats::active_filter;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

/// Per-owner figures inside one department, keyed by owner name only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerBreakdown {
    pub owner: String,
    pub objectives: Vec<Objective>,
    pub total_progress: f64,
    pub avg_progress: f64,
}

/// Groups objectives by department, best average first.
pub fn by_department(records: &[Objective]) -> Vec<DepartmentStats> {
    let mut stats = group_by(records.iter(), |item| item.department().to_string())
        .into_iter()
        .map(|(department, tally)| DepartmentStats::from_tally(department, tally))
        .collect::<Vec<_>>();
    stats.sort_by(|left, right| right.avg_progress.total_cmp(&left.avg_progress));
    stats
}

/// Groups objectives by `(owner, department)`, best average first.
///
/// When `department_filter` is non-empty, other departments are dropped
/// before grouping.
pub fn by_owner(records: &[Objective], department_filter: Option<&str>) -> Vec<OwnerStats> {
    let filter = active_filter(department_filter);
    let scoped = records
        .iter()
        .filter(|item| filter.map_or(true, |department| item.department() == department));

    let mut stats = group_by(scoped, OwnerKey::of)
        .into_iter()
        .map(|(key, tally)| OwnerStats::from_tally(key, tally))
        .collect::<Vec<_>>();
    stats.sort_by(|left, right| right.avg_progress.total_cmp(&left.avg_progress));
    stats
}

/// Per-owner figures for a single department, in first-encounter order.
///
/// Used by the department drilldown chart; intentionally left unsorted.
pub fn owner_breakdown(records: &[Objective], department: &str) -> Vec<OwnerBreakdown> {
    let scoped = records
        .iter()
        .filter(|item| item.department() == department);

    group_by(scoped, |item| item.owner().to_string())
        .into_iter()
        .map(|(owner, tally)| OwnerBreakdown {
            owner,
            total_progress: tally.total(),
            avg_progress: tally.average(),
            objectives: tally.into_objectives(),
        })
        .collect()
}

/// Distinct departments in first-encounter order.
pub fn departments(records: &[Objective]) -> Vec<String> {
    let mut seen = Vec::<String>::new();
    for item in records {
        if !seen.iter().any(|department| department == item.department()) {
            seen.push(item.department().to_string());
        }
    }
    seen
}

fn group_by<'a, K, I, F>(records: I, key_of: F) -> Vec<(K, ProgressTally)>
where
    K: Eq + Hash + Clone,
    I: Iterator<Item = &'a Objective>,
    F: Fn(&Objective) -> K,
{
    let mut slots = HashMap::<K, usize>::new();
    let mut groups = Vec::<(K, ProgressTally)>::new();
    for item in records {
        let key = key_of(item);
        let slot = *slots.entry(key.clone()).or_insert_with(|| {
            groups.push((key, ProgressTally::default()));
            groups.len() - 1
        });
        groups[slot].1.push(item);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::{by_department, by_owner, departments, owner_breakdown};
    use crate::model::objective::Objective;

    fn obj(department: &str, owner: &str, progress: f64) -> Objective {
        Objective::new(department, owner, format!("{owner} goal"), progress).unwrap()
    }

    #[test]
    fn ties_keep_first_encounter_order() {
        let records = vec![obj("B", "x", 50.0), obj("A", "y", 50.0), obj("C", "z", 90.0)];
        let names = by_department(&records)
            .into_iter()
            .map(|stats| stats.department)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["C", "B", "A"]);
    }

    #[test]
    fn grouping_is_case_sensitive() {
        let records = vec![obj("TI", "Ana", 10.0), obj("ti", "Ana", 20.0)];
        assert_eq!(by_department(&records).len(), 2);
        assert_eq!(by_owner(&records, None).len(), 2);
    }

    #[test]
    fn same_owner_name_in_two_departments_stays_separate() {
        let records = vec![obj("TI", "Ana", 10.0), obj("RH", "Ana", 30.0), obj("TI", "Ana", 30.0)];
        let stats = by_owner(&records, None);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].department, "RH");
        assert_eq!(stats[1].department, "TI");
        assert_eq!(stats[1].objective_count, 2);
        assert_eq!(stats[1].avg_progress, 20.0);
    }

    #[test]
    fn empty_filter_means_every_department() {
        let records = vec![obj("TI", "Ana", 10.0), obj("RH", "Luis", 30.0)];
        assert_eq!(by_owner(&records, Some("")).len(), 2);
        assert_eq!(by_owner(&records, Some("RH")).len(), 1);
        assert!(by_owner(&records, Some("Finanzas")).is_empty());
    }

    #[test]
    fn breakdown_keeps_encounter_order_within_department() {
        let records = vec![
            obj("TI", "Luis", 10.0),
            obj("RH", "Eva", 90.0),
            obj("TI", "Ana", 90.0),
            obj("TI", "Luis", 30.0),
        ];
        let breakdown = owner_breakdown(&records, "TI");
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].owner, "Luis");
        assert_eq!(breakdown[0].avg_progress, 20.0);
        assert_eq!(breakdown[1].owner, "Ana");
    }

    #[test]
    fn departments_are_distinct_in_encounter_order() {
        let records = vec![obj("TI", "a", 1.0), obj("RH", "b", 1.0), obj("TI", "c", 1.0)];
        assert_eq!(departments(&records), vec!["TI", "RH"]);
    }
}
