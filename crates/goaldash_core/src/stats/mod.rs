//! Grouped statistics over objective sets.
//!
//! # Responsibility
//! - Group objectives by department and by owner entity.
//! - Compute compliance (mean progress) for an optional department scope.
//!
//! # Invariants
//! - All functions are pure reads over the given slice.
//! - Results are recomputed on every call; nothing is cached.
//! - Grouping is case-sensitive; only search folds case.

pub mod aggregate;
pub mod compliance;

/// Normalizes a department filter: `None` and `Some("")` both mean
/// "every department".
pub(crate) fn active_filter(filter: Option<&str>) -> Option<&str> {
    filter.filter(|department| !department.is_empty())
}
