//! Session-level coordination.
//!
//! # Responsibility
//! - Own the current objective set and replace it wholesale on reload.
//! - Track selection state and route queries to stats and search.
//! - Drive the load lifecycle, including the deferred fallback.
//!
//! # Invariants
//! - Only the session owns records; every view is computed on demand.
//! - At most one drilldown (department or owner) is active at a time.

pub mod coordinator;
pub mod selection;
