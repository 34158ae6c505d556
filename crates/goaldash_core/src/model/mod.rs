//! Canonical records and derived read models.
//!
//! # Responsibility
//! - Define the objective record every other module consumes.
//! - Define the per-department and per-owner statistic shapes handed to the
//!   presentation layer.
//!
//! # Invariants
//! - An `Objective` is immutable once built and always carries non-empty
//!   text fields and a progress value inside `[0, 100]`.
//! - Statistic shapes are recomputed from objectives, never patched.

pub mod objective;
pub mod stats;
