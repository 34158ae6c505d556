//! Owner directory search.
//!
//! # Responsibility
//! - Build a deduplicated owner directory from objectives.
//! - Answer case-insensitive substring queries over owner and department.
//!
//! # Invariants
//! - The directory is rebuilt from the record set, never patched.
//! - Queries never mutate the directory.

pub mod directory;
