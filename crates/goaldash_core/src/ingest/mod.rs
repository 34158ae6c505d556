//! Raw row ingestion.
//!
//! # Responsibility
//! - Accept loosely typed rows from an external row source.
//! - Normalize them into canonical objectives, rejecting incomplete rows.
//! - Provide the hard-coded fallback dataset used when loading fails.
//!
//! # Invariants
//! - A rejected row never aborts the batch.
//! - Output order follows input row order.

pub mod aliases;
pub mod fallback;
pub mod loader;
pub mod normalizer;
pub mod source;
