//! Core pipeline
//!
//! Orchestrates the export: the fetch engine collects raw subscription
//! records, the transform layer reshapes them into backup entries.

pub mod fetch;
pub mod transform;
