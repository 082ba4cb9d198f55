//! Workflow integration tests
//!
//! Tests for complete workflows that exercise multiple commands
//! and validate end-to-end behavior.

pub mod snapshot_lifecycle;
pub mod staging;
pub mod edge_cases;
