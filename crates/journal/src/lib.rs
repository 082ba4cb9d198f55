//! Snapshot journal and repository state
//!
//! This crate provides:
//! - Snapshot records with 12-hex-character ids and parent links
//! - The staging index of files prepared for the next snapshot
//! - Timelines (named branches) and the active-timeline config
//! - Change classification for `status`
//! - The `Repository` facade running each command

pub mod snapshot;
pub mod index;
pub mod timeline;
pub mod status;
pub mod repo;

// Re-exports
pub use snapshot::{FileMap, Snapshot, SnapshotId, SnapshotStore};
pub use index::StagingIndex;
pub use timeline::{Config, Timeline, TimelineManager, DEFAULT_TIMELINE};
pub use status::{classify, collect_changes, FileChange, FileState};
pub use repo::{FileDiff, Recalled, Repository, StatusReport};
