//! Nora Core - Content-addressed storage primitives for the Nora snapshot engine
//!
//! This crate provides the foundational storage layer:
//! - SHA-1 hashing
//! - Blob storage with sharded object paths
//! - Myers line diffing
//! - On-disk store layout and atomic persistence

pub mod error;
pub mod hash;
pub mod blob;
pub mod diff;
pub mod store;

// Re-export main types for convenience
pub use error::{NoraError, Result};
pub use hash::{hash_bytes, hash_file, IncrementalHasher, Sha1Hash};
pub use blob::BlobStore;
pub use diff::{diff_lines, diff_text, DiffStep, EditScript, StepKind};
pub use store::{normalize_path, Store, NORA_DIR};
