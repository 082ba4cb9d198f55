//! Content-addressed blob storage

use crate::error::{NoraError, Result};
use crate::hash::{hash_bytes, Sha1Hash};
use crate::store::atomic_write;
use std::fs;
use std::path::{Path, PathBuf};

/// Blob storage under `objects/<hh>/<rest>`
///
/// Objects are raw bytes, written once and never modified.
#[derive(Debug, Clone)]
pub struct BlobStore {
    objects_dir: PathBuf,
    tmp_dir: PathBuf,
}

impl BlobStore {
    /// Create a blob store rooted at a `.nora` directory
    pub fn new(nora_dir: &Path) -> Self {
        Self {
            objects_dir: nora_dir.join("objects"),
            tmp_dir: nora_dir.join("tmp"),
        }
    }

    /// Store content and return its hash
    ///
    /// Idempotent: if the object already exists nothing is written.
    pub fn store(&self, data: &[u8]) -> Result<Sha1Hash> {
        let hash = hash_bytes(data);
        let path = self.object_path(&hash);

        if path.exists() {
            tracing::debug!(%hash, "blob already stored");
            return Ok(hash);
        }

        atomic_write(&self.tmp_dir, &path, data)?;
        tracing::debug!(%hash, size = data.len(), "stored blob");
        Ok(hash)
    }

    /// Read the content stored under `hash`
    pub fn get(&self, hash: &Sha1Hash) -> Result<Vec<u8>> {
        let path = self.object_path(hash);
        match fs::read(&path) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(NoraError::not_found("blob", hash.to_hex()))
            }
            Err(e) => Err(NoraError::io(&path, e)),
        }
    }

    /// Check if a blob exists
    pub fn contains(&self, hash: &Sha1Hash) -> bool {
        self.object_path(hash).is_file()
    }

    /// Filesystem path for a blob: objects/<hh>/<rest>
    pub fn object_path(&self, hash: &Sha1Hash) -> PathBuf {
        let (prefix, rest) = hash.shard();
        self.objects_dir.join(prefix).join(rest)
    }
}
