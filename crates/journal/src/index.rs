//! Staging index: files prepared for the next snapshot

use crate::snapshot::FileMap;
use nora_core::store::{read_json, write_json};
use nora_core::Result;
use std::path::PathBuf;

/// Persisted `path → hash` set at `index/prepared.json`
///
/// Every operation is a full read-modify-write of the file.
#[derive(Debug, Clone)]
pub struct StagingIndex {
    path: PathBuf,
    tmp_dir: PathBuf,
}

impl StagingIndex {
    pub fn new(path: impl Into<PathBuf>, tmp_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            tmp_dir: tmp_dir.into(),
        }
    }

    /// Load the staged set; empty if it was never written
    pub fn staged(&self) -> Result<FileMap> {
        Ok(read_json(&self.path)?.unwrap_or_default())
    }

    /// Overwrite the whole staged set
    ///
    /// Callers wanting additive staging load `staged()` first and merge.
    pub fn replace(&self, files: &FileMap) -> Result<()> {
        write_json(&self.tmp_dir, &self.path, files)?;
        tracing::debug!(entries = files.len(), "wrote staging index");
        Ok(())
    }

    /// Remove paths from the staged set, returning how many were removed
    ///
    /// Unknown paths are ignored. No-op when nothing was ever staged.
    pub fn unstage<S: AsRef<str>>(&self, paths: &[S]) -> Result<usize> {
        let Some(mut staged) = read_json::<FileMap>(&self.path)? else {
            return Ok(0);
        };

        let before = staged.len();
        for path in paths {
            staged.remove(path.as_ref());
        }
        let removed = before - staged.len();

        self.replace(&staged)?;
        Ok(removed)
    }

    pub fn clear(&self) -> Result<()> {
        self.replace(&FileMap::new())
    }
}
