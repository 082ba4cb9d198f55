//! Temporary working trees for CLI tests

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary working tree, optionally initialized with `nora init`
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create an empty directory without initializing it
    pub fn empty() -> Result<Self> {
        Ok(Self { dir: TempDir::new()? })
    }

    /// Create a directory and run `nora init` in it
    pub fn init() -> Result<Self> {
        let repo = Self::empty()?;
        crate::nora!(repo.path(), "init").assert_success()?;
        Ok(repo)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the root, creating parent directories
    pub fn write(&self, rel: &str, content: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Read and parse a JSON file under `.nora/`
    pub fn read_json(&self, rel: &str) -> Result<serde_json::Value> {
        let raw = fs::read_to_string(self.dir.path().join(".nora").join(rel))?;
        Ok(serde_json::from_str(&raw)?)
    }
}
