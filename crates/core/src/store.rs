//! On-disk store layout and persistence helpers

use crate::blob::BlobStore;
use crate::error::{NoraError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

/// Name of the storage root inside a working tree
pub const NORA_DIR: &str = ".nora";

/// Subdirectories created by `Store::init`
const LAYOUT: &[&str] = &[
    "objects",
    "memories",
    "timelines",
    "index",
    "config",
    "locks",
    "tmp",
];

/// Storage root of a Nora repository
///
/// Manages the `.nora/` directory structure:
/// ```text
/// .nora/
///   objects/<hh>/<rest>       blob content
///   memories/<id>.json        snapshots
///   timelines/<name>.json     timelines
///   index/prepared.json       staging index
///   config/config.json        active timeline + known timelines
///   locks/repo.lock           advisory lock
///   tmp/                      temp files for atomic writes
///   settings.toml             optional user settings
/// ```
#[derive(Debug, Clone)]
pub struct Store {
    /// Root of the working tree
    root: PathBuf,
    /// Path to .nora directory
    nora_dir: PathBuf,
    blob_store: BlobStore,
}

impl Store {
    /// Initialize a new store at the given working tree root
    pub fn init(repo_root: &Path) -> Result<Self> {
        let nora_dir = repo_root.join(NORA_DIR);

        if nora_dir.exists() {
            return Err(NoraError::validation(format!(
                "repository already initialized at {}",
                repo_root.display()
            )));
        }

        for dir in LAYOUT {
            let path = nora_dir.join(dir);
            fs::create_dir_all(&path).map_err(|e| NoraError::io(&path, e))?;
        }

        tracing::info!(root = %repo_root.display(), "initialized store");
        Ok(Self::at(repo_root, nora_dir))
    }

    /// Open an existing store
    pub fn open(repo_root: &Path) -> Result<Self> {
        let nora_dir = repo_root.join(NORA_DIR);

        if !nora_dir.is_dir() {
            return Err(NoraError::validation(format!(
                "not a nora repository: {}",
                repo_root.display()
            )));
        }

        // Older trees may lack the newer directories; recreate them
        for dir in LAYOUT {
            let path = nora_dir.join(dir);
            if !path.exists() {
                tracing::warn!(dir = %path.display(), "recreating missing store directory");
                fs::create_dir_all(&path).map_err(|e| NoraError::io(&path, e))?;
            }
        }

        Ok(Self::at(repo_root, nora_dir))
    }

    fn at(repo_root: &Path, nora_dir: PathBuf) -> Self {
        Self {
            root: repo_root.to_path_buf(),
            blob_store: BlobStore::new(&nora_dir),
            nora_dir,
        }
    }

    pub fn blob_store(&self) -> &BlobStore {
        &self.blob_store
    }

    /// Get the .nora directory path
    pub fn nora_dir(&self) -> &Path {
        &self.nora_dir
    }

    /// Get the working tree root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn memories_dir(&self) -> PathBuf {
        self.nora_dir.join("memories")
    }

    pub fn timelines_dir(&self) -> PathBuf {
        self.nora_dir.join("timelines")
    }

    pub fn index_path(&self) -> PathBuf {
        self.nora_dir.join("index").join("prepared.json")
    }

    pub fn config_path(&self) -> PathBuf {
        self.nora_dir.join("config").join("config.json")
    }

    pub fn locks_dir(&self) -> PathBuf {
        self.nora_dir.join("locks")
    }

    pub fn tmp_dir(&self) -> PathBuf {
        self.nora_dir.join("tmp")
    }

    pub fn settings_path(&self) -> PathBuf {
        self.nora_dir.join("settings.toml")
    }
}

/// Atomic write helper
///
/// Writes data to a temporary file, fsyncs it, then renames it to the target path.
pub fn atomic_write(tmp_dir: &Path, target: &Path, data: &[u8]) -> Result<()> {
    fs::create_dir_all(tmp_dir).map_err(|e| NoraError::io(tmp_dir, e))?;

    let temp_path = tmp_dir.join(uuid::Uuid::new_v4().to_string());

    let write_temp = || -> std::io::Result<()> {
        let mut temp_file = fs::File::create(&temp_path)?;
        temp_file.write_all(data)?;
        temp_file.sync_all()
    };
    if let Err(e) = write_temp() {
        let _ = fs::remove_file(&temp_path);
        return Err(NoraError::io(&temp_path, e));
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| NoraError::io(parent, e))?;
    }

    // Rename is atomic on POSIX systems
    if let Err(e) = fs::rename(&temp_path, target) {
        let _ = fs::remove_file(&temp_path);
        return Err(NoraError::io(target, e));
    }

    if let Some(parent) = target.parent() {
        if let Ok(dir) = fs::File::open(parent) {
            let _ = dir.sync_all();
        }
    }

    Ok(())
}

/// Serialize `value` as pretty JSON and write it atomically
pub fn write_json<T: Serialize>(tmp_dir: &Path, target: &Path, value: &T) -> Result<()> {
    let data = serde_json::to_vec_pretty(value).map_err(|source| NoraError::Parse {
        path: target.to_path_buf(),
        source,
    })?;
    atomic_write(tmp_dir, target, &data)
}

/// Read and parse a JSON file, `Ok(None)` when the file does not exist
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(NoraError::io(path, e)),
    };

    serde_json::from_slice(&data)
        .map(Some)
        .map_err(|source| NoraError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Normalize a path for storage
///
/// - Converts to relative path with `/` separator
/// - Rejects `..` and absolute paths
/// - Removes `./` components
pub fn normalize_path(path: &Path) -> Result<String> {
    let mut parts: Vec<String> = Vec::new();

    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            Component::ParentDir => {
                return Err(NoraError::validation(format!(
                    "path traversal not allowed: {}",
                    path.display()
                )));
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(NoraError::validation(format!(
                    "absolute paths not allowed: {}",
                    path.display()
                )));
            }
        }
    }

    if parts.is_empty() {
        return Err(NoraError::validation(format!(
            "empty path: {}",
            path.display()
        )));
    }

    Ok(parts.join("/"))
}
