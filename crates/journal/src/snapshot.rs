//! Immutable snapshot records and their store

use nora_core::store::{read_json, write_json};
use nora_core::{IncrementalHasher, NoraError, Result, Sha1Hash};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Path → blob hash mapping of a snapshot
pub type FileMap = BTreeMap<String, Sha1Hash>;

/// 12-hex-character snapshot identifier
///
/// Ids become file names, so persisted ids are checked on load as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SnapshotId(String);

impl SnapshotId {
    pub const LEN: usize = 12;

    /// Derive a fresh id from the current time and 4 random bytes
    ///
    /// No uniqueness check is made against existing ids.
    pub fn generate() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let salt: [u8; 4] = rand::random();

        let mut hasher = IncrementalHasher::new();
        hasher.update(nanos.to_string().as_bytes());
        hasher.update(&salt);
        let hex = hasher.finalize().to_hex();
        Self(hex[..Self::LEN].to_string())
    }

    /// Parse a user-supplied id
    pub fn parse(id: &str) -> Result<Self> {
        let id = id.trim();
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(NoraError::validation(format!("invalid snapshot id: '{}'", id)));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for SnapshotId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        SnapshotId::parse(&raw).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Serde adapter persisting `None` as `""`
pub(crate) mod empty_as_none {
    use super::SnapshotId;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<SnapshotId>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_ref().map(SnapshotId::as_str).unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<SnapshotId>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        if raw.is_empty() {
            return Ok(None);
        }
        SnapshotId::parse(&raw)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}

/// A snapshot of the tracked files at a point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: SnapshotId,
    /// Unix seconds
    pub timestamp: i64,
    pub message: String,
    #[serde(default)]
    pub files: FileMap,
    #[serde(with = "empty_as_none", default)]
    pub parent: Option<SnapshotId>,
}

/// Snapshot storage under `memories/<id>.json`
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
    tmp_dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>, tmp_dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            tmp_dir: tmp_dir.into(),
        }
    }

    /// Allocate, timestamp and persist a new snapshot
    ///
    /// File hashes are trusted; they come from the engine's own blob store.
    pub fn create(
        &self,
        message: &str,
        files: FileMap,
        parent: Option<SnapshotId>,
    ) -> Result<Snapshot> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();

        let snapshot = Snapshot {
            id: SnapshotId::generate(),
            timestamp,
            message: message.to_string(),
            files,
            parent,
        };

        write_json(&self.tmp_dir, &self.path_for(&snapshot.id), &snapshot)?;
        tracing::info!(id = %snapshot.id, files = snapshot.files.len(), "created snapshot");
        Ok(snapshot)
    }

    /// Load a snapshot by id
    pub fn get(&self, id: &SnapshotId) -> Result<Snapshot> {
        read_json(&self.path_for(id))?.ok_or_else(|| NoraError::not_found("snapshot", id.as_str()))
    }

    pub fn exists(&self, id: &SnapshotId) -> bool {
        self.path_for(id).is_file()
    }

    /// Walk the parent chain starting at `id`, newest first
    pub fn history(&self, id: &SnapshotId, limit: Option<usize>) -> Result<Vec<Snapshot>> {
        let mut chain = Vec::new();
        let mut next = Some(id.clone());

        while let Some(id) = next {
            if limit.is_some_and(|limit| chain.len() >= limit) {
                break;
            }
            let snapshot = self.get(&id)?;
            next = snapshot.parent.clone();
            chain.push(snapshot);
        }

        Ok(chain)
    }

    fn path_for(&self, id: &SnapshotId) -> PathBuf {
        self.dir.join(format!("{}.json", id.as_str()))
    }
}
