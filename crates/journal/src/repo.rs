//! Repository: composes the store, index, snapshots and timelines
//!
//! Every command of the `nora` binary maps to one method here. Working-tree
//! paths handed in are already repo-relative and `/`-separated; walking the
//! tree and applying ignore rules is the caller's job.

use crate::index::StagingIndex;
use crate::snapshot::{FileMap, Snapshot, SnapshotId, SnapshotStore};
use crate::status::{collect_changes, FileChange};
use crate::timeline::{Timeline, TimelineManager, DEFAULT_TIMELINE};
use nora_core::{diff_text, EditScript, NoraError, Result, Sha1Hash, Store};
use std::fs;
use std::path::Path;

/// An opened `.nora` repository
#[derive(Debug, Clone)]
pub struct Repository {
    store: Store,
    index: StagingIndex,
    snapshots: SnapshotStore,
    timelines: TimelineManager,
}

/// A recalled snapshot with the size of every file
#[derive(Debug, Clone)]
pub struct Recalled {
    pub snapshot: Snapshot,
    pub files: Vec<(String, usize)>,
}

/// Line diff between the committed and staged versions of one path
#[derive(Debug, Clone)]
pub struct FileDiff {
    pub path: String,
    /// `None` when the path has no committed version
    pub committed: Option<Sha1Hash>,
    pub staged: Sha1Hash,
    pub script: EditScript,
}

/// Output of `status`
#[derive(Debug, Clone)]
pub struct StatusReport {
    pub timeline: String,
    pub changes: Vec<FileChange>,
}

impl StatusReport {
    pub fn prepared(&self) -> impl Iterator<Item = &FileChange> {
        self.changes.iter().filter(|c| c.state.is_prepared())
    }

    pub fn not_prepared(&self) -> impl Iterator<Item = &FileChange> {
        self.changes.iter().filter(|c| !c.state.is_prepared())
    }
}

impl Repository {
    /// Create `.nora/` under `root` with `main` as the active timeline
    pub fn init(root: &Path) -> Result<Self> {
        let repo = Self::from_store(Store::init(root)?);
        repo.timelines.create_and_switch(DEFAULT_TIMELINE)?;
        Ok(repo)
    }

    /// Open the repository rooted at `root`
    pub fn open(root: &Path) -> Result<Self> {
        Ok(Self::from_store(Store::open(root)?))
    }

    fn from_store(store: Store) -> Self {
        let tmp_dir = store.tmp_dir();
        Self {
            index: StagingIndex::new(store.index_path(), &tmp_dir),
            snapshots: SnapshotStore::new(store.memories_dir(), &tmp_dir),
            timelines: TimelineManager::new(store.timelines_dir(), store.config_path(), &tmp_dir),
            store,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn root(&self) -> &Path {
        self.store.root()
    }

    pub fn index(&self) -> &StagingIndex {
        &self.index
    }

    pub fn snapshots(&self) -> &SnapshotStore {
        &self.snapshots
    }

    pub fn timelines(&self) -> &TimelineManager {
        &self.timelines
    }

    /// Read a working-tree file; a symlink yields its target path as bytes
    pub fn read_worktree_file(&self, rel_path: &str) -> Result<Vec<u8>> {
        let path = self.root().join(rel_path);

        let meta = match fs::symlink_metadata(&path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(NoraError::not_found("file", rel_path));
            }
            Err(e) => return Err(NoraError::io(&path, e)),
        };

        if meta.file_type().is_symlink() {
            let target = fs::read_link(&path).map_err(|e| NoraError::io(&path, e))?;
            return Ok(target.to_string_lossy().into_owned().into_bytes());
        }

        if meta.is_dir() {
            return Err(NoraError::validation(format!("is a directory: {}", rel_path)));
        }

        fs::read(&path).map_err(|e| NoraError::io(&path, e))
    }

    /// Store a working-tree file's bytes as a blob
    fn store_worktree_file(&self, rel_path: &str) -> Result<Sha1Hash> {
        let data = self.read_worktree_file(rel_path)?;
        self.store.blob_store().store(&data)
    }

    /// Files of the active timeline's current snapshot, empty before the first capture
    ///
    /// Read-only: never self-heals the config or timeline files.
    pub fn committed_files(&self) -> Result<FileMap> {
        let timeline = self.timelines.peek_current()?;
        match &timeline.current {
            Some(id) => Ok(self.snapshots.get(id)?.files),
            None => Ok(FileMap::new()),
        }
    }

    /// Stage every given path, keeping other staged entries
    pub fn prepare<S: AsRef<str>>(&self, paths: &[S]) -> Result<Vec<(String, Sha1Hash)>> {
        let mut prepared = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            let hash = self.store_worktree_file(path)?;
            prepared.push((path.to_string(), hash));
        }

        self.merge_into_index(&prepared)?;
        Ok(prepared)
    }

    /// Stage the candidates whose content differs from the current snapshot
    ///
    /// Used for directory arguments; unchanged files are left out of the index.
    pub fn prepare_changed<S: AsRef<str>>(
        &self,
        candidates: &[S],
    ) -> Result<Vec<(String, Sha1Hash)>> {
        let committed = self.committed_files()?;

        let mut prepared = Vec::new();
        for path in candidates {
            let path = path.as_ref();
            let hash = self.store_worktree_file(path)?;
            if committed.get(path) != Some(&hash) {
                prepared.push((path.to_string(), hash));
            }
        }

        self.merge_into_index(&prepared)?;
        Ok(prepared)
    }

    fn merge_into_index(&self, entries: &[(String, Sha1Hash)]) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut staged = self.index.staged()?;
        for (path, hash) in entries {
            staged.insert(path.clone(), *hash);
        }
        self.index.replace(&staged)?;

        tracing::info!(count = entries.len(), "prepared files");
        Ok(())
    }

    /// Unstage paths, returning how many entries were removed
    pub fn forget<S: AsRef<str>>(&self, paths: &[S]) -> Result<usize> {
        self.index.unstage(paths)
    }

    /// Record the staged files as a new snapshot on the active timeline
    ///
    /// The snapshot holds exactly the staged set. Order: write snapshot, advance and persist timeline, clear index.
    pub fn capture(&self, message: &str) -> Result<Snapshot> {
        let staged = self.index.staged()?;
        if staged.is_empty() {
            return Err(NoraError::validation("no files prepared for snapshot"));
        }

        let mut timeline = self.timelines.current()?;

        let snapshot = self
            .snapshots
            .create(message, staged, timeline.current.clone())?;

        timeline.advance(snapshot.id.clone());
        self.timelines.update(&timeline)?;
        self.index.clear()?;

        tracing::info!(id = %snapshot.id, timeline = %timeline.name, "captured snapshot");
        Ok(snapshot)
    }

    /// Load a snapshot and the size of each of its blobs
    ///
    /// Fails on the first blob that cannot be read.
    pub fn recall(&self, id: &SnapshotId) -> Result<Recalled> {
        let snapshot = self.snapshots.get(id)?;

        let mut files = Vec::with_capacity(snapshot.files.len());
        for (path, hash) in &snapshot.files {
            let data = self.store.blob_store().get(hash)?;
            files.push((path.clone(), data.len()));
        }

        Ok(Recalled { snapshot, files })
    }

    /// Diff the staged version of `path` against the current snapshot
    pub fn diff_staged(&self, path: &str) -> Result<FileDiff> {
        let staged = self.index.staged()?;
        let staged_hash = *staged
            .get(path)
            .ok_or_else(|| NoraError::validation(format!("file not prepared: {}", path)))?;

        let committed = self.committed_files()?.get(path).copied();

        let blobs = self.store.blob_store();
        let new_text = String::from_utf8_lossy(&blobs.get(&staged_hash)?).into_owned();
        let old_text = match &committed {
            Some(hash) => String::from_utf8_lossy(&blobs.get(hash)?).into_owned(),
            None => String::new(),
        };

        Ok(FileDiff {
            path: path.to_string(),
            committed,
            staged: staged_hash,
            script: diff_text(&old_text, &new_text),
        })
    }

    /// Classify the given working-tree paths
    pub fn status<S: AsRef<str>>(&self, worktree_paths: &[S]) -> Result<StatusReport> {
        let timeline = self.timelines.current()?;
        let committed = match &timeline.current {
            Some(id) => self.snapshots.get(id)?.files,
            None => FileMap::new(),
        };
        let staged = self.index.staged()?;

        let mut working = Vec::with_capacity(worktree_paths.len());
        for path in worktree_paths {
            let path = path.as_ref();
            working.push((path, self.store_worktree_file(path)?));
        }

        let changes = collect_changes(
            &staged,
            &committed,
            working.iter().map(|(path, hash)| (*path, hash)),
        );

        tracing::debug!(
            scanned = working.len(),
            changed = changes.len(),
            "computed status"
        );

        Ok(StatusReport {
            timeline: timeline.name,
            changes,
        })
    }

    /// Active timeline and its history from `current`, newest first
    pub fn log(&self, limit: Option<usize>) -> Result<(Timeline, Vec<Snapshot>)> {
        let timeline = self.timelines.peek_current()?;
        let history = match &timeline.current {
            Some(id) => self.snapshots.history(id, limit)?,
            None => Vec::new(),
        };
        Ok((timeline, history))
    }

    /// Create a timeline and make it active
    pub fn create_timeline(&self, name: &str) -> Result<Timeline> {
        self.timelines.create_and_switch(name)
    }

    /// Make an existing timeline active
    pub fn switch_timeline(&self, name: &str) -> Result<Timeline> {
        self.timelines.switch(name)
    }

    /// Active timeline name and all known timeline names
    pub fn list_timelines(&self) -> Result<(String, Vec<String>)> {
        self.timelines.list()
    }
}
