//! Change classification for `status`

use crate::snapshot::FileMap;
use nora_core::Sha1Hash;
use serde::Serialize;

/// State of a working-tree path relative to the index and the current snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileState {
    Unchanged,
    Untracked,
    Modified,
    ModifiedPrepared,
    AddedPrepared,
}

impl FileState {
    pub fn label(&self) -> &'static str {
        match self {
            FileState::Unchanged => "unchanged",
            FileState::Untracked => "untracked",
            FileState::Modified => "modified",
            FileState::ModifiedPrepared => "modified (prepared)",
            FileState::AddedPrepared => "added (prepared)",
        }
    }

    /// True for states that will land in the next snapshot
    pub fn is_prepared(&self) -> bool {
        matches!(self, FileState::ModifiedPrepared | FileState::AddedPrepared)
    }
}

impl std::fmt::Display for FileState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify one path from its staged, committed and working hashes
///
/// A staged entry decides the outcome on its own; the working hash only
/// matters for paths that are not staged.
pub fn classify(
    staged: Option<&Sha1Hash>,
    committed: Option<&Sha1Hash>,
    working: &Sha1Hash,
) -> FileState {
    match (staged, committed) {
        (Some(staged), Some(committed)) if staged == committed => FileState::Unchanged,
        (Some(_), Some(_)) => FileState::ModifiedPrepared,
        (Some(_), None) => FileState::AddedPrepared,
        (None, Some(committed)) if working == committed => FileState::Unchanged,
        (None, Some(_)) => FileState::Modified,
        (None, None) => FileState::Untracked,
    }
}

/// A reported (non-unchanged) path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChange {
    pub path: String,
    pub state: FileState,
}

/// Classify every working path, keeping only changed ones, ordered by path
pub fn collect_changes<'a, I>(staged: &FileMap, committed: &FileMap, working: I) -> Vec<FileChange>
where
    I: IntoIterator<Item = (&'a str, &'a Sha1Hash)>,
{
    let mut changes: Vec<FileChange> = working
        .into_iter()
        .filter_map(|(path, hash)| {
            let state = classify(staged.get(path), committed.get(path), hash);
            (state != FileState::Unchanged).then(|| FileChange {
                path: path.to_string(),
                state,
            })
        })
        .collect();

    changes.sort_by(|a, b| a.path.cmp(&b.path));
    changes
}
