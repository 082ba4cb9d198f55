//! Working-tree traversal honouring ignore rules

use crate::ignore::IgnoreRules;
use crate::settings::Settings;
use anyhow::{Context, Result};
use nora_core::normalize_path;
use nora_journal::Repository;
use std::path::Path;
use walkdir::WalkDir;

/// Ignore rules configured by the repository's `settings.toml`
pub fn load_rules(repo: &Repository) -> Result<IgnoreRules> {
    let settings = Settings::load(&repo.store().settings_path())?;
    let rules = IgnoreRules::load(repo.root(), settings.ignore)?;
    tracing::debug!(sources = rules.active_sources(), "loaded ignore rules");
    Ok(rules)
}

/// Collect every non-ignored file and symlink under `start`
///
/// `start` is repo-relative; an empty path walks the whole tree. Returned
/// paths are repo-relative, `/`-separated and sorted. Ignored directories
/// are pruned without being descended.
pub fn collect_files(repo_root: &Path, start: &Path, rules: &IgnoreRules) -> Result<Vec<String>> {
    let walk_root = if start.as_os_str().is_empty() {
        repo_root.to_path_buf()
    } else {
        repo_root.join(start)
    };
    let mut files = Vec::new();

    let walker = WalkDir::new(&walk_root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| match entry.path().strip_prefix(repo_root) {
            Ok(rel) if rel.as_os_str().is_empty() => true,
            Ok(rel) => !rules.should_ignore(rel, entry.file_type().is_dir()),
            Err(_) => false,
        });

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", walk_root.display()))?;
        if entry.file_type().is_dir() {
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(repo_root)
            .with_context(|| format!("{} is outside the repository", entry.path().display()))?;
        files.push(normalize_path(rel)?);
    }

    files.sort();
    tracing::debug!(start = %start.display(), count = files.len(), "collected worktree files");
    Ok(files)
}
