//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use nora_core::NORA_DIR;
use nora_journal::Repository;
use std::path::{Component, Path, PathBuf};

/// Find repository root by walking up from cwd to find .nora/
pub fn find_repo_root() -> Result<PathBuf> {
    let current = std::env::current_dir().context("Failed to get current directory")?;
    find_repo_root_from(&current)
}

/// Find repository root by walking up from `start`
pub fn find_repo_root_from(start: &Path) -> Result<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(NORA_DIR).is_dir() {
            return Ok(current);
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => anyhow::bail!("Not a nora repository (no {} directory found)", NORA_DIR),
        }
    }
}

/// Locate and open the repository containing the current directory
pub fn open_repository() -> Result<Repository> {
    let repo_root = find_repo_root()?;
    Repository::open(&repo_root)
        .with_context(|| format!("Failed to open repository at {}", repo_root.display()))
}

/// Resolve a command-line path to a repo-relative path
///
/// `arg` is taken relative to `cwd` unless absolute. `..` is resolved
/// lexically; a result outside `repo_root` is rejected. The repository root
/// itself resolves to an empty path.
pub fn resolve_repo_path(repo_root: &Path, cwd: &Path, arg: &str) -> Result<PathBuf> {
    let joined = cwd.join(arg);

    let mut resolved = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::ParentDir => {
                if !resolved.pop() {
                    anyhow::bail!("Path escapes the filesystem root: {}", arg);
                }
            }
            Component::CurDir => {}
            other => resolved.push(other.as_os_str()),
        }
    }

    let rel = resolved
        .strip_prefix(repo_root)
        .map_err(|_| anyhow::anyhow!("Path is outside the repository: {}", arg))?;
    Ok(rel.to_path_buf())
}

/// Format unix seconds as absolute UTC time ("2024-01-03 14:30:00")
pub fn format_absolute_time(ts_secs: i64) -> String {
    let secs = ts_secs.max(0) as u64;
    let days = secs / 86400;
    let hours = (secs % 86400) / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    // Algorithm from http://howardhinnant.github.io/date_algorithms.html
    let epoch_days = days + 719468; // Days from 0000-03-01 to 1970-01-01
    let era = epoch_days / 146097;
    let doe = epoch_days - era * 146097; // [0, 146096]
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365; // [0, 399]
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
    let mp = (5 * doy + 2) / 153; // [0, 11]
    let d = doy - (153 * mp + 2) / 5 + 1; // [1, 31]
    let m = if mp < 10 { mp + 3 } else { mp - 9 }; // [1, 12]
    let year = if m <= 2 { y + 1 } else { y };

    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02} UTC",
        year, m, d, hours, minutes, seconds
    )
}

/// Format unix seconds relative to now ("2 hours ago")
pub fn format_relative_time(ts_secs: i64) -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default();

    let seconds = now - ts_secs;
    if seconds < 0 {
        "in the future".to_string()
    } else if seconds < 60 {
        format!("{} seconds ago", seconds)
    } else if seconds < 3600 {
        format!("{} minutes ago", seconds / 60)
    } else if seconds < 86400 {
        format!("{} hours ago", seconds / 3600)
    } else if seconds < 604800 {
        format!("{} days ago", seconds / 86400)
    } else {
        format!("{} weeks ago", seconds / 604800)
    }
}
