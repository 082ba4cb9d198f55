//! Prepare files for the next snapshot

use crate::locks::RepoLock;
use crate::{util, worktree};
use anyhow::{Context, Result};
use nora_core::normalize_path;
use std::env;
use std::fs;

pub fn run(paths: &[String]) -> Result<()> {
    let repo = util::open_repository()?;
    let _lock = RepoLock::acquire(repo.store().nora_dir())?;

    let rules = worktree::load_rules(&repo)?;
    let cwd = env::current_dir().context("Failed to get current directory")?;

    let mut explicit = Vec::new();
    let mut candidates = Vec::new();

    for arg in paths {
        let rel = util::resolve_repo_path(repo.root(), &cwd, arg)?;
        let full = repo.root().join(&rel);
        let is_dir = rel.as_os_str().is_empty()
            || fs::symlink_metadata(&full).map(|m| m.is_dir()).unwrap_or(false);

        if is_dir {
            // Directories only contribute files that changed
            candidates.extend(worktree::collect_files(repo.root(), &rel, &rules)?);
        } else if rules.should_ignore(&rel, false) {
            println!("Skipping ignored file: {}", arg);
        } else {
            explicit.push(normalize_path(&rel)?);
        }
    }

    candidates.sort();
    candidates.dedup();

    let mut prepared = repo
        .prepare_changed(candidates.as_slice())
        .context("Failed to prepare files")?;
    prepared.extend(repo.prepare(explicit.as_slice()).context("Failed to prepare files")?);

    if prepared.is_empty() {
        println!("No changes to prepare");
    }
    for (path, _) in &prepared {
        println!("Prepared: {}", path);
    }

    Ok(())
}
