//! Remove files from the prepared set

use crate::locks::RepoLock;
use crate::util;
use anyhow::{Context, Result};
use nora_core::normalize_path;
use std::env;

pub fn run(paths: &[String]) -> Result<()> {
    let repo = util::open_repository()?;
    let _lock = RepoLock::acquire(repo.store().nora_dir())?;

    let cwd = env::current_dir().context("Failed to get current directory")?;
    let staged = repo.index().staged()?;

    let mut targets = Vec::new();
    for arg in paths {
        let rel = util::resolve_repo_path(repo.root(), &cwd, arg)?;
        if rel.as_os_str().is_empty() {
            targets.extend(staged.keys().cloned());
            continue;
        }

        let path = normalize_path(&rel)?;
        let prefix = format!("{}/", path);
        // A directory argument covers every staged path beneath it
        targets.extend(staged.keys().filter(|k| k.starts_with(&prefix)).cloned());
        targets.push(path);
    }

    let removed = repo.forget(targets.as_slice()).context("Failed to update prepared files")?;
    println!("Forgot {} prepared file(s)", removed);
    Ok(())
}
