//! Record the prepared files as a new snapshot

use crate::locks::RepoLock;
use crate::util;
use anyhow::{Context, Result};

pub fn run(message: &str) -> Result<()> {
    let repo = util::open_repository()?;
    let _lock = RepoLock::acquire(repo.store().nora_dir())?;

    let snapshot = repo.capture(message).context("Failed to create snapshot")?;

    println!("Created snapshot: {}", snapshot.id);
    Ok(())
}
