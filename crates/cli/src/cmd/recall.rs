//! Show a snapshot's metadata and files

use crate::util;
use anyhow::{Context, Result};
use nora_journal::SnapshotId;

pub fn run(id: &str) -> Result<()> {
    let repo = util::open_repository()?;

    let id = SnapshotId::parse(id)?;
    let recalled = repo
        .recall(&id)
        .with_context(|| format!("Failed to recall snapshot {}", id))?;
    let snapshot = &recalled.snapshot;

    println!("Snapshot: {}", snapshot.id);
    println!("Message: {}", snapshot.message);
    println!("Timestamp: {}", util::format_absolute_time(snapshot.timestamp));
    match &snapshot.parent {
        Some(parent) => println!("Parent: {}", parent),
        None => println!("Parent: (none)"),
    }
    println!("Files:");
    for (path, size) in &recalled.files {
        println!("  {}: {} bytes", path, size);
    }

    Ok(())
}
