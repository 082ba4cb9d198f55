//! List, create and switch timelines

use crate::locks::RepoLock;
use crate::util;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;

pub fn list() -> Result<()> {
    let repo = util::open_repository()?;
    let _lock = RepoLock::acquire(repo.store().nora_dir())?;

    let (active, names) = repo.list_timelines()?;
    let color = crate::render::color_enabled();

    for name in names {
        if name == active {
            if color {
                println!("* {}", name.green());
            } else {
                println!("* {}", name);
            }
        } else {
            println!("  {}", name);
        }
    }
    Ok(())
}

pub fn create(name: &str) -> Result<()> {
    let repo = util::open_repository()?;
    let _lock = RepoLock::acquire(repo.store().nora_dir())?;

    repo.create_timeline(name)
        .with_context(|| format!("Failed to create timeline '{}'", name))?;

    println!("Created timeline '{}' and switched to it", name);
    Ok(())
}

pub fn switch(name: &str) -> Result<()> {
    let repo = util::open_repository()?;
    let _lock = RepoLock::acquire(repo.store().nora_dir())?;

    let timeline = repo
        .switch_timeline(name)
        .with_context(|| format!("Failed to switch to timeline '{}'", name))?;

    match &timeline.current {
        Some(id) => println!("Switched to timeline '{}' at {}", name, id),
        None => println!("Switched to timeline '{}' (no snapshots yet)", name),
    }
    Ok(())
}
