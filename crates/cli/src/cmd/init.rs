//! Initialize a nora repository

use anyhow::{Context, Result};
use nora_journal::{Repository, DEFAULT_TIMELINE};
use std::env;

pub fn run() -> Result<()> {
    let current_dir = env::current_dir().context("Failed to get current directory")?;

    Repository::init(&current_dir).with_context(|| {
        format!("Failed to initialize repository at {}", current_dir.display())
    })?;

    println!(
        "Initialized empty nora repository in {}",
        current_dir.join(nora_core::NORA_DIR).display()
    );
    println!("On timeline: {}", DEFAULT_TIMELINE);
    Ok(())
}
