//! Show prepared and unprepared changes in the working tree

use crate::locks::RepoLock;
use crate::{render, util, worktree};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::Path;

pub fn run() -> Result<()> {
    let repo = util::open_repository()?;
    let _lock = RepoLock::acquire(repo.store().nora_dir())?;

    let rules = worktree::load_rules(&repo)?;
    let files = worktree::collect_files(repo.root(), Path::new(""), &rules)?;
    let report = repo
        .status(files.as_slice())
        .context("Failed to compute status")?;

    let color = render::color_enabled();

    if color {
        println!("On timeline: {}", report.timeline.bold());
    } else {
        println!("On timeline: {}", report.timeline);
    }

    println!();
    println!("Changes prepared for snapshot:");
    let mut any = false;
    for change in report.prepared() {
        println!("  {}", render::render_status_line(&change.path, change.state, color));
        any = true;
    }
    if !any {
        println!("  no changes prepared");
    }

    println!();
    println!("Changes not prepared for snapshot:");
    let mut any = false;
    for change in report.not_prepared() {
        println!("  {}", render::render_status_line(&change.path, change.state, color));
        any = true;
    }
    if !any {
        println!("  working directory clean");
    }

    Ok(())
}
