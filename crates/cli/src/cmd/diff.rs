//! Show changes in a prepared file

use crate::{render, util};
use anyhow::{Context, Result};
use nora_core::normalize_path;
use std::env;

pub fn run(path: &str) -> Result<()> {
    let repo = util::open_repository()?;

    let cwd = env::current_dir().context("Failed to get current directory")?;
    let rel = util::resolve_repo_path(repo.root(), &cwd, path)?;
    let path = normalize_path(&rel)?;

    let diff = repo.diff_staged(&path)?;
    tracing::debug!(
        path = %diff.path,
        committed = ?diff.committed,
        distance = diff.script.distance(),
        "computed diff"
    );

    print!("{}", render::render_script(&diff.script, render::color_enabled()));
    Ok(())
}
