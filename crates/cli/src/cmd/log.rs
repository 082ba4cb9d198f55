//! Show the active timeline's snapshot history

use crate::{render, util};
use anyhow::Result;

pub fn run(limit: Option<usize>) -> Result<()> {
    let repo = util::open_repository()?;
    let (timeline, history) = repo.log(limit)?;

    println!("On timeline: {}", timeline.name);
    println!();

    if history.is_empty() {
        println!("No snapshots yet");
        return Ok(());
    }

    let color = render::color_enabled();
    for snapshot in &history {
        println!("{}", render::render_log_entry(snapshot, color));
    }

    Ok(())
}
