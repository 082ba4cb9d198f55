//! Terminal rendering of diffs, status lines and log entries

use crate::util::{format_absolute_time, format_relative_time};
use nora_core::{EditScript, StepKind};
use nora_journal::{FileState, Snapshot};
use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// Colors are used only on a terminal and when `NO_COLOR` is unset
pub fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").map_or(true, |v| v.is_empty()) && std::io::stdout().is_terminal()
}

/// Render an edit script one line per step
///
/// Keep lines are prefixed `"  "`, deletions `"- "` (red), additions `"+ "` (green).
pub fn render_script(script: &EditScript, color: bool) -> String {
    let mut output = String::new();

    for step in &script.steps {
        let line = match step.kind {
            StepKind::Keep => format!("  {}", step.content),
            StepKind::Delete => format!("- {}", step.content),
            StepKind::Add => format!("+ {}", step.content),
        };

        if color {
            match step.kind {
                StepKind::Keep => output.push_str(&line),
                StepKind::Delete => output.push_str(&line.red().to_string()),
                StepKind::Add => output.push_str(&line.green().to_string()),
            }
        } else {
            output.push_str(&line);
        }
        output.push('\n');
    }

    output
}

/// Render one `path: state` status line
pub fn render_status_line(path: &str, state: FileState, color: bool) -> String {
    let line = format!("{}: {}", path, state);
    if !color {
        return line;
    }

    match state {
        FileState::AddedPrepared | FileState::ModifiedPrepared => line.green().to_string(),
        FileState::Modified => line.red().to_string(),
        FileState::Untracked => line.blue().to_string(),
        FileState::Unchanged => line,
    }
}

/// Render one `log` entry: id, time and message
pub fn render_log_entry(snapshot: &Snapshot, color: bool) -> String {
    let time = format!(
        "{} ({})",
        format_absolute_time(snapshot.timestamp),
        format_relative_time(snapshot.timestamp)
    );
    let files = format!("{} files", snapshot.files.len());

    if color {
        format!(
            "{} {} {} - {}",
            snapshot.id.yellow(),
            time.dimmed(),
            snapshot.message,
            files.dimmed()
        )
    } else {
        format!("{} {} {} - {}", snapshot.id, time, snapshot.message, files)
    }
}
