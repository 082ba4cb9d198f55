//! Nora CLI - nora command

use anyhow::Result;
use clap::{Parser, Subcommand};
use nora_cli::cmd;
use tracing_subscriber::EnvFilter;

/// Nora - a minimal local version-control engine
#[derive(Parser)]
#[command(name = "nora")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a repository in the current directory
    Init,
    /// Prepare files for the next snapshot (directories stage changed files)
    Prepare {
        /// Files or directories to prepare
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Remove files from the prepared set
    Forget {
        /// Files or directories to forget
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Create a snapshot from the prepared files
    Capture {
        /// Snapshot message
        message: String,
    },
    /// Show a snapshot's details
    Recall {
        /// Snapshot ID
        snapshot_id: String,
    },
    /// Show changes in a prepared file
    Diff {
        /// Prepared file
        path: String,
    },
    /// Show working tree status
    Status,
    /// Show the snapshot history of the current timeline
    Log {
        /// Number of snapshots to show (default: all)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Manage timelines
    #[command(subcommand)]
    Timeline(TimelineCommands),
}

#[derive(Subcommand)]
enum TimelineCommands {
    /// List all timelines
    List,
    /// Create a timeline and switch to it
    New {
        /// Timeline name
        name: String,
    },
    /// Switch to an existing timeline
    Switch {
        /// Timeline name
        name: String,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so command output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => cmd::init::run(),
        Commands::Prepare { paths } => cmd::prepare::run(&paths),
        Commands::Forget { paths } => cmd::forget::run(&paths),
        Commands::Capture { message } => cmd::capture::run(&message),
        Commands::Recall { snapshot_id } => cmd::recall::run(&snapshot_id),
        Commands::Diff { path } => cmd::diff::run(&path),
        Commands::Status => cmd::status::run(),
        Commands::Log { limit } => cmd::log::run(limit),
        Commands::Timeline(timeline_cmd) => match timeline_cmd {
            TimelineCommands::List => cmd::timeline::list(),
            TimelineCommands::New { name } => cmd::timeline::create(&name),
            TimelineCommands::Switch { name } => cmd::timeline::switch(&name),
        },
    }
}
