//! CLI command execution helpers
//!
//! This module provides a wrapper around the `nora` CLI binary with
//! convenient assertion methods.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

/// CLI command builder
pub struct NoraCommand {
    binary_path: PathBuf,
    working_dir: PathBuf,
    args: Vec<String>,
    env: HashMap<String, String>,
}

impl NoraCommand {
    /// Create a new command in the given working directory
    pub fn new(working_dir: impl AsRef<Path>) -> Self {
        let mut env = HashMap::new();
        // Plain output keeps assertions independent of the terminal
        env.insert("NO_COLOR".to_string(), "1".to_string());

        Self {
            binary_path: PathBuf::from(env!("CARGO_BIN_EXE_nora")),
            working_dir: working_dir.as_ref().to_path_buf(),
            args: Vec::new(),
            env,
        }
    }

    /// Add command arguments
    pub fn args(&mut self, args: &[&str]) -> &mut Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(&mut self, key: &str, value: &str) -> &mut Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    /// Execute command and capture its output
    pub fn execute(&self) -> Result<CommandResult> {
        let output = Command::new(&self.binary_path)
            .args(&self.args)
            .current_dir(&self.working_dir)
            .env_remove("RUST_LOG")
            .envs(&self.env)
            .output()
            .context("Failed to execute command")?;

        Ok(CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }

    /// Execute and assert success
    pub fn assert_success(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if !result.success() {
            anyhow::bail!(
                "Command failed (exit code: {}):\nArgs: {:?}\nStdout: {}\nStderr: {}",
                result.exit_code,
                self.args,
                result.stdout,
                result.stderr
            );
        }

        Ok(result)
    }

    /// Execute and expect failure
    pub fn assert_failure(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if result.success() {
            anyhow::bail!(
                "Command should have failed but succeeded:\nArgs: {:?}\nStdout: {}",
                self.args,
                result.stdout
            );
        }

        Ok(result)
    }
}

/// Command execution result
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandResult {
    /// Check if command succeeded
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Check if stdout contains text
    pub fn contains_stdout(&self, text: &str) -> bool {
        self.stdout.contains(text)
    }

    /// Check if stderr contains text
    pub fn contains_stderr(&self, text: &str) -> bool {
        self.stderr.contains(text)
    }

    /// Parse the snapshot ID from `Created snapshot: <id>`
    pub fn parse_snapshot_id(&self) -> Option<String> {
        self.stdout
            .lines()
            .find_map(|line| line.strip_prefix("Created snapshot: "))
            .map(|id| id.trim().to_string())
    }
}

/// Macro for convenient command construction
///
/// Usage:
/// ```ignore
/// nora!(dir, "init").assert_success()?;
/// nora!(dir, "capture", "first").assert_success()?;
/// ```
#[macro_export]
macro_rules! nora {
    ($dir:expr, $($arg:expr),*) => {{
        let mut cmd = $crate::common::cli::NoraCommand::new($dir);
        cmd.args(&[$($arg),*]);
        cmd
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_id_extraction() {
        let result = CommandResult {
            stdout: "Prepared: foo.txt\nCreated snapshot: 0123456789ab\n".to_string(),
            stderr: String::new(),
            exit_code: 0,
        };
        assert_eq!(result.parse_snapshot_id(), Some("0123456789ab".to_string()));
    }
}
