//! Ignore pattern management for nora
//!
//! Supports multiple sources of ignore patterns:
//! 1. Built-in patterns (.nora/, .git/, editor temp files - always active)
//! 2. .noraignore patterns (enabled by default)
//! 3. .gitignore patterns (optional, disabled by default)
//! 4. Settings-based patterns (additional custom patterns)

use anyhow::{Context, Result};
use ::ignore::gitignore::{Gitignore, GitignoreBuilder, Glob};
use ::ignore::Match;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Patterns that are always ignored
const BUILTIN_PATTERNS: &[&str] = &[
    ".nora/",
    ".git/",
    ".svn/",
    "node_modules/",
    "*.tmp",
    "*.swp",
    ".noraignore",
];

/// Ignore rule manager
///
/// Combines the pattern sources with this precedence:
/// 1. Built-in patterns (always enforced)
/// 2. .noraignore (its `!` whitelists override .gitignore)
/// 3. .gitignore
/// 4. Additional patterns from settings
pub struct IgnoreRules {
    /// Repository root directory
    repo_root: PathBuf,

    builtin: Gitignore,

    noraignore: Option<Gitignore>,

    gitignore: Option<Gitignore>,

    additional: Option<Gitignore>,

    config: IgnoreConfig,
}

impl IgnoreRules {
    /// Load ignore rules for repository
    pub fn load(repo_root: &Path, config: IgnoreConfig) -> Result<Self> {
        let builtin = build_from_lines(repo_root, BUILTIN_PATTERNS.iter().copied())?
            .context("Built-in ignore patterns are empty")?;

        let mut rules = Self {
            repo_root: repo_root.to_path_buf(),
            builtin,
            noraignore: None,
            gitignore: None,
            additional: None,
            config,
        };

        rules.reload_ignore_files()?;
        Ok(rules)
    }

    /// Reload ignore files from disk
    pub fn reload_ignore_files(&mut self) -> Result<()> {
        self.noraignore = if self.config.use_noraignore {
            build_from_file(&self.repo_root, ".noraignore")?
        } else {
            None
        };

        self.gitignore = if self.config.use_gitignore {
            build_from_file(&self.repo_root, ".gitignore")?
        } else {
            None
        };

        self.additional = build_from_lines(
            &self.repo_root,
            self.config.additional_patterns.iter().map(String::as_str),
        )?;

        Ok(())
    }

    /// Check if a repo-relative path should be ignored
    ///
    /// A path is also ignored when one of its parent directories is.
    pub fn should_ignore(&self, path: &Path, is_dir: bool) -> bool {
        if is_match(&self.builtin, path, is_dir).is_ignore() {
            return true;
        }

        if let Some(noraignore) = &self.noraignore {
            match is_match(noraignore, path, is_dir) {
                Match::Ignore(_) => return true,
                Match::Whitelist(_) => return false,
                Match::None => {}
            }
        }

        if let Some(gitignore) = &self.gitignore {
            if is_match(gitignore, path, is_dir).is_ignore() {
                return true;
            }
        }

        if let Some(additional) = &self.additional {
            if is_match(additional, path, is_dir).is_ignore() {
                return true;
            }
        }

        false
    }

    /// Get number of active ignore sources
    pub fn active_sources(&self) -> usize {
        1 + [&self.noraignore, &self.gitignore, &self.additional]
            .iter()
            .filter(|source| source.is_some())
            .count()
    }
}

fn is_match<'a>(matcher: &'a Gitignore, path: &Path, is_dir: bool) -> Match<&'a Glob> {
    matcher.matched_path_or_any_parents(path, is_dir)
}

fn build_from_file(repo_root: &Path, name: &str) -> Result<Option<Gitignore>> {
    let path = repo_root.join(name);
    if !path.is_file() {
        return Ok(None);
    }

    let mut builder = GitignoreBuilder::new(repo_root);
    if let Some(err) = builder.add(&path) {
        tracing::warn!(file = %path.display(), error = %err, "skipping malformed ignore patterns");
    }
    let matcher = builder
        .build()
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(Some(matcher))
}

fn build_from_lines<'a>(
    repo_root: &Path,
    lines: impl IntoIterator<Item = &'a str>,
) -> Result<Option<Gitignore>> {
    let mut builder = GitignoreBuilder::new(repo_root);
    let mut count = 0;
    for line in lines {
        builder
            .add_line(None, line)
            .with_context(|| format!("Invalid ignore pattern: {}", line))?;
        count += 1;
    }

    if count == 0 {
        return Ok(None);
    }
    Ok(Some(builder.build().context("Failed to build ignore patterns")?))
}

/// Ignore configuration (`[ignore]` in `.nora/settings.toml`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreConfig {
    /// Use .gitignore patterns (default: false)
    #[serde(default)]
    pub use_gitignore: bool,

    /// Use .noraignore patterns (default: true)
    #[serde(default = "default_true")]
    pub use_noraignore: bool,

    /// Additional gitignore-style patterns
    #[serde(default)]
    pub additional_patterns: Vec<String>,
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            use_gitignore: false,
            use_noraignore: true,
            additional_patterns: vec![],
        }
    }
}

fn default_true() -> bool {
    true
}
