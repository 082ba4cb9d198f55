//! Timelines (branches) and the active-timeline config

use crate::snapshot::{empty_as_none, SnapshotId};
use nora_core::store::{read_json, write_json};
use nora_core::{NoraError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Timeline created by `init` and used when the config is missing
pub const DEFAULT_TIMELINE: &str = "main";

/// A named, independently advancing history of snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub name: String,
    #[serde(with = "empty_as_none", default)]
    pub current: Option<SnapshotId>,
    /// Append-only, oldest first
    #[serde(default)]
    pub snapshots: Vec<SnapshotId>,
}

impl Timeline {
    pub fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            current: None,
            snapshots: Vec::new(),
        }
    }

    /// Move `current` to `id` and append it to the history
    ///
    /// Re-applying the same tip is a no-op.
    pub fn advance(&mut self, id: SnapshotId) {
        if self.snapshots.last() != Some(&id) {
            self.snapshots.push(id.clone());
        }
        self.current = Some(id);
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

/// Process-wide state: active timeline plus the known timeline names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub current_timeline: String,
    #[serde(default)]
    pub timelines: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            current_timeline: DEFAULT_TIMELINE.to_string(),
            timelines: BTreeMap::from([(
                DEFAULT_TIMELINE.to_string(),
                DEFAULT_TIMELINE.to_string(),
            )]),
        }
    }
}

/// Manages `timelines/<name>.json` and `config/config.json`
///
/// The config is loaded at the start of every operation and saved at the
/// end; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct TimelineManager {
    timelines_dir: PathBuf,
    config_path: PathBuf,
    tmp_dir: PathBuf,
}

impl TimelineManager {
    pub fn new(
        timelines_dir: impl Into<PathBuf>,
        config_path: impl Into<PathBuf>,
        tmp_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            timelines_dir: timelines_dir.into(),
            config_path: config_path.into(),
            tmp_dir: tmp_dir.into(),
        }
    }

    /// Load the config, creating and persisting the default when absent
    pub fn load_config(&self) -> Result<Config> {
        let Some(mut config) = read_json::<Config>(&self.config_path)? else {
            tracing::warn!("config missing, creating default");
            let config = Config::default();
            self.save_config(&config)?;
            return Ok(config);
        };

        // The active timeline must always be a known one
        if !config.current_timeline.is_empty()
            && !config.timelines.contains_key(&config.current_timeline)
        {
            tracing::warn!(timeline = %config.current_timeline, "registering unknown active timeline");
            config
                .timelines
                .insert(config.current_timeline.clone(), config.current_timeline.clone());
            self.save_config(&config)?;
        }

        Ok(config)
    }

    pub fn save_config(&self, config: &Config) -> Result<()> {
        write_json(&self.tmp_dir, &self.config_path, config)
    }

    /// Create an empty timeline and make it the active one
    ///
    /// Creating a timeline always switches to it; there is no mode that
    /// creates without switching.
    pub fn create_and_switch(&self, name: &str) -> Result<Timeline> {
        validate_name(name)?;

        let path = self.path_for(name);
        if path.exists() {
            return Err(NoraError::validation(format!(
                "timeline already exists: {}",
                name
            )));
        }

        let timeline = Timeline::empty(name);
        self.update(&timeline)?;

        let mut config = self.load_config()?;
        config.timelines.insert(name.to_string(), name.to_string());
        config.current_timeline = name.to_string();
        self.save_config(&config)?;

        tracing::info!(timeline = name, "created timeline and switched to it");
        Ok(timeline)
    }

    /// Make an existing timeline the active one
    pub fn switch(&self, name: &str) -> Result<Timeline> {
        let timeline = self.get(name)?;

        let mut config = self.load_config()?;
        config.timelines.insert(name.to_string(), name.to_string());
        config.current_timeline = name.to_string();
        self.save_config(&config)?;

        tracing::info!(timeline = name, "switched timeline");
        Ok(timeline)
    }

    /// Load the active timeline, creating an empty record if its file is missing
    pub fn current(&self) -> Result<Timeline> {
        let config = self.load_config()?;
        let name = active_name(config)?;

        match read_json::<Timeline>(&self.path_for(&name))? {
            Some(timeline) => Ok(timeline),
            None => {
                tracing::warn!(timeline = %name, "timeline file missing, creating empty timeline");
                let timeline = Timeline::empty(&name);
                self.update(&timeline)?;
                Ok(timeline)
            }
        }
    }

    /// Load the active timeline without writing anything
    ///
    /// A missing config or timeline file reads as the default that
    /// `current` would persist. Used by commands running without the lock.
    pub fn peek_current(&self) -> Result<Timeline> {
        let config = read_json::<Config>(&self.config_path)?.unwrap_or_default();
        let name = active_name(config)?;

        Ok(read_json::<Timeline>(&self.path_for(&name))?
            .unwrap_or_else(|| Timeline::empty(&name)))
    }

    /// Load a timeline by name
    pub fn get(&self, name: &str) -> Result<Timeline> {
        validate_name(name)?;
        read_json(&self.path_for(name))?.ok_or_else(|| NoraError::not_found("timeline", name))
    }

    /// Persist the full timeline record
    pub fn update(&self, timeline: &Timeline) -> Result<()> {
        write_json(&self.tmp_dir, &self.path_for(&timeline.name), timeline)
    }

    /// Active timeline name and all known names
    pub fn list(&self) -> Result<(String, Vec<String>)> {
        let config = self.load_config()?;
        let names = config.timelines.keys().cloned().collect();
        Ok((config.current_timeline, names))
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.timelines_dir.join(format!("{}.json", name))
    }
}

fn active_name(config: Config) -> Result<String> {
    if config.current_timeline.is_empty() {
        return Err(NoraError::validation("no current timeline set"));
    }
    validate_name(&config.current_timeline)?;
    Ok(config.current_timeline)
}

/// Timeline names become file names
fn validate_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control);

    if invalid {
        return Err(NoraError::validation(format!("invalid timeline name: '{}'", name)));
    }
    Ok(())
}
