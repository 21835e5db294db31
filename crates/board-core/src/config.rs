use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::platform;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Title drawn into the top border of the board frame.
    #[serde(default = "default_title")]
    pub title: String,
    /// Period of the clock tick. The colon blinks once per tick.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Schedule file selected automatically at startup.
    #[serde(default)]
    pub initial_file: Option<PathBuf>,
    /// Operator notice shown above the schedule until edited.
    #[serde(default)]
    pub notice: Option<String>,
}

/// User-configurable paths for schedule files and logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory pre-filled into the open-file prompt.
    #[serde(default = "platform::default_schedule_dir")]
    pub schedule_dir: PathBuf,
    #[serde(default = "platform::default_log_file")]
    pub log_file: PathBuf,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            tick_interval_ms: default_tick_interval_ms(),
            initial_file: None,
            notice: None,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            schedule_dir: platform::default_schedule_dir(),
            log_file: platform::default_log_file(),
        }
    }
}

fn default_title() -> String {
    "Departures".to_string()
}

fn default_tick_interval_ms() -> u64 {
    1000
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Read `path`, writing a default config there first if it does not exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}
