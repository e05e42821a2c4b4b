//! Configuration loading and management
//!
//! Handles parsing of the `config.toml` file in the platform config
//! directory (or a path given with `--config`).

use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// File name of the configuration inside the config directory
pub const CONFIG_FILENAME: &str = "config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Task parsing configuration
    #[serde(default)]
    pub tasks: TasksConfig,

    /// Celebration banner configuration
    #[serde(default)]
    pub celebration: CelebrationConfig,

    /// Display strings and formats
    #[serde(default)]
    pub display: DisplayConfig,

    /// Terminal loop configuration
    #[serde(default)]
    pub ui: UiConfig,
}

/// Task parsing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Character separating tasks in the input text
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_delimiter() -> char {
    ','
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
        }
    }
}

/// Celebration banner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CelebrationConfig {
    /// Completed count at which the banner fires
    #[serde(default = "default_threshold")]
    pub threshold: usize,

    /// How long the banner stays visible
    #[serde(default = "default_banner_ms")]
    pub banner_ms: u64,
}

fn default_threshold() -> usize {
    3
}

fn default_banner_ms() -> u64 {
    2000
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            banner_ms: default_banner_ms(),
        }
    }
}

/// Display strings and formats
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// chrono strftime format for the date header
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Placeholder shown in the empty input panel
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Text of the celebration banner
    #[serde(default = "default_banner_text")]
    pub banner_text: String,
}

fn default_date_format() -> String {
    crate::date_header::LONG_DATE_FORMAT.to_string()
}

fn default_placeholder() -> String {
    "Enter your tasks".to_string()
}

fn default_banner_text() -> String {
    "Well done!".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            placeholder: default_placeholder(),
            banner_text: default_banner_text(),
        }
    }
}

/// Terminal loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Upper bound on how long the loop waits for input before checking timers
    #[serde(default = "default_poll_ms")]
    pub poll_ms: u64,
}

fn default_poll_ms() -> u64 {
    120
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            poll_ms: default_poll_ms(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`, or the default location, or return defaults.
    ///
    /// Unreadable or invalid files fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Ok(path) => path,
                Err(_) => return Self::default(),
            },
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring invalid config");
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<()> {
        self.tasks.validate()?;
        self.celebration.validate()?;
        self.display.validate()?;
        if self.ui.poll_ms == 0 {
            return Err(Error::InvalidConfig("ui.poll_ms must be > 0".to_string()));
        }
        Ok(())
    }
}

impl TasksConfig {
    fn validate(&self) -> Result<()> {
        if self.delimiter.is_whitespace() {
            return Err(Error::InvalidConfig(
                "tasks.delimiter cannot be whitespace".to_string(),
            ));
        }
        Ok(())
    }
}

impl CelebrationConfig {
    fn validate(&self) -> Result<()> {
        if self.threshold == 0 {
            return Err(Error::InvalidConfig(
                "celebration.threshold must be >= 1".to_string(),
            ));
        }
        if self.banner_ms == 0 {
            return Err(Error::InvalidConfig(
                "celebration.banner_ms must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl DisplayConfig {
    fn validate(&self) -> Result<()> {
        if self.date_format.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "display.date_format cannot be empty".to_string(),
            ));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(Error::InvalidConfig(format!(
                "display.date_format: invalid format '{}'",
                self.date_format
            )));
        }
        Ok(())
    }
}

/// Platform directories for easytask
pub fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "easytask").ok_or(Error::NoHomeDir("easytask"))
}

/// Default location of `config.toml`
pub fn default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_are_expected() {
        let cfg = Config::default();
        assert_eq!(cfg.tasks.delimiter, ',');
        assert_eq!(cfg.celebration.threshold, 3);
        assert_eq!(cfg.celebration.banner_ms, 2000);
        assert_eq!(cfg.display.date_format, "%B %-d, %Y");
        assert_eq!(cfg.display.placeholder, "Enter your tasks");
        assert_eq!(cfg.display.banner_text, "Well done!");
        assert_eq!(cfg.ui.poll_ms, 120);
    }

    #[test]
    fn load_parses_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILENAME);
        let content = r#"
[tasks]
delimiter = ";"

[celebration]
threshold = 5
banner_ms = 500

[display]
date_format = "%Y-%m-%d"
banner_text = "Nice!"
"#;
        fs::write(&path, content).expect("write config");

        let cfg = Config::load(&path).expect("load config");
        assert_eq!(cfg.tasks.delimiter, ';');
        assert_eq!(cfg.celebration.threshold, 5);
        assert_eq!(cfg.celebration.banner_ms, 500);
        assert_eq!(cfg.display.date_format, "%Y-%m-%d");
        assert_eq!(cfg.display.banner_text, "Nice!");
        assert_eq!(cfg.display.placeholder, "Enter your tasks");
        assert_eq!(cfg.ui.poll_ms, 120);
    }

    #[test]
    fn load_rejects_zero_threshold() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "[celebration]\nthreshold = 0\n").expect("write config");

        let err = Config::load(&path).expect_err("zero threshold");
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn load_rejects_bad_date_format() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "[display]\ndate_format = \"%Q\"\n").expect("write config");

        let err = Config::load(&path).expect_err("bad format");
        assert!(err.to_string().contains("display.date_format"));
    }

    #[test]
    fn load_keeps_explicit_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "[celebration]\nthreshold = 7\n").expect("write config");

        let loaded = Config::load(&path).expect("load");
        assert_eq!(loaded.celebration.threshold, 7);
        assert_eq!(loaded.celebration.banner_ms, Config::default().celebration.banner_ms);
    }
}
