//! Config file loading
//!
//! Read from `<config dir>/logsift/config.toml` unless a path is given.
//! Missing files and missing keys fall back to defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

use logsift_filter::{DEFAULT_APPLY_DELAY, FilterAction, Matching};

const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub filter: FilterConfig,
    pub store: StoreConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterConfig {
    /// Simulated apply latency
    pub delay_ms: u64,
    /// Initial retain/remove choice
    pub action: FilterAction,
    /// Initial any/all choice
    pub matching: Matching,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_APPLY_DELAY.as_millis() as u64,
            action: FilterAction::default(),
            matching: Matching::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Saved filters file; platform data dir when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 250 }
    }
}

impl Config {
    /// Load from `path`, or the default location when `None`
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        };

        Self::parse(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply_delay(&self) -> Duration {
        Duration::from_millis(self.filter.delay_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.ui.tick_rate_ms.max(10))
    }
}

/// `<config dir>/logsift/config.toml`
pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "logsift").map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full() {
        let config = Config::parse(
            r#"
            [filter]
            delay_ms = 250
            action = "remove"
            matching = "all"

            [store]
            path = "/tmp/filters.json"

            [ui]
            tick_rate_ms = 100
            "#,
        )
        .unwrap();

        assert_eq!(config.apply_delay(), Duration::from_millis(250));
        assert_eq!(config.filter.action, FilterAction::Remove);
        assert_eq!(config.filter.matching, Matching::All);
        assert_eq!(config.store.path, Some(PathBuf::from("/tmp/filters.json")));
        assert_eq!(config.tick_rate(), Duration::from_millis(100));
    }

    #[test]
    fn test_parse_partial_uses_defaults() {
        let config = Config::parse("[filter]\naction = \"remove\"\n").unwrap();
        assert_eq!(config.filter.action, FilterAction::Remove);
        assert_eq!(config.filter.matching, Matching::Any);
        assert_eq!(config.apply_delay(), Duration::from_secs(1));
        assert_eq!(config.ui, UiConfig::default());
        assert!(config.store.path.is_none());
    }

    #[test]
    fn test_parse_rejects_unknown_action() {
        assert!(Config::parse("[filter]\naction = \"keep\"\n").is_err());
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[ui]\ntick_rate_ms = 1").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.tick_rate(), Duration::from_millis(10));
    }
}
