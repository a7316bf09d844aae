//! Configuration types for the search widget.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use wiki_search::SearchConfig;

use crate::controller::DEFAULT_MIN_QUERY_LEN;
use crate::error::{Result, WidgetError};

/// Top-level configuration for the search widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Quiet period in milliseconds before typed input is searched.
    pub debounce_ms: u64,
    /// Minimum number of non-blank characters before a query is sent.
    pub min_query_len: usize,
    /// Search client settings (endpoint, timeout, result limit).
    pub search: SearchConfig,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            search: SearchConfig::default(),
        }
    }
}

impl WidgetConfig {
    /// The debounce delay as a [`Duration`].
    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Validates this configuration and the nested search configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::Config`] for a zero debounce delay or a zero
    /// minimum query length, and [`WidgetError::Search`] if the search
    /// settings are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.debounce_ms == 0 {
            return Err(WidgetError::Config(
                "debounce_ms must be greater than 0".into(),
            ));
        }
        if self.min_query_len == 0 {
            return Err(WidgetError::Config(
                "min_query_len must be at least 1".into(),
            ));
        }
        self.search.validate()?;
        Ok(())
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| WidgetError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| WidgetError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/wiki-widget/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("wiki-widget").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("wiki-widget")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/wiki-widget-config/config.toml")
        }
    }
}
