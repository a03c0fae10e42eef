//! Configuration for docstore
//!
//! Loaded from an optional JSON file. Every field has a default, so an
//! empty object is a valid configuration. Command-line flags override
//! file values after loading.
//!
//! ```json
//! {
//!   "data_dir": "data",
//!   "index_file": "index.json",
//!   "pretty": true,
//!   "log": { "level": "info", "format": "text" }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        "DOCSTORE_CONFIG_ERROR"
    }
}

/// Output format of log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable single lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `docstore=debug`
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding one `<collection>.json` per collection and the index
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// File name of the index container inside `data_dir`
    #[serde(default = "default_index_file")]
    pub index_file: String,

    /// Two-space indented containers (default) or compact ones
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    #[serde(default)]
    pub log: LogConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_index_file() -> String {
    crate::index::DEFAULT_INDEX_FILE.to_string()
}
fn default_pretty() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            index_file: default_index_file(),
            pretty: default_pretty(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Default configuration rooted at `data_dir`
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Check values that deserialize fine but cannot be used
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("data_dir must not be empty".to_string()));
        }

        if !self.index_file.ends_with(".json") || self.index_file.len() <= ".json".len() {
            return Err(ConfigError::Invalid(format!(
                "index_file '{}' must be a non-empty name ending in .json",
                self.index_file
            )));
        }

        if self.index_file.contains(['/', '\\']) {
            return Err(ConfigError::Invalid(format!(
                "index_file '{}' must be a bare file name",
                self.index_file
            )));
        }

        if self.log.level.trim().is_empty() {
            return Err(ConfigError::Invalid("log.level must not be empty".to_string()));
        }

        Ok(())
    }

    /// Full path of the index container
    pub fn index_path(&self) -> PathBuf {
        self.data_dir.join(&self.index_file)
    }

    /// Collection name that would collide with the index container
    pub fn index_stem(&self) -> &str {
        self.index_file
            .strip_suffix(".json")
            .unwrap_or(&self.index_file)
    }
}
