//! Run configuration
//!
//! Loaded from a TOML file such as:
//!
//! ```toml
//! [run]
//! events = 1000
//! seed = 42
//! workers = 1
//!
//! [output]
//! path = "x_3872.jsonl"
//! order = "declaration"
//! ```
//!
//! Every field has a default, so a missing file section or key falls back
//! to it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::registry::ExportOrder;

/// Error while loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub run: RunSection,

    #[serde(default)]
    pub output: OutputSection,
}

/// Event loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSection {
    /// Number of generation attempts
    #[serde(default = "default_events")]
    pub events: usize,

    /// Seed of the toy event source
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Worker threads, each with its own registry
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            events: default_events(),
            seed: default_seed(),
            workers: default_workers(),
        }
    }
}

fn default_events() -> usize {
    1000
}

fn default_seed() -> u64 {
    42
}

fn default_workers() -> usize {
    1
}

/// Export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSection {
    /// Export file, created or overwritten
    #[serde(default = "default_path")]
    pub path: PathBuf,

    #[serde(default)]
    pub order: ExportOrder,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            path: default_path(),
            order: ExportOrder::default(),
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from("x_3872.jsonl")
}

impl RunConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.run.workers == 0 {
            return Err(ConfigError::Invalid(
                "run.workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Default configuration rendered as TOML
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}
