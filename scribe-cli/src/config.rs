//! Configuration file for the command line client.
//!
//! All default values live in `config.default.toml`, embedded at compile
//! time. A user file is deep-merged on top; command line flags (and
//! `SCRIBE_API_URL`) override individual values afterwards.

use std::{fs, path::Path, path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::log_level::{LogLevel, TargetLevel};

/// Embedded copy of the default configuration.
pub const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

/// Error that can occur when reading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigReadError {
    /// The file did not exist or could not be read.
    #[error("config file not readable: {0}")]
    ConfigFileNotFound(#[from] std::io::Error),
    /// The TOML was syntactically invalid or did not match the schema.
    #[error("config file is not valid TOML: {0}")]
    ConfigFileNotValid(#[from] toml::de::Error),
    /// Failed to merge defaults with overrides.
    #[error("failed to merge embedded and user TOML: {0}")]
    ConfigMergeError(String),
}

/// `[api]`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ApiToml {
    pub base_url: Url,
    /// Seconds; `0` means no timeout.
    pub timeout_secs: u64,
}

impl ApiToml {
    /// Request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// `[session]`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct SessionToml {
    /// Snapshot file; the platform data dir when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// `[logging]`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LoggingToml {
    pub level: LogLevel,
    #[serde(default)]
    pub module_levels: Vec<TargetLevel>,
}

/// The whole client configuration.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ConfigToml {
    pub api: ApiToml,
    #[serde(default)]
    pub session: SessionToml,
    pub logging: LoggingToml,
}

impl ConfigToml {
    /// The embedded defaults alone.
    pub fn defaults() -> Result<Self, ConfigReadError> {
        Self::from_str_with_defaults("")
    }

    /// Read a TOML file and overlay it on the embedded defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigReadError> {
        let raw = fs::read_to_string(path)?;
        Self::from_str_with_defaults(&raw)
    }

    /// Parse `raw` and overlay it on the embedded defaults.
    pub fn from_str_with_defaults(raw: &str) -> Result<Self, ConfigReadError> {
        let default_val: toml::Value = DEFAULT_CONFIG.parse()?;
        let user_val: toml::Value = raw.parse()?;

        let merged_val = serde_toml_merge::merge(default_val, user_val)
            .map_err(|e| ConfigReadError::ConfigMergeError(e.to_string()))?;

        Ok(merged_val.try_into()?)
    }

    /// Load the explicit `path`, else `<config dir>/scribe/config.toml` if it
    /// exists, else the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigReadError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => Self::from_file(path),
            _ => Self::defaults(),
        }
    }
}

/// `<platform config dir>/scribe/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("scribe").join("config.toml"))
}
