//! Configuration loading
//!
//! Reads the record endpoint and request timeout from a YAML file.
//! The file is optional and is never written by this crate.
//!
//! Configuration files live in platform-specific directories:
//! - macOS: `~/Library/Application Support/staffkit/config.yaml`
//! - Linux: `~/.config/staffkit/config.yaml`
//! - Windows: `%APPDATA%\staffkit\config.yaml`
//!
//! ```yaml
//! endpoint: https://api.example.com/employees
//! timeout_secs: 5
//! ```

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::repository::DEFAULT_TIMEOUT_SECS;

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Settings for [`crate::RecordRepository`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryConfig {
    /// URL returning the JSON record array
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl RepositoryConfig {
    /// Loads configuration from the default config file location
    ///
    /// # Returns
    /// - `Ok(config)` with the loaded values, or defaults if the file doesn't exist
    /// - `Err` if the file exists but cannot be read or parsed
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads configuration from a specific file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid YAML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", path))
    }

    /// Returns the platform-specific configuration file path
    ///
    /// Falls back to `~/.config/staffkit/config.yaml` if platform detection fails.
    ///
    /// # Errors
    /// Returns an error if the HOME environment variable is not set (fallback case only).
    pub fn config_path() -> Result<PathBuf> {
        if let Some(proj_dirs) = ProjectDirs::from("", "", "staffkit") {
            Ok(proj_dirs.config_dir().join("config.yaml"))
        } else {
            let home = std::env::var("HOME").context("HOME not set")?;
            Ok(PathBuf::from(home).join(".config/staffkit/config.yaml"))
        }
    }

    /// The configured timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
