//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::dashboard::SortKey;

/// Default API base, matching the reverse proxy layout of the dashboard (`/api/...`)
pub const DEFAULT_API_URL: &str = "http://localhost/api";

/// Default polling interval for `watch`
pub const DEFAULT_REFRESH_SECS: u64 = 30;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Name of the per-directory config file
pub const LOCAL_CONFIG_FILE: &str = ".fleetdash.yaml";

/// fleetdash configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the fleet API
    pub api_url: Option<String>,

    /// Seconds between refreshes in `watch`
    pub refresh_secs: Option<u64>,

    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,

    /// Sort order used when `--sort` is not given
    pub default_sort: Option<SortKey>,

    /// Default output format
    pub default_format: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Invalid config in {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (accessors fall back to them)

        // 2. Global user config (~/.config/fleetdash/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            config.merge_file(&global_path);
        }

        // 3. Local config (./.fleetdash.yaml)
        if let Some(local_path) = Self::local_config_path() {
            config.merge_file(&local_path);
        }

        // 4. Environment variables
        config.apply_env(|key| std::env::var(key).ok());

        config
    }

    fn merge_file(&mut self, path: &Path) {
        if !path.exists() {
            return;
        }
        match Self::from_file(path) {
            Ok(layer) => {
                debug!(path = %path.display(), "loaded config layer");
                self.merge(layer);
            }
            Err(e) => warn!("{}", e),
        }
    }

    /// Parse a single YAML config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Apply `FLEETDASH_*` environment overrides through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("FLEETDASH_API_URL").filter(|u| !u.is_empty()) {
            self.api_url = Some(url);
        }
        if let Some(secs) = lookup("FLEETDASH_REFRESH_SECS").and_then(|s| s.parse().ok()) {
            self.refresh_secs = Some(secs);
        }
        if let Some(secs) = lookup("FLEETDASH_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            self.timeout_secs = Some(secs);
        }
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "fleetdash")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Get the path to the local config file in the working directory
    pub fn local_config_path() -> Option<PathBuf> {
        std::env::current_dir()
            .ok()
            .map(|dir| dir.join(LOCAL_CONFIG_FILE))
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.api_url.is_some() {
            self.api_url = other.api_url;
        }
        if other.refresh_secs.is_some() {
            self.refresh_secs = other.refresh_secs;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.default_sort.is_some() {
            self.default_sort = other.default_sort;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// Refresh interval; never shorter than one second
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs.unwrap_or(DEFAULT_REFRESH_SECS).max(1))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS).max(1))
    }

    pub fn default_sort(&self) -> SortKey {
        self.default_sort.unwrap_or_default()
    }
}
