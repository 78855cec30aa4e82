//! Configuration (config.yaml)
//!
//! Says where the catalog and tag documents live and how remote documents
//! are fetched. A missing file means defaults; filter state is never part of
//! the configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::Location;

/// Default catalog document location
pub const DEFAULT_CATALOG: &str = "ecosystem.json";

/// Default timeout for remote documents (30 seconds)
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Config file name inside the config directory
const CONFIG_FILE: &str = "config.yaml";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Catalog document: a path or an http(s) URL
    #[serde(default = "default_catalog")]
    pub catalog: String,

    /// Optional tag description document: a path or an http(s) URL
    #[serde(default)]
    pub tags: Option<String>,

    /// Remote fetch settings
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// How remote documents are fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FetchConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_catalog() -> String {
    DEFAULT_CATALOG.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            tags: None,
            fetch: FetchConfig::default(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| concat!("ecosystem/", env!("CARGO_PKG_VERSION")).to_string())
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::default_path()?)
    }

    /// Load configuration from a specific path, falling back to defaults
    /// when the file does not exist
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = serde_yaml_ng::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.validate()?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the configuration, creating parent directories
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = self.to_yaml()?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self).context("Failed to serialize config")
    }

    /// Check values that parse but cannot work
    pub fn validate(&self) -> Result<()> {
        if self.catalog.trim().is_empty() {
            anyhow::bail!("catalog location must not be empty");
        }
        if matches!(&self.tags, Some(t) if t.trim().is_empty()) {
            anyhow::bail!("tags location must not be empty when set");
        }
        if self.fetch.timeout_secs == 0 {
            anyhow::bail!("fetch.timeout_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn catalog_location(&self) -> Location {
        Location::parse(&self.catalog)
    }

    pub fn tags_location(&self) -> Option<Location> {
        self.tags.as_deref().map(Location::parse)
    }

    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Get the config directory (not created here)
    fn config_dir() -> Result<PathBuf> {
        directories::ProjectDirs::from("rs", "ecosystem", "ecosystem")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .or_else(|| dirs::config_dir().map(|d| d.join("ecosystem")))
            .context("Could not determine config directory")
    }
}
