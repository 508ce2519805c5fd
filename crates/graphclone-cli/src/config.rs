//! CLI configuration

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Get default config file location
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("graphclone")
        .join("config.toml")
}

/// Configuration for the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Emit entities and links in ascending id order
    pub sort_links: bool,
    /// Pretty-print the output document
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sort_links: true,
            pretty: true,
        }
    }
}

impl Config {
    /// Load configuration from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn keys() -> &'static [&'static str] {
        &["sort_links", "pretty"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "sort_links" => Some(self.sort_links.to_string()),
            "pretty" => Some(self.pretty.to_string()),
            _ => None,
        }
    }
}
