//! Configuration handling for the unit service connection.
//!
//! Configuration is stored in `.unitdash/config.yaml`:
//!
//! ```yaml
//! api_url: https://units.example.com/api
//! api_token: abc123
//! ```
//!
//! The `UNITDASH_API_URL` and `UNITDASH_API_TOKEN` environment variables
//! override the file when set.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{DashboardError, Result};

pub const CONFIG_DIR: &str = ".unitdash";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Base URL of the unit service.
    pub api_url: Option<String>,

    /// Bearer token sent with every request, if the service requires one.
    pub api_token: Option<String>,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        PathBuf::from(CONFIG_DIR).join("config.yaml")
    }

    /// Load configuration from the default path with environment overrides
    /// applied. A missing file yields the default configuration.
    pub fn load() -> Result<Self> {
        Ok(Self::load_from(&Self::config_path())?.with_env_overrides())
    }

    /// Load configuration from a specific file, without env overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_yaml_ng::from_str(&content)?)
    }

    /// Apply `UNITDASH_API_URL` / `UNITDASH_API_TOKEN` on top of the file
    /// values. Blank variables are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = env::var("UNITDASH_API_URL")
            && !url.trim().is_empty()
        {
            self.api_url = Some(url);
        }
        if let Ok(token) = env::var("UNITDASH_API_TOKEN")
            && !token.trim().is_empty()
        {
            self.api_token = Some(token);
        }
        self
    }

    /// The configured API URL, or a config error telling the user how to
    /// set one.
    pub fn api_url(&self) -> Result<&str> {
        self.api_url.as_deref().ok_or_else(|| {
            DashboardError::Config(
                "no API URL configured; set api_url in .unitdash/config.yaml \
                 or the UNITDASH_API_URL environment variable"
                    .to_string(),
            )
        })
    }
}
