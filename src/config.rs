use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    API_URL_ENV, CONFIG_DIR, CONFIG_FILE, DEFAULT_API_URL, DEFAULT_LOG_FILE, DEFAULT_PAGE_SIZE,
    DEFAULT_TIMEOUT_SECS,
};
use crate::models::AuthType;
use crate::table::pagination::validate_page_size;

/// Settings read from `~/.userboard/config.yaml`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL; users are fetched from `{api_url}/users`
    pub api_url: String,
    /// Serve users from this JSON file instead of the API
    pub data_file: Option<PathBuf>,
    pub auth: AuthType,
    pub page_size: usize,
    pub request_timeout_secs: u64,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: String::from(DEFAULT_API_URL),
            data_file: None,
            auth: AuthType::None,
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::default_path())?;
        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.api_url = url;
            config.normalize();
        }
        Ok(config)
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let mut config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        config.normalize();
        Ok(config)
    }

    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR)
            .join(CONFIG_FILE)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Settings that can't be used are replaced with defaults
    fn normalize(&mut self) {
        if let Err(e) = validate_page_size(self.page_size) {
            tracing::warn!(error = %e, "Falling back to default page size");
            self.page_size = DEFAULT_PAGE_SIZE;
        }
        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = DEFAULT_TIMEOUT_SECS;
        }
        let trimmed = self.api_url.trim_end_matches('/').len();
        self.api_url.truncate(trimmed);
    }
}
