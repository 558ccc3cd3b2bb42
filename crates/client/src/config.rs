//! Service configuration: base URL and optional login credentials.
//!
//! Loaded from `<config dir>/bookmend/config.toml` when present, with
//! sensible defaults otherwise. The file is read-only as far as this crate
//! is concerned; nothing writes it back.

use crate::error::{ClientError, ClientResult};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://openlibrary.org";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the backing service
    pub base_url: String,
    /// Account username, required for writes to take effect
    pub username: Option<String>,
    /// Account password
    pub password: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: None,
            password: None,
        }
    }
}

impl ServiceConfig {
    /// Loads the config from the default location, falling back to defaults
    /// when no file exists.
    pub fn load() -> ClientResult<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Loads the config from an explicit path. A missing or unreadable file
    /// is an error here, unlike `load`.
    pub fn load_from(path: &Path) -> ClientResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ClientError::ConfigIo {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&contents).map_err(|e| ClientError::ConfigParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Canonical config file location under the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "bookmend").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// True when both username and password are present.
    pub fn has_credentials(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}
