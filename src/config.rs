/// Application configuration
///
/// Settings are read from `<config dir>/merge-lucky/config.json` when the file
/// exists. Every field has a default, so a partial file is fine. The merge
/// endpoint can also be overridden with the `MERGE_LUCKY_ENDPOINT` variable.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::lucky::WeightingScheme;

/// Directory name used under the platform config/data directories
const APP_DIR: &str = "merge-lucky";

/// Environment variable overriding `merge_endpoint`
pub const ENDPOINT_ENV: &str = "MERGE_LUCKY_ENDPOINT";

/// Default merge service endpoint
pub const DEFAULT_ENDPOINT: &str =
    "https://dh1o9nmzy8.execute-api.ap-northeast-2.amazonaws.com/prod/merge";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config file {} is malformed: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// URL the merge request is POSTed to
    pub merge_endpoint: String,
    /// Optional request timeout in seconds (none = wait forever)
    pub request_timeout_secs: Option<u64>,
    /// Maximum number of images in the collection
    pub max_files: usize,
    /// Maximum accepted size of a single image in bytes
    pub max_file_size: u64,
    /// Number of lucky number records kept in history
    pub history_limit: usize,
    /// Weighting scheme used by the lucky number draw
    pub weighting: WeightingScheme,
    /// SQLite file backing the local store (None = platform data dir)
    pub store_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            merge_endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: None,
            max_files: 100,
            max_file_size: 32 * 1024 * 1024,
            history_limit: 30,
            weighting: WeightingScheme::default(),
            store_path: None,
        }
    }
}

impl AppConfig {
    /// Load the config from the platform config directory, falling back to
    /// defaults when no file exists, then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env(std::env::var(ENDPOINT_ENV).ok());
        Ok(config)
    }

    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_env(&mut self, endpoint: Option<String>) {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            self.merge_endpoint = endpoint.trim().to_string();
        }
    }

    /// ~/.config/merge-lucky/config.json on Linux
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.json"))
    }

    /// Where the local store lives
    pub fn store_path(&self) -> PathBuf {
        if let Some(path) = &self.store_path {
            return path.clone();
        }
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        path.push(APP_DIR);
        path.push("local_store.db");
        path
    }
}
