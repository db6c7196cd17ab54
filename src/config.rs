//! TOML-based tracker configuration.
//!
//! ```toml
//! storage_key = "followThroughChallenge_v2"
//! data_dir = "/home/me/.local/share/followthrough"
//! ```
//!
//! Every key is optional. Without `data_dir` the snapshot lives under the
//! platform data directory.

use crate::storage::FileSlot;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Slot name used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "followThroughChallenge_v2";

const APP_DIR: &str = "followthrough";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("No platform data directory; set data_dir explicitly")]
    NoDataDir,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            data_dir: None,
        }
    }
}

impl TrackerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read a config file; a missing file means all defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Directory holding the snapshot file.
    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(ConfigError::NoDataDir),
        }
    }

    /// `<data_dir>/<storage_key>.json`
    pub fn slot_path(&self) -> Result<PathBuf, ConfigError> {
        Ok(self.data_dir()?.join(format!("{}.json", self.storage_key)))
    }

    pub fn file_slot(&self) -> Result<FileSlot, ConfigError> {
        self.slot_path().map(FileSlot::new)
    }
}
