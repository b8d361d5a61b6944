//! Registry storage configuration

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Where registered files are kept and how name collisions are treated
///
/// # Example
///
/// ```toml
/// [storage]
/// data_dir = "logs/"
/// reject_duplicate_names = false
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding registered file content
    pub data_dir: PathBuf,

    /// Reject a register call whose display name is already claimed by a
    /// file with different content. The default keeps the always-append
    /// policy: duplicates are allowed and versioned by id.
    pub reject_duplicate_names: bool,
}

impl StorageConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::missing_field("storage", "data_dir"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("logs"),
            reject_duplicate_names: false,
        }
    }
}
