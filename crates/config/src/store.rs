//! External artifact store configuration

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Which artifact store implementation to run
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// No external store; manifests report `azure_uploaded = false`
    #[default]
    None,
    /// Mirror sanitized artifacts into a local directory
    Disk,
    /// Accept and discard (for load testing the pipeline)
    Null,
}

/// External store for sanitized artifacts
///
/// The store is a pure write-sink: a push failure is recorded in the upload
/// manifest but never fails the ingestion.
///
/// # Example
///
/// ```toml
/// [store]
/// kind = "disk"
/// path = "sanitized/"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store implementation
    pub kind: StoreKind,

    /// Target directory (required for `kind = "disk"`)
    pub path: Option<PathBuf>,
}

impl StoreConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.kind == StoreKind::Disk && self.path.is_none() {
            return Err(ConfigError::missing_field("store", "path"));
        }
        Ok(())
    }
}
