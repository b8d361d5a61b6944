//! Disk store - mirrors sanitized artifacts into a local directory
//!
//! Writes go to a temporary file first and are renamed into place, so a
//! crashed push never leaves a torn artifact visible under its final name.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::store::ArtifactStore;

/// Artifact store backed by a local directory
#[derive(Debug)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    /// Create a disk store rooted at `root`, creating the directory if
    /// needed
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .map_err(|err| StoreError::Init(format!("cannot create '{}': {err}", root.display())))?;
        Ok(Self { root })
    }

    /// The store's root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn target_path(&self, name: &str) -> Result<PathBuf> {
        // Artifact names are display names; refuse anything that would
        // escape the root
        if name.is_empty() || name.contains('/') || name.contains("..") {
            return Err(StoreError::Write(format!("invalid artifact name '{name}'")));
        }
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl ArtifactStore for DiskStore {
    async fn put(&self, name: &str, bytes: &[u8]) -> Result<()> {
        let target = self.target_path(name)?;
        let staging = self.root.join(format!(".{name}.partial"));

        tokio::fs::write(&staging, bytes).await?;
        tokio::fs::rename(&staging, &target).await?;

        debug!(name, size = bytes.len(), "stored artifact");
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "disk"
    }
}

#[cfg(test)]
#[path = "disk_test.rs"]
mod tests;
