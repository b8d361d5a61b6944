//! Null store - accepts and discards artifacts
//!
//! Useful for exercising the pipeline's store path without any I/O.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::error::Result;
use crate::store::ArtifactStore;

/// Artifact store that discards everything it receives
#[derive(Debug, Default)]
pub struct NullStore {
    puts: AtomicU64,
}

impl NullStore {
    /// Create a null store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of artifacts accepted so far
    pub fn put_count(&self) -> u64 {
        self.puts.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ArtifactStore for NullStore {
    async fn put(&self, _name: &str, _bytes: &[u8]) -> Result<()> {
        self.puts.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "null"
    }
}
