//! The artifact store trait

use async_trait::async_trait;

use crate::error::Result;

/// A write-sink for sanitized artifacts
///
/// Implementations must be safe to call concurrently; the pipeline pushes
/// from many ingestion calls in parallel.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Store the artifact under the given name, overwriting any previous
    /// artifact with the same name
    async fn put(&self, name: &str, bytes: &[u8]) -> Result<()>;

    /// Short identifier used in logs
    fn kind(&self) -> &'static str;
}
