//! Error types for the ingest crate

use std::io;
use thiserror::Error;

use logtide_registry::RegistryError;

/// Result type for ingest operations
pub type Result<T> = std::result::Result<T, IngestError>;

/// Errors that can fail an ingestion call
///
/// External store failures are deliberately absent: a store push failure
/// is recorded in the manifest, not raised.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Empty payload; nothing was registered
    #[error("empty upload")]
    EmptyUpload,

    /// Reading the upload failed mid-stream; nothing was registered
    #[error("hash computation failed: {0}")]
    HashFailed(#[from] io::Error),

    /// Registry rejected or failed a registration; any partial
    /// registration has been rolled back
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A redaction pattern failed to compile
    #[error("invalid redaction pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Compiler error
        #[source]
        source: regex::Error,
    },
}
