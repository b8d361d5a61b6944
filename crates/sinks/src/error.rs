//! Error types for artifact stores

use std::io;
use thiserror::Error;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur pushing an artifact to an external store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store initialization failed
    #[error("failed to initialize store: {0}")]
    Init(String),

    /// The store rejected or failed the write
    #[error("write failed: {0}")]
    Write(String),

    /// The store is unreachable
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// I/O error (disk-backed stores)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
