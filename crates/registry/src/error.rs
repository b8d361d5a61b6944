//! Error types for the registry crate

use std::io;
use thiserror::Error;

use logtide_protocol::FileId;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors that can occur in the file registry
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No file with the given id
    #[error("file not found: {id}")]
    NotFound {
        /// The missing id
        id: FileId,
    },

    /// No file with the given display name
    #[error("file not found: '{name}'")]
    NameNotFound {
        /// The missing name
        name: String,
    },

    /// No pair with the given upload id
    #[error("upload not found: {upload_id}")]
    UploadNotFound {
        /// The missing upload id
        upload_id: logtide_protocol::UploadId,
    },

    /// A different file already claims this display name
    /// (only when the registry is configured to reject duplicates)
    #[error("display name '{name}' is already registered with different content")]
    DuplicateName {
        /// The conflicting name
        name: String,
    },

    /// I/O error talking to the backing store
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A catalog record failed to encode or decode
    #[error("catalog record error: {0}")]
    Catalog(#[from] serde_json::Error),
}
