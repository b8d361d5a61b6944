//! Error types for the tail crate

use thiserror::Error;

/// Errors that can occur in the tail broadcaster
#[derive(Debug, Error)]
pub enum TailError {
    /// Maximum subscribers reached for one file
    #[error("maximum subscribers reached ({max})")]
    MaxSubscribers {
        /// The configured limit
        max: usize,
    },

    /// The file's stream was shut down by the server
    #[error("tail point closed")]
    Closed,
}

/// Result type for tail operations
pub type Result<T> = std::result::Result<T, TailError>;
