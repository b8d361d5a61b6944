//! Error types for the protocol crate

use thiserror::Error;

/// Errors that can occur when parsing protocol types
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Hash string is not valid hex or has the wrong length
    #[error("invalid content hash '{value}': expected 64 hex characters")]
    InvalidHash {
        /// The offending input
        value: String,
    },

    /// Unknown file kind string
    #[error("unknown file kind '{value}': expected 'original' or 'sanitized'")]
    InvalidKind {
        /// The offending input
        value: String,
    },
}
