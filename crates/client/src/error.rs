//! Client error types

use thiserror::Error;

/// Errors from the streaming client
///
/// Both variants are transient from the session's point of view: the
/// state machine answers them with a backoff and a fresh connection
/// attempt, never by giving up.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Opening a stream failed
    #[error("connect failed: {0}")]
    Connect(String),

    /// An established stream broke mid-flight
    #[error("stream broken: {0}")]
    Stream(String),
}

/// Convenience result alias for client operations
pub type Result<T> = std::result::Result<T, SessionError>;
