//! Logtide Protocol - core types for the ingestion and live-tail pipeline
//!
//! This crate provides the foundational types that flow through the pipeline:
//! - `LogRecord` - one structured log line as delivered to viewers
//! - `LogFile` / `FileKind` - registry metadata for an original/sanitized pair
//! - `ContentHash` - SHA-256 digest of file content
//! - `UploadManifest` - the summary returned after an ingestion call
//! - `split_lines` - line splitting that keeps a final unterminated line
//!
//! # Design Principles
//!
//! - **Immutable metadata**: a `LogFile` never changes after registration;
//!   new uploads supersede, they never mutate.
//! - **Hashes are content-addressed**: two uploads of identical bytes yield
//!   an identical `ContentHash`; the hash is never used as an identity key.
//! - **Arc-friendly**: records are cheap to share across subscribers.

mod error;
mod file;
mod hash;
mod lines;
mod manifest;
mod record;

pub use error::ProtocolError;
pub use file::{FileId, FileKind, LogFile, UploadId};
pub use hash::ContentHash;
pub use lines::{ends_with_terminator, split_lines};
pub use manifest::UploadManifest;
pub use record::{LogLevel, LogRecord};

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;
