//! Logtide Ingest - from raw upload to registered, tailable pair
//!
//! This crate owns the write half of the system:
//!
//! - [`hash`]: SHA-256 content digests, including a streaming variant that
//!   propagates I/O errors instead of hashing a partial buffer
//! - [`redact`]: the redaction engine - a pluggable [`RedactionPolicy`]
//!   scanning one line at a time, plus the shipped [`RegexPolicy`]
//! - [`pipeline`]: the [`IngestPipeline`] orchestrating hash, register,
//!   sanitize, tail publish and the optional external store push
//!
//! # Flow
//!
//! ```text
//! raw bytes ─▶ hash ─▶ register original
//!                │
//!                ├─▶ split lines ─▶ scan ─▶ sanitized bytes
//!                │                           │
//!                │                  hash + register sanitized
//!                │                           │
//!                │                  ┌────────┴────────┐
//!                │                  ▼                 ▼
//!                │            tail publish     store push (non-fatal)
//!                ▼
//!          UploadManifest
//! ```

pub mod hash;
pub mod pipeline;
pub mod redact;

mod error;

pub use error::{IngestError, Result};
pub use pipeline::IngestPipeline;
pub use redact::{NoopPolicy, RedactionPolicy, RegexPolicy, Scan};
