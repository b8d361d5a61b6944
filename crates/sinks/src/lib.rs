//! Logtide Sinks - external stores for sanitized artifacts
//!
//! After the ingestion pipeline produces a sanitized artifact it can push
//! the bytes to an external store. The store is strictly a write-sink:
//! the pipeline records whether the push succeeded in the upload manifest,
//! and a failed push never fails the ingestion - local registry durability
//! is the primary guarantee.
//!
//! Implementations:
//! - [`DiskStore`] - mirror artifacts into a local directory
//! - [`NullStore`] - accept and discard (pipeline load testing)
//!
//! A real blob provider (Azure, S3, ...) plugs in through the same
//! [`ArtifactStore`] trait.

mod disk;
mod error;
mod null;
mod store;

pub use disk::DiskStore;
pub use error::{Result, StoreError};
pub use null::NullStore;
pub use store::ArtifactStore;
