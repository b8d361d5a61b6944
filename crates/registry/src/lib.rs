//! Logtide Registry - catalog of ingested log files
//!
//! The registry exclusively owns `LogFile` lifecycle: it registers
//! original/sanitized pairs, lists them for the UI, opens offset-addressed
//! readers for the tail broadcaster, and removes pairs atomically.
//!
//! # Ownership
//!
//! - The catalog index is the only shared mutable state; callers never see
//!   the underlying store directly.
//! - Content is written once at registration and only grows via `append`
//!   (single writer per file); metadata never changes apart from the size
//!   bookkeeping that append requires.
//!
//! # Layout
//!
//! Each registered file's content lives under the data dir, named by its
//! `FileId`. Display names are catalog metadata, so duplicate display
//! names never collide on disk.

mod error;
mod registry;

pub use error::{RegistryError, Result};
pub use registry::{FileRegistry, ListOrder};
