//! Logtide Tail - per-file fan-out of log records to live subscribers
//!
//! This crate delivers each newly produced `LogRecord` of a file, in
//! production order, to every currently-subscribed session:
//!
//! - One append-only record log per file; subscribers track their own
//!   cursor into it, so a slow reader never stalls the producer or a
//!   fast reader on the same file.
//! - Bounded lag per subscriber: when a reader falls too far behind, its
//!   oldest pending records are dropped and the next delivered item
//!   carries a `gap` marker.
//! - Subscriptions are live, cancellable handles; dropping a handle
//!   releases its slot immediately and idempotently.
//! - Operations on independent files never contend.
//!
//! # Architecture
//!
//! ```text
//! ingestion / live producer
//!         │ publish()
//!         ▼
//!   TailBroadcaster ── FileId ──▶ TailPoint (append log + Notify)
//!                                     │
//!                          ┌──────────┼──────────┐
//!                          ▼          ▼          ▼
//!                     TailHandle  TailHandle  TailHandle
//!                     (cursor 0)  (cursor n)  (cursor n)
//! ```

mod broadcaster;
mod error;
mod handle;
mod point;

pub use broadcaster::TailBroadcaster;
pub use error::{Result, TailError};
pub use handle::{TailHandle, TailItem};
pub use point::{TailMode, TailPoint, TailStats};
