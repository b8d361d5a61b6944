//! TailPoint - the broadcast point for one file
//!
//! A `TailPoint` owns the file's append-only record log and the subscriber
//! bookkeeping. `publish` appends and wakes waiting subscribers; it never
//! blocks on any of them. Each subscriber reads through its own cursor
//! (see [`TailHandle`](crate::TailHandle)), so delivery speed is fully
//! independent per subscriber.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use parking_lot::RwLock;
use tokio::sync::Notify;
use tracing::{debug, trace};

use logtide_protocol::LogRecord;

use crate::error::{Result, TailError};
use crate::handle::TailHandle;

/// Default bound on how far a subscriber may lag behind the producer
pub(crate) const DEFAULT_MAX_LAG: usize = 1024;

/// Default cap on concurrent subscribers per file
pub(crate) const DEFAULT_MAX_SUBSCRIBERS: usize = 100;

/// Where a new subscription starts reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailMode {
    /// Start at the current tail; only records published after the
    /// subscription are delivered
    Live,
    /// Replay everything already in the log, then continue live
    FromStart,
}

/// The broadcast point for one file
#[derive(Debug)]
pub struct TailPoint {
    /// Append-only record log; cursors index into it
    log: RwLock<Vec<Arc<LogRecord>>>,
    /// Wakes subscribers parked at the tail
    notify: Notify,
    /// Set when the server shuts this stream down
    closed: AtomicBool,
    /// Active subscription count
    subscribers: AtomicUsize,
    /// Total records published
    published: AtomicU64,
    /// Total records skipped over by lagging subscribers
    dropped: AtomicU64,
    /// Lag bound per subscriber
    max_lag: usize,
    /// Subscriber cap
    max_subscribers: usize,
}

impl TailPoint {
    /// Create a tail point with default limits
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_LAG, DEFAULT_MAX_SUBSCRIBERS)
    }

    /// Create a tail point with explicit limits
    pub fn with_limits(max_lag: usize, max_subscribers: usize) -> Self {
        Self {
            log: RwLock::new(Vec::new()),
            notify: Notify::new(),
            closed: AtomicBool::new(false),
            subscribers: AtomicUsize::new(0),
            published: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            max_lag,
            max_subscribers,
        }
    }

    /// Append a record and wake waiting subscribers
    ///
    /// This is the producer hot path; it takes the log write lock briefly
    /// and never waits on subscriber progress.
    pub fn publish(&self, record: Arc<LogRecord>) {
        if self.closed.load(Ordering::Relaxed) {
            return;
        }

        self.log.write().push(record);
        self.published.fetch_add(1, Ordering::Relaxed);
        self.notify.notify_waiters();

        trace!(published = self.published.load(Ordering::Relaxed), "published record");
    }

    /// Subscribe to this point
    ///
    /// Fails with [`TailError::Closed`] once the point has been shut
    /// down; the broadcaster replaces removed points, so only callers
    /// holding onto a closed point directly see this.
    pub fn subscribe(self: &Arc<Self>, mode: TailMode) -> Result<TailHandle> {
        if self.is_closed() {
            return Err(TailError::Closed);
        }

        let count = self.subscribers.fetch_add(1, Ordering::AcqRel);
        if count >= self.max_subscribers {
            self.subscribers.fetch_sub(1, Ordering::AcqRel);
            return Err(TailError::MaxSubscribers {
                max: self.max_subscribers,
            });
        }

        let cursor = match mode {
            TailMode::FromStart => 0,
            TailMode::Live => self.log.read().len(),
        };

        debug!(cursor, ?mode, "new tail subscriber");
        Ok(TailHandle::new(Arc::clone(self), cursor))
    }

    /// Shut the stream down
    ///
    /// Subscribers drain what is already in the log and then see
    /// end-of-stream. Publishing after close is a no-op.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.notify.notify_waiters();
    }

    /// Whether the point has been closed
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Current number of active subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.load(Ordering::Acquire)
    }

    /// Number of records currently in the log
    pub fn len(&self) -> usize {
        self.log.read().len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Point statistics
    pub fn stats(&self) -> TailStats {
        TailStats {
            published: self.published.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            subscriber_count: self.subscriber_count(),
            log_len: self.len(),
        }
    }

    // --- internals shared with TailHandle ---

    pub(crate) fn max_lag(&self) -> usize {
        self.max_lag
    }

    pub(crate) fn notify(&self) -> &Notify {
        &self.notify
    }

    pub(crate) fn read_at(&self, cursor: usize) -> Option<Arc<LogRecord>> {
        self.log.read().get(cursor).map(Arc::clone)
    }

    pub(crate) fn record_dropped(&self, count: u64) {
        self.dropped.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn release_subscriber(&self) {
        self.subscribers.fetch_sub(1, Ordering::AcqRel);
    }
}

impl Default for TailPoint {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about one tail point
#[derive(Debug, Clone, Copy)]
pub struct TailStats {
    /// Total records published to this point
    pub published: u64,
    /// Total records skipped by lagging subscribers
    pub dropped: u64,
    /// Current number of subscribers
    pub subscriber_count: usize,
    /// Records currently held in the log
    pub log_len: usize,
}

#[cfg(test)]
#[path = "point_test.rs"]
mod tests;
