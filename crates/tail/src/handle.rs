//! TailHandle - one live subscription
//!
//! A `TailHandle` is the lazy, cancellable sequence of records for one
//! subscription. It owns only its cursor into the file's shared log; the
//! subscription lives exactly as long as the handle.

use std::sync::Arc;

use tracing::warn;

use logtide_protocol::LogRecord;

use crate::point::TailPoint;

/// One delivered record
#[derive(Debug, Clone)]
pub struct TailItem {
    /// The record itself
    pub record: Arc<LogRecord>,
    /// True when records between the previous delivery and this one were
    /// dropped because this subscriber lagged past its bound
    pub gap: bool,
}

/// A live, cancellable subscription to one file's tail
#[derive(Debug)]
pub struct TailHandle {
    point: Arc<TailPoint>,
    /// Next log index to deliver
    cursor: usize,
    /// A lag drop happened; mark the next delivered item
    gap_pending: bool,
    /// Slot already released (cancel or drop)
    released: bool,
}

impl TailHandle {
    pub(crate) fn new(point: Arc<TailPoint>, cursor: usize) -> Self {
        Self {
            point,
            cursor,
            gap_pending: false,
            released: false,
        }
    }

    /// Receive the next record
    ///
    /// Suspends until a record is available. Returns `None` once the
    /// handle is cancelled, or after the point is closed and the log is
    /// drained. Within one handle, delivery order equals production order
    /// and no record is ever delivered twice.
    pub async fn recv(&mut self) -> Option<TailItem> {
        loop {
            if self.released {
                return None;
            }

            // Register for wakeup before re-checking, so a publish racing
            // with this check cannot be missed. The future borrows the
            // point, not the handle, leaving `self` free for poll_log.
            let point = Arc::clone(&self.point);
            let notified = point.notify().notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if let Some(item) = self.poll_log() {
                return Some(item);
            }

            if self.point.is_closed() {
                return None;
            }

            notified.await;
        }
    }

    /// Try to deliver without waiting
    fn poll_log(&mut self) -> Option<TailItem> {
        let len = self.point.len();
        if self.cursor >= len {
            return None;
        }

        let max_lag = self.point.max_lag();
        if len - self.cursor > max_lag {
            // Drop-oldest: jump the cursor forward and flag the gap
            let dropped = (len - self.cursor - max_lag) as u64;
            self.cursor = len - max_lag;
            self.gap_pending = true;
            self.point.record_dropped(dropped);
            warn!(dropped, cursor = self.cursor, "subscriber lagged, dropped oldest records");
        }

        let record = self.point.read_at(self.cursor)?;
        self.cursor += 1;
        let gap = std::mem::take(&mut self.gap_pending);
        Some(TailItem { record, gap })
    }

    /// Cancel the subscription
    ///
    /// Releases the subscriber slot immediately; idempotent. Subsequent
    /// `recv` calls return `None`.
    pub fn cancel(&mut self) {
        if !self.released {
            self.released = true;
            self.point.release_subscriber();
        }
    }

    /// The next log index this handle would deliver
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Drop for TailHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
#[path = "handle_test.rs"]
mod tests;
