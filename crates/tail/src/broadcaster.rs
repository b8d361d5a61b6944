//! TailBroadcaster - tail points for all files
//!
//! Maps each `FileId` to its `TailPoint`, creating points on first use.
//! Points for different files share nothing but this map, so activity on
//! one file never blocks another.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use logtide_protocol::{FileId, LogRecord};

use crate::error::Result;
use crate::handle::TailHandle;
use crate::point::{TailMode, TailPoint};

/// Per-file fan-out of log records
#[derive(Debug)]
pub struct TailBroadcaster {
    points: RwLock<HashMap<FileId, Arc<TailPoint>>>,
    max_lag: usize,
    max_subscribers: usize,
}

impl TailBroadcaster {
    /// Create a broadcaster with default per-point limits
    pub fn new() -> Self {
        Self::with_limits(crate::point::DEFAULT_MAX_LAG, crate::point::DEFAULT_MAX_SUBSCRIBERS)
    }

    /// Create a broadcaster with explicit per-point limits
    pub fn with_limits(max_lag: usize, max_subscribers: usize) -> Self {
        Self {
            points: RwLock::new(HashMap::new()),
            max_lag,
            max_subscribers,
        }
    }

    /// The tail point for a file, created on first use
    pub fn point(&self, file_id: FileId) -> Arc<TailPoint> {
        if let Some(point) = self.points.read().get(&file_id) {
            return Arc::clone(point);
        }

        let mut points = self.points.write();
        // Raced with another creator between the locks
        Arc::clone(points.entry(file_id).or_insert_with(|| {
            debug!(file_id = %file_id, "created tail point");
            Arc::new(TailPoint::with_limits(self.max_lag, self.max_subscribers))
        }))
    }

    /// Publish a record to a file's subscribers
    pub fn publish(&self, file_id: FileId, record: Arc<LogRecord>) {
        self.point(file_id).publish(record);
    }

    /// Subscribe to a file's tail
    pub fn subscribe(&self, file_id: FileId, mode: TailMode) -> Result<TailHandle> {
        self.point(file_id).subscribe(mode)
    }

    /// Shut down a file's stream and forget its point
    ///
    /// Active subscribers drain the remaining log and then see
    /// end-of-stream.
    pub fn remove(&self, file_id: FileId) {
        if let Some(point) = self.points.write().remove(&file_id) {
            point.close();
            debug!(file_id = %file_id, "removed tail point");
        }
    }

    /// Whether a file currently has a tail point
    pub fn contains(&self, file_id: FileId) -> bool {
        self.points.read().contains_key(&file_id)
    }

    /// Number of files with an active tail point
    pub fn point_count(&self) -> usize {
        self.points.read().len()
    }
}

impl Default for TailBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "broadcaster_test.rs"]
mod tests;
