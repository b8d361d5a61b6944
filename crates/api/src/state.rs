//! Application state
//!
//! Shared state for API handlers: the registry, the ingestion pipeline
//! and the tail broadcaster.

use std::sync::Arc;
use std::time::Instant;

use logtide_ingest::IngestPipeline;
use logtide_registry::FileRegistry;
use logtide_tail::TailBroadcaster;

/// Default multipart body cap (32 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// File registry for listings and lookups
    pub registry: Arc<FileRegistry>,
    /// Ingestion pipeline behind `POST /upload`
    pub pipeline: Arc<IngestPipeline>,
    /// Tail broadcaster behind the SSE routes
    pub broadcaster: Arc<TailBroadcaster>,
    /// Upper bound on the upload body size
    pub max_upload_bytes: usize,
    /// Server start time for uptime reporting
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(
        registry: Arc<FileRegistry>,
        pipeline: Arc<IngestPipeline>,
        broadcaster: Arc<TailBroadcaster>,
    ) -> Self {
        Self {
            registry,
            pipeline,
            broadcaster,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            start_time: Instant::now(),
        }
    }

    /// Set the upload body cap
    #[must_use]
    pub fn with_max_upload_bytes(mut self, max: usize) -> Self {
        self.max_upload_bytes = max;
        self
    }

    /// Uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
