//! The ingestion pipeline
//!
//! `IngestPipeline` turns one uploaded payload into a registered
//! original/sanitized pair, publishes the records for live tailing, and
//! optionally pushes the sanitized artifact to an external store.
//!
//! # Guarantees
//!
//! - A failed registration rolls back: no half-written pair stays visible.
//! - A store push failure is recorded in the manifest, never raised -
//!   local registry durability is the primary guarantee.
//! - Record order equals line arrival order, for both the original and
//!   the sanitized stream.

use std::sync::Arc;

use tracing::{info, warn};

use logtide_protocol::{
    ends_with_terminator, split_lines, FileId, FileKind, LogFile, LogRecord, UploadId,
    UploadManifest,
};
use logtide_registry::FileRegistry;
use logtide_sinks::ArtifactStore;
use logtide_tail::TailBroadcaster;

use crate::error::{IngestError, Result};
use crate::hash::hash_bytes;
use crate::redact::{scan_line, NoopPolicy, RedactionPolicy};

/// Orchestrates hashing, sanitization, registration and fan-out
pub struct IngestPipeline {
    registry: Arc<FileRegistry>,
    broadcaster: Arc<TailBroadcaster>,
    policy: Arc<dyn RedactionPolicy>,
    store: Option<Arc<dyn ArtifactStore>>,
    /// Serializes tail reseeds so concurrent replay requests cannot
    /// publish the same file twice
    reseed: tokio::sync::Mutex<()>,
}

impl IngestPipeline {
    /// Create a pipeline
    pub fn new(
        registry: Arc<FileRegistry>,
        broadcaster: Arc<TailBroadcaster>,
        policy: Arc<dyn RedactionPolicy>,
        store: Option<Arc<dyn ArtifactStore>>,
    ) -> Self {
        Self {
            registry,
            broadcaster,
            policy,
            store,
            reseed: tokio::sync::Mutex::new(()),
        }
    }

    /// Ingest one uploaded payload
    ///
    /// Registers the original and its sanitized variant as a pair, makes
    /// both tailable, and returns the upload manifest.
    pub async fn ingest(&self, raw: &[u8], display_name: &str) -> Result<UploadManifest> {
        if raw.is_empty() {
            return Err(IngestError::EmptyUpload);
        }

        let upload_id = UploadId::generate();
        let original_hash = hash_bytes(raw);

        let original = self
            .registry
            .register(
                FileKind::Original,
                display_name,
                upload_id,
                raw,
                original_hash,
            )
            .await?;

        // Scan every line in arrival order. The original stream carries the
        // raw lines; the sanitized stream carries the policy's output.
        let noop = NoopPolicy;
        let mut raw_records = Vec::new();
        let mut sanitized_records = Vec::new();
        let mut sanitized_bytes = String::new();

        for line in split_lines(raw) {
            raw_records.push(scan_line(&noop, line));
            let record = scan_line(self.policy.as_ref(), line);
            if !sanitized_bytes.is_empty() {
                sanitized_bytes.push('\n');
            }
            sanitized_bytes.push_str(&record.message);
            sanitized_records.push(record);
        }
        if ends_with_terminator(raw) {
            sanitized_bytes.push('\n');
        }

        let sanitized_hash = hash_bytes(sanitized_bytes.as_bytes());
        let sanitized_name = LogFile::sanitized_name(display_name);

        let sanitized = match self
            .registry
            .register(
                FileKind::Sanitized,
                &sanitized_name,
                upload_id,
                sanitized_bytes.as_bytes(),
                sanitized_hash,
            )
            .await
        {
            Ok(file) => file,
            Err(err) => {
                // Roll back the original so no unpaired entry stays visible
                if let Err(rollback) = self.registry.delete_pair(upload_id).await {
                    warn!(upload_id = %upload_id, error = %rollback, "rollback failed");
                }
                return Err(err.into());
            }
        };

        self.publish_all(original.id, raw_records);
        self.publish_all(sanitized.id, sanitized_records);

        let store_uploaded = self.push_to_store(&sanitized_name, sanitized_bytes.as_bytes()).await;

        info!(
            upload_id = %upload_id,
            name = display_name,
            original = %original_hash,
            sanitized = %sanitized_hash,
            store_uploaded,
            "ingested upload"
        );

        Ok(UploadManifest {
            original_hash,
            sanitized_hash,
            store_uploaded,
        })
    }

    /// Ingest from a reader
    ///
    /// An I/O error while reading aborts the call before anything is
    /// registered.
    pub async fn ingest_reader<R>(&self, mut reader: R, display_name: &str) -> Result<UploadManifest>
    where
        R: tokio::io::AsyncRead + Unpin,
    {
        use tokio::io::AsyncReadExt;

        let mut raw = Vec::new();
        reader.read_to_end(&mut raw).await?;
        self.ingest(&raw, display_name).await
    }

    /// Append live content to a registered file and broadcast its records
    ///
    /// The chunk must contain whole lines. Appends to one file are
    /// serialized by the registry; appends to different files proceed in
    /// parallel. Returns the number of records published.
    pub async fn append_live(&self, file_id: FileId, chunk: &[u8]) -> Result<usize> {
        self.registry.append(file_id, chunk).await?;

        let file = self.registry.get(file_id)?;
        let noop = NoopPolicy;
        let mut published = 0;
        for line in split_lines(chunk) {
            let record = match file.kind {
                FileKind::Original => scan_line(&noop, line),
                FileKind::Sanitized => scan_line(self.policy.as_ref(), line),
            };
            self.broadcaster.publish(file_id, Arc::new(record));
            published += 1;
        }
        Ok(published)
    }

    /// Rebuild a file's tail point from its registered content
    ///
    /// Tail points are in-memory and disappear when a stream shuts down
    /// or the process restarts; the registered blobs do not. A replay
    /// subscription for a file without a point re-reads the content from
    /// the registry and publishes it to a fresh point, so `FromStart`
    /// still delivers the whole file. Sanitized files are rebuilt from
    /// their original pair through the redaction policy, which restores
    /// the per-record redacted flags as well. No-op when the point
    /// already exists; returns whether a reseed happened.
    pub async fn reseed_tail(&self, file: &LogFile) -> Result<bool> {
        let _guard = self.reseed.lock().await;
        if self.broadcaster.contains(file.id) {
            return Ok(false);
        }

        let noop = NoopPolicy;
        let (source, policy): (LogFile, &dyn RedactionPolicy) = match file.kind {
            FileKind::Original => (file.clone(), &noop),
            FileKind::Sanitized => {
                match self.registry.find_pair(file.upload_id, FileKind::Original) {
                    Some(original) => (original, self.policy.as_ref()),
                    // Unpaired entry: replay its own bytes as-is
                    None => (file.clone(), &noop),
                }
            }
        };

        let mut reader = self.registry.open_reader(source.id, 0).await?;
        let mut bytes = Vec::new();
        tokio::io::AsyncReadExt::read_to_end(&mut reader, &mut bytes)
            .await
            .map_err(logtide_registry::RegistryError::from)?;

        let point = self.broadcaster.point(file.id);
        let mut records = 0usize;
        for line in split_lines(&bytes) {
            point.publish(Arc::new(scan_line(policy, line)));
            records += 1;
        }

        info!(file_id = %file.id, records, "reseeded tail point");
        Ok(true)
    }

    fn publish_all(&self, file_id: FileId, records: Vec<LogRecord>) {
        let point = self.broadcaster.point(file_id);
        for record in records {
            point.publish(Arc::new(record));
        }
    }

    async fn push_to_store(&self, name: &str, bytes: &[u8]) -> bool {
        let Some(store) = &self.store else {
            return false;
        };

        match store.put(name, bytes).await {
            Ok(()) => true,
            Err(err) => {
                // Non-fatal: surfaced for operators, recorded in the manifest
                warn!(store = store.kind(), name, error = %err, "store push failed");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
