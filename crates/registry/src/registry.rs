//! The file registry
//!
//! `FileRegistry` keeps an in-memory catalog index over blobs stored in a
//! data directory. Each blob has a sibling catalog record on disk, and the
//! index is rebuilt from those records on open, so the catalog survives a
//! restart. Catalog reads take a short read lock; content I/O runs outside
//! the index lock so readers and the per-file writer never block each
//! other beyond the metadata update itself.

use std::collections::HashMap;
use std::io::SeekFrom;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::{Mutex as SyncMutex, RwLock};
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncSeekExt, AsyncWriteExt};
use tokio::sync::Mutex;

use logtide_protocol::{ContentHash, FileId, FileKind, LogFile, UploadId};

use crate::error::{RegistryError, Result};

/// Suffix of the on-disk catalog record next to each blob
const META_SUFFIX: &str = ".meta.json";

/// Sort order for `list`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListOrder {
    /// Most recently created first (default)
    #[default]
    NewestFirst,
    /// Oldest first
    OldestFirst,
}

/// One catalog entry: immutable metadata plus the per-file writer lock
#[derive(Debug)]
struct Entry {
    meta: LogFile,
    writer: Arc<Mutex<()>>,
}

/// Holds a display name while its registration is in flight
///
/// Dropping the reservation releases the name again; it only commits by
/// the entry landing in the index before the drop.
struct NameReservation<'a> {
    pending: &'a SyncMutex<HashMap<String, (ContentHash, usize)>>,
    name: Option<String>,
}

impl Drop for NameReservation<'_> {
    fn drop(&mut self) {
        if let Some(name) = self.name.take() {
            let mut pending = self.pending.lock();
            if let Some(slot) = pending.get_mut(&name) {
                slot.1 -= 1;
                if slot.1 == 0 {
                    pending.remove(&name);
                }
            }
        }
    }
}

/// Catalog of ingested log files
#[derive(Debug)]
pub struct FileRegistry {
    /// Directory holding file content, one blob per `FileId`
    data_dir: PathBuf,
    /// Reject duplicate display names instead of versioning them
    reject_duplicate_names: bool,
    /// Catalog index
    index: RwLock<HashMap<FileId, Entry>>,
    /// Names with a registration in flight, keyed to their content hash
    pending_names: SyncMutex<HashMap<String, (ContentHash, usize)>>,
}

impl FileRegistry {
    /// Open a registry rooted at `data_dir`, creating the directory if needed
    ///
    /// Rebuilds the catalog index from the on-disk records, so files
    /// registered by an earlier process stay listable and readable. A
    /// record that fails to parse is skipped with a warning rather than
    /// failing the open.
    pub fn new(data_dir: impl Into<PathBuf>, reject_duplicate_names: bool) -> Result<Self> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;

        let mut index = HashMap::new();
        for dirent in std::fs::read_dir(&data_dir)? {
            let path = dirent?.path();
            let is_record = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(META_SUFFIX));
            if !is_record {
                continue;
            }

            match std::fs::read(&path)
                .map_err(RegistryError::from)
                .and_then(|bytes| Ok(serde_json::from_slice::<LogFile>(&bytes)?))
            {
                Ok(meta) => {
                    index.insert(
                        meta.id,
                        Entry {
                            meta,
                            writer: Arc::new(Mutex::new(())),
                        },
                    );
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "skipping unreadable catalog record");
                }
            }
        }

        if !index.is_empty() {
            tracing::info!(files = index.len(), dir = %data_dir.display(), "reloaded catalog");
        }

        Ok(Self {
            data_dir,
            reject_duplicate_names,
            index: RwLock::new(index),
            pending_names: SyncMutex::new(HashMap::new()),
        })
    }

    /// Claim a display name for the duration of a registration
    ///
    /// Conflicts are checked against committed entries and registrations
    /// still in flight under one pending-set lock, so two concurrent
    /// `register` calls with the same name and different content cannot
    /// both pass the check.
    fn reserve_name(&self, display_name: &str, content_hash: ContentHash) -> Result<NameReservation<'_>> {
        if !self.reject_duplicate_names {
            return Ok(NameReservation {
                pending: &self.pending_names,
                name: None,
            });
        }

        let mut pending = self.pending_names.lock();
        let committed_conflict = self.index.read().values().any(|entry| {
            entry.meta.display_name == display_name && entry.meta.content_hash != content_hash
        });
        let in_flight_conflict = pending
            .get(display_name)
            .is_some_and(|(hash, _)| *hash != content_hash);
        if committed_conflict || in_flight_conflict {
            return Err(RegistryError::DuplicateName {
                name: display_name.to_string(),
            });
        }

        pending
            .entry(display_name.to_string())
            .and_modify(|slot| slot.1 += 1)
            .or_insert((content_hash, 1));

        Ok(NameReservation {
            pending: &self.pending_names,
            name: Some(display_name.to_string()),
        })
    }

    /// Register a new file
    ///
    /// Writes the content blob and its catalog record first and only then
    /// publishes the index entry, so a failed write leaves nothing
    /// visible. With duplicate rejection enabled, a display name claimed
    /// by different content - committed or still registering - fails with
    /// `DuplicateName`; identical content re-registers under a fresh id
    /// (always-append policy).
    pub async fn register(
        &self,
        kind: FileKind,
        display_name: &str,
        upload_id: UploadId,
        bytes: &[u8],
        content_hash: ContentHash,
    ) -> Result<LogFile> {
        let _reservation = self.reserve_name(display_name, content_hash)?;

        let id = FileId::generate();
        let path = self.blob_path(id);

        if let Err(err) = tokio::fs::write(&path, bytes).await {
            // Never leave a half-written blob behind
            let _ = tokio::fs::remove_file(&path).await;
            return Err(err.into());
        }

        let meta = LogFile {
            id,
            upload_id,
            display_name: display_name.to_string(),
            kind,
            content_hash,
            created_at: Utc::now(),
            size_bytes: bytes.len() as u64,
        };

        if let Err(err) = self.write_meta(&meta).await {
            let _ = tokio::fs::remove_file(&path).await;
            let _ = tokio::fs::remove_file(self.meta_path(id)).await;
            return Err(err);
        }

        self.index.write().insert(
            id,
            Entry {
                meta: meta.clone(),
                writer: Arc::new(Mutex::new(())),
            },
        );

        tracing::info!(
            file_id = %id,
            upload_id = %upload_id,
            name = display_name,
            kind = %kind,
            size = bytes.len(),
            "registered file"
        );

        Ok(meta)
    }

    /// List all registered files
    ///
    /// The sort is stable: ties on `created_at` are broken by id.
    pub fn list(&self, order: ListOrder) -> Vec<LogFile> {
        let mut files: Vec<LogFile> = self
            .index
            .read()
            .values()
            .map(|entry| entry.meta.clone())
            .collect();

        files.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        if order == ListOrder::NewestFirst {
            files.reverse();
        }
        files
    }

    /// Look up a file by id
    pub fn get(&self, id: FileId) -> Result<LogFile> {
        self.index
            .read()
            .get(&id)
            .map(|entry| entry.meta.clone())
            .ok_or(RegistryError::NotFound { id })
    }

    /// Look up the most recent file with the given display name
    pub fn find_by_name(&self, name: &str) -> Result<LogFile> {
        self.index
            .read()
            .values()
            .filter(|entry| entry.meta.display_name == name)
            .max_by_key(|entry| (entry.meta.created_at, entry.meta.id))
            .map(|entry| entry.meta.clone())
            .ok_or_else(|| RegistryError::NameNotFound {
                name: name.to_string(),
            })
    }

    /// Look up the half of an upload pair with the given kind
    pub fn find_pair(&self, upload_id: UploadId, kind: FileKind) -> Option<LogFile> {
        self.index
            .read()
            .values()
            .find(|entry| entry.meta.upload_id == upload_id && entry.meta.kind == kind)
            .map(|entry| entry.meta.clone())
    }

    /// Number of registered files
    pub fn count(&self) -> usize {
        self.index.read().len()
    }

    /// Remove both entries of an upload pair, then their blobs
    ///
    /// The catalog update happens under one write lock, so `list` never
    /// observes a half-deleted pair.
    pub async fn delete_pair(&self, upload_id: UploadId) -> Result<Vec<FileId>> {
        let removed: Vec<FileId> = {
            let mut index = self.index.write();
            let ids: Vec<FileId> = index
                .values()
                .filter(|entry| entry.meta.upload_id == upload_id)
                .map(|entry| entry.meta.id)
                .collect();
            for id in &ids {
                index.remove(id);
            }
            ids
        };

        if removed.is_empty() {
            return Err(RegistryError::UploadNotFound { upload_id });
        }

        for id in &removed {
            if let Err(err) = tokio::fs::remove_file(self.blob_path(*id)).await {
                tracing::warn!(file_id = %id, error = %err, "failed to remove blob");
            }
            if let Err(err) = tokio::fs::remove_file(self.meta_path(*id)).await {
                tracing::warn!(file_id = %id, error = %err, "failed to remove catalog record");
            }
        }

        tracing::info!(upload_id = %upload_id, files = removed.len(), "deleted upload pair");
        Ok(removed)
    }

    /// Open a reader positioned at `offset` bytes into the file
    ///
    /// Lets callers resume reading content forward without re-reading
    /// from the start.
    pub async fn open_reader(&self, id: FileId, offset: u64) -> Result<File> {
        // Fail fast on unknown ids rather than surfacing a raw fs error
        self.get(id)?;

        let mut file = File::open(self.blob_path(id)).await?;
        if offset > 0 {
            file.seek(SeekFrom::Start(offset)).await?;
        }
        Ok(file)
    }

    /// Append bytes to a live file
    ///
    /// Serialized per file: concurrent appends to the same file queue on
    /// the file's writer lock while appends to other files proceed in
    /// parallel. Returns the new size.
    pub async fn append(&self, id: FileId, bytes: &[u8]) -> Result<u64> {
        let writer = {
            let index = self.index.read();
            let entry = index.get(&id).ok_or(RegistryError::NotFound { id })?;
            Arc::clone(&entry.writer)
        };

        let _guard = writer.lock().await;

        let mut file = OpenOptions::new()
            .append(true)
            .open(self.blob_path(id))
            .await?;
        file.write_all(bytes).await?;
        file.flush().await?;

        let meta = {
            let mut index = self.index.write();
            let entry = index.get_mut(&id).ok_or(RegistryError::NotFound { id })?;
            entry.meta.size_bytes += bytes.len() as u64;
            entry.meta.clone()
        };

        // Still under the per-file writer lock, so record writes for one
        // file never interleave
        self.write_meta(&meta).await?;
        Ok(meta.size_bytes)
    }

    fn blob_path(&self, id: FileId) -> PathBuf {
        self.data_dir.join(id.to_string())
    }

    fn meta_path(&self, id: FileId) -> PathBuf {
        self.data_dir.join(format!("{id}{META_SUFFIX}"))
    }

    async fn write_meta(&self, meta: &LogFile) -> Result<()> {
        let encoded = serde_json::to_vec(meta)?;
        tokio::fs::write(self.meta_path(meta.id), encoded).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
