//! Registry file metadata
//!
//! A `LogFile` describes one registered artifact: either the original upload
//! or its sanitized variant. The two are paired through a shared `UploadId`.
//! Metadata is immutable after registration; re-uploads register new entries
//! under fresh ids instead of mutating existing ones.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ContentHash, ProtocolError};

/// Unique identifier of a registered file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(Uuid);

impl FileId {
    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier shared by the original/sanitized pair of one upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UploadId(Uuid);

impl UploadId {
    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for UploadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Whether a file is the raw upload or the sanitized variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Bytes exactly as uploaded
    Original,
    /// Output of the redaction engine over the original
    Sanitized,
}

impl FileKind {
    /// Lowercase name, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Sanitized => "sanitized",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileKind {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "original" => Ok(Self::Original),
            "sanitized" => Ok(Self::Sanitized),
            other => Err(ProtocolError::InvalidKind {
                value: other.to_string(),
            }),
        }
    }
}

/// Metadata for one registered file
///
/// Created at ingestion time and immutable thereafter. Every `Sanitized`
/// entry has exactly one paired `Original` entry with the same `upload_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogFile {
    /// Unique id of this entry
    pub id: FileId,
    /// Pairs the original and sanitized entries of one upload
    pub upload_id: UploadId,
    /// Name shown to viewers (the uploaded filename)
    pub display_name: String,
    /// Original or sanitized
    pub kind: FileKind,
    /// SHA-256 of the file content
    pub content_hash: ContentHash,
    /// Registration time
    pub created_at: DateTime<Utc>,
    /// Content length in bytes
    pub size_bytes: u64,
}

impl LogFile {
    /// The display name of the sanitized variant for a given original name
    pub fn sanitized_name(original_name: &str) -> String {
        match original_name.rsplit_once('.') {
            Some((stem, ext)) => format!("{stem}.sanitized.{ext}"),
            None => format!("{original_name}.sanitized"),
        }
    }
}

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;
