//! Upload manifest
//!
//! The manifest is the summary returned once per ingestion call. It is a
//! view over the two registered hashes plus the external-store outcome, not
//! a persisted entity.

use serde::{Deserialize, Serialize};

use crate::ContentHash;

/// Result of one ingestion call
///
/// The wire names (`original_hash`, `sanitized_hash`, `azure_uploaded`)
/// match what upload clients already consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadManifest {
    /// Hash of the raw uploaded bytes
    pub original_hash: ContentHash,
    /// Hash of the sanitized artifact
    pub sanitized_hash: ContentHash,
    /// Whether the external store accepted the sanitized artifact.
    /// `false` covers both "no store configured" and "store push failed";
    /// a failed push never fails the ingestion itself.
    #[serde(rename = "azure_uploaded")]
    pub store_uploaded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let manifest = UploadManifest {
            original_hash: ContentHash::of_bytes(b"a"),
            sanitized_hash: ContentHash::of_bytes(b"b"),
            store_uploaded: true,
        };
        let json = serde_json::to_value(&manifest).unwrap();
        assert!(json.get("original_hash").is_some());
        assert!(json.get("sanitized_hash").is_some());
        assert_eq!(json["azure_uploaded"], true);
    }
}
