//! Tests for file metadata types

use super::*;

#[test]
fn test_file_ids_are_unique() {
    assert_ne!(FileId::generate(), FileId::generate());
    assert_ne!(UploadId::generate(), UploadId::generate());
}

#[test]
fn test_kind_round_trip() {
    assert_eq!("original".parse::<FileKind>().unwrap(), FileKind::Original);
    assert_eq!(
        "sanitized".parse::<FileKind>().unwrap(),
        FileKind::Sanitized
    );
    assert!("other".parse::<FileKind>().is_err());
}

#[test]
fn test_kind_serializes_lowercase() {
    assert_eq!(
        serde_json::to_string(&FileKind::Original).unwrap(),
        "\"original\""
    );
    assert_eq!(
        serde_json::to_string(&FileKind::Sanitized).unwrap(),
        "\"sanitized\""
    );
}

#[test]
fn test_sanitized_name_keeps_extension() {
    assert_eq!(LogFile::sanitized_name("app.log"), "app.sanitized.log");
    assert_eq!(LogFile::sanitized_name("noext"), "noext.sanitized");
    assert_eq!(
        LogFile::sanitized_name("a.b.log"),
        "a.b.sanitized.log"
    );
}

#[test]
fn test_log_file_serde_round_trip() {
    let file = LogFile {
        id: FileId::generate(),
        upload_id: UploadId::generate(),
        display_name: "app.log".to_string(),
        kind: FileKind::Original,
        content_hash: ContentHash::of_bytes(b"content"),
        created_at: chrono::Utc::now(),
        size_bytes: 7,
    };
    let json = serde_json::to_string(&file).unwrap();
    let back: LogFile = serde_json::from_str(&json).unwrap();
    assert_eq!(back, file);
}
