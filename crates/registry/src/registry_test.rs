//! Tests for the file registry

use tokio::io::AsyncReadExt;

use super::*;

async fn test_registry() -> (FileRegistry, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let registry = FileRegistry::new(dir.path(), false).unwrap();
    (registry, dir)
}

async fn register(
    registry: &FileRegistry,
    kind: FileKind,
    name: &str,
    upload_id: UploadId,
    bytes: &[u8],
) -> LogFile {
    registry
        .register(kind, name, upload_id, bytes, ContentHash::of_bytes(bytes))
        .await
        .unwrap()
}

// ============================================================================
// Register / get
// ============================================================================

#[tokio::test]
async fn test_register_and_get() {
    let (registry, _dir) = test_registry().await;
    let upload = UploadId::generate();

    let file = register(&registry, FileKind::Original, "app.log", upload, b"a\nb\n").await;

    let fetched = registry.get(file.id).unwrap();
    assert_eq!(fetched, file);
    assert_eq!(fetched.size_bytes, 4);
    assert_eq!(fetched.upload_id, upload);
}

#[tokio::test]
async fn test_get_unknown_id() {
    let (registry, _dir) = test_registry().await;
    let err = registry.get(FileId::generate()).unwrap_err();
    assert!(matches!(err, RegistryError::NotFound { .. }));
}

#[tokio::test]
async fn test_identical_content_gets_fresh_id() {
    let (registry, _dir) = test_registry().await;

    let a = register(
        &registry,
        FileKind::Original,
        "app.log",
        UploadId::generate(),
        b"same",
    )
    .await;
    let b = register(
        &registry,
        FileKind::Original,
        "app.log",
        UploadId::generate(),
        b"same",
    )
    .await;

    // always-append policy: new version, same content hash
    assert_ne!(a.id, b.id);
    assert_eq!(a.content_hash, b.content_hash);
    assert_eq!(registry.count(), 2);
}

#[tokio::test]
async fn test_duplicate_name_rejected_when_configured() {
    let dir = tempfile::tempdir().unwrap();
    let registry = FileRegistry::new(dir.path(), true).unwrap();
    let upload = UploadId::generate();

    register(&registry, FileKind::Original, "app.log", upload, b"one").await;

    let err = registry
        .register(
            FileKind::Original,
            "app.log",
            UploadId::generate(),
            b"two",
            ContentHash::of_bytes(b"two"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateName { .. }));

    // identical content is still allowed under rejection
    register(&registry, FileKind::Original, "app.log", upload, b"one").await;
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_list_newest_first() {
    let (registry, _dir) = test_registry().await;

    let first = register(
        &registry,
        FileKind::Original,
        "first.log",
        UploadId::generate(),
        b"1",
    )
    .await;
    let second = register(
        &registry,
        FileKind::Original,
        "second.log",
        UploadId::generate(),
        b"2",
    )
    .await;

    let listed = registry.list(ListOrder::NewestFirst);
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);

    let oldest = registry.list(ListOrder::OldestFirst);
    assert_eq!(oldest[0].id, first.id);
}

#[tokio::test]
async fn test_find_by_name_returns_latest_version() {
    let (registry, _dir) = test_registry().await;

    register(
        &registry,
        FileKind::Original,
        "app.log",
        UploadId::generate(),
        b"v1",
    )
    .await;
    let latest = register(
        &registry,
        FileKind::Original,
        "app.log",
        UploadId::generate(),
        b"v2",
    )
    .await;

    let found = registry.find_by_name("app.log").unwrap();
    assert_eq!(found.id, latest.id);

    let err = registry.find_by_name("missing.log").unwrap_err();
    assert!(matches!(err, RegistryError::NameNotFound { .. }));
}

// ============================================================================
// Readers and appends
// ============================================================================

#[tokio::test]
async fn test_open_reader_from_offset() {
    let (registry, _dir) = test_registry().await;
    let file = register(
        &registry,
        FileKind::Original,
        "app.log",
        UploadId::generate(),
        b"hello world",
    )
    .await;

    let mut reader = registry.open_reader(file.id, 6).await.unwrap();
    let mut buf = String::new();
    reader.read_to_string(&mut buf).await.unwrap();
    assert_eq!(buf, "world");
}

#[tokio::test]
async fn test_open_reader_unknown_id() {
    let (registry, _dir) = test_registry().await;
    let err = registry.open_reader(FileId::generate(), 0).await.unwrap_err();
    assert!(matches!(err, RegistryError::NotFound { .. }));
}

#[tokio::test]
async fn test_append_grows_file() {
    let (registry, _dir) = test_registry().await;
    let file = register(
        &registry,
        FileKind::Original,
        "live.log",
        UploadId::generate(),
        b"start\n",
    )
    .await;

    let new_size = registry.append(file.id, b"more\n").await.unwrap();
    assert_eq!(new_size, 11);
    assert_eq!(registry.get(file.id).unwrap().size_bytes, 11);

    let mut reader = registry.open_reader(file.id, 0).await.unwrap();
    let mut buf = String::new();
    reader.read_to_string(&mut buf).await.unwrap();
    assert_eq!(buf, "start\nmore\n");
}

// ============================================================================
// Catalog durability
// ============================================================================

#[tokio::test]
async fn test_catalog_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let upload = UploadId::generate();
    let (original, sanitized) = {
        let registry = FileRegistry::new(dir.path(), false).unwrap();
        let original = register(&registry, FileKind::Original, "app.log", upload, b"raw\n").await;
        let sanitized = register(
            &registry,
            FileKind::Sanitized,
            "app.sanitized.log",
            upload,
            b"clean\n",
        )
        .await;
        (original, sanitized)
    };

    // A fresh process over the same data dir sees the same catalog
    let reopened = FileRegistry::new(dir.path(), false).unwrap();
    assert_eq!(reopened.count(), 2);
    assert_eq!(reopened.get(original.id).unwrap(), original);
    assert_eq!(
        reopened.find_by_name("app.sanitized.log").unwrap().id,
        sanitized.id
    );

    // Content stays readable and appendable after the reload
    let mut reader = reopened.open_reader(sanitized.id, 0).await.unwrap();
    let mut buf = String::new();
    reader.read_to_string(&mut buf).await.unwrap();
    assert_eq!(buf, "clean\n");

    let new_size = reopened.append(original.id, b"more\n").await.unwrap();
    assert_eq!(new_size, 9);
}

#[tokio::test]
async fn test_appended_size_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let file = {
        let registry = FileRegistry::new(dir.path(), false).unwrap();
        let file = register(
            &registry,
            FileKind::Original,
            "live.log",
            UploadId::generate(),
            b"start\n",
        )
        .await;
        registry.append(file.id, b"more\n").await.unwrap();
        file
    };

    let reopened = FileRegistry::new(dir.path(), false).unwrap();
    assert_eq!(reopened.get(file.id).unwrap().size_bytes, 11);
}

#[tokio::test]
async fn test_unreadable_catalog_record_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    {
        let registry = FileRegistry::new(dir.path(), false).unwrap();
        register(
            &registry,
            FileKind::Original,
            "good.log",
            UploadId::generate(),
            b"ok\n",
        )
        .await;
    }
    std::fs::write(dir.path().join("garbage.meta.json"), b"not json").unwrap();

    let reopened = FileRegistry::new(dir.path(), false).unwrap();
    assert_eq!(reopened.count(), 1);
    assert!(reopened.find_by_name("good.log").is_ok());
}

// ============================================================================
// Name reservation
// ============================================================================

#[tokio::test]
async fn test_failed_registration_releases_name() {
    let dir = tempfile::tempdir().unwrap();
    let registry = FileRegistry::new(dir.path(), true).unwrap();

    // Make the blob write fail, then restore the directory
    std::fs::remove_dir_all(dir.path()).unwrap();
    let err = registry
        .register(
            FileKind::Original,
            "app.log",
            UploadId::generate(),
            b"one",
            ContentHash::of_bytes(b"one"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::Io(_)));
    std::fs::create_dir_all(dir.path()).unwrap();

    // The failed attempt must not keep the name claimed
    register(
        &registry,
        FileKind::Original,
        "app.log",
        UploadId::generate(),
        b"two",
    )
    .await;
}

// ============================================================================
// Pair lookup
// ============================================================================

#[tokio::test]
async fn test_find_pair_by_kind() {
    let (registry, _dir) = test_registry().await;
    let upload = UploadId::generate();

    let original = register(&registry, FileKind::Original, "app.log", upload, b"raw").await;
    let sanitized = register(
        &registry,
        FileKind::Sanitized,
        "app.sanitized.log",
        upload,
        b"clean",
    )
    .await;

    assert_eq!(
        registry.find_pair(upload, FileKind::Original).unwrap().id,
        original.id
    );
    assert_eq!(
        registry.find_pair(upload, FileKind::Sanitized).unwrap().id,
        sanitized.id
    );
    assert!(registry
        .find_pair(UploadId::generate(), FileKind::Original)
        .is_none());
}

// ============================================================================
// Deletion
// ============================================================================

#[tokio::test]
async fn test_delete_pair_removes_both_entries() {
    let (registry, dir) = test_registry().await;
    let upload = UploadId::generate();

    let original = register(&registry, FileKind::Original, "app.log", upload, b"raw").await;
    let sanitized = register(
        &registry,
        FileKind::Sanitized,
        "app.sanitized.log",
        upload,
        b"clean",
    )
    .await;

    let removed = registry.delete_pair(upload).await.unwrap();
    assert_eq!(removed.len(), 2);
    assert_eq!(registry.count(), 0);
    assert!(registry.get(original.id).is_err());
    assert!(registry.get(sanitized.id).is_err());

    // The deletion sticks across a reopen: records are gone from disk too
    let reopened = FileRegistry::new(dir.path(), false).unwrap();
    assert_eq!(reopened.count(), 0);
}

#[tokio::test]
async fn test_delete_unknown_pair() {
    let (registry, _dir) = test_registry().await;
    let err = registry.delete_pair(UploadId::generate()).await.unwrap_err();
    assert!(matches!(err, RegistryError::UploadNotFound { .. }));
}
