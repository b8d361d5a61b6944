//! Tests for the broadcaster map

use logtide_protocol::LogLevel;

use super::*;

fn make_record(msg: &str) -> Arc<LogRecord> {
    Arc::new(LogRecord::new(msg, LogLevel::Info, false))
}

#[tokio::test]
async fn test_point_created_on_first_use() {
    let broadcaster = TailBroadcaster::new();
    assert_eq!(broadcaster.point_count(), 0);

    let file_id = FileId::generate();
    let point = broadcaster.point(file_id);
    assert_eq!(broadcaster.point_count(), 1);

    // Same file resolves to the same point
    assert!(Arc::ptr_eq(&point, &broadcaster.point(file_id)));
}

#[tokio::test]
async fn test_publish_reaches_subscriber() {
    let broadcaster = TailBroadcaster::new();
    let file_id = FileId::generate();

    let mut handle = broadcaster.subscribe(file_id, TailMode::Live).unwrap();
    broadcaster.publish(file_id, make_record("hello"));

    assert_eq!(handle.recv().await.unwrap().record.message, "hello");
}

#[tokio::test]
async fn test_files_are_isolated() {
    let broadcaster = TailBroadcaster::new();
    let file_a = FileId::generate();
    let file_b = FileId::generate();

    let mut sub_a = broadcaster.subscribe(file_a, TailMode::Live).unwrap();
    let mut sub_b = broadcaster.subscribe(file_b, TailMode::Live).unwrap();

    broadcaster.publish(file_a, make_record("for-a"));
    broadcaster.publish(file_b, make_record("for-b"));

    assert_eq!(sub_a.recv().await.unwrap().record.message, "for-a");
    assert_eq!(sub_b.recv().await.unwrap().record.message, "for-b");
}

#[tokio::test]
async fn test_remove_closes_stream() {
    let broadcaster = TailBroadcaster::new();
    let file_id = FileId::generate();

    let mut handle = broadcaster.subscribe(file_id, TailMode::Live).unwrap();
    broadcaster.publish(file_id, make_record("last"));
    broadcaster.remove(file_id);

    // Remaining log drains, then end-of-stream
    assert_eq!(handle.recv().await.unwrap().record.message, "last");
    assert!(handle.recv().await.is_none());
    assert_eq!(broadcaster.point_count(), 0);
}

#[tokio::test]
async fn test_limits_are_propagated() {
    let broadcaster = TailBroadcaster::with_limits(8, 1);
    let file_id = FileId::generate();

    let _first = broadcaster.subscribe(file_id, TailMode::Live).unwrap();
    assert!(broadcaster.subscribe(file_id, TailMode::Live).is_err());
}
