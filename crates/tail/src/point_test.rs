//! Tests for tail points

use std::time::Duration;

use logtide_protocol::LogLevel;

use super::*;

fn make_record(msg: &str) -> Arc<LogRecord> {
    Arc::new(LogRecord::new(msg, LogLevel::Info, false))
}

// ============================================================================
// Publish / subscribe basics
// ============================================================================

#[tokio::test]
async fn test_live_subscriber_sees_only_new_records() {
    let point = Arc::new(TailPoint::new());
    point.publish(make_record("before"));

    let mut handle = point.subscribe(TailMode::Live).unwrap();
    point.publish(make_record("after"));

    let item = handle.recv().await.unwrap();
    assert_eq!(item.record.message, "after");
    assert!(!item.gap);
}

#[tokio::test]
async fn test_from_start_replays_then_goes_live() {
    let point = Arc::new(TailPoint::new());
    point.publish(make_record("one"));
    point.publish(make_record("two"));

    let mut handle = point.subscribe(TailMode::FromStart).unwrap();
    assert_eq!(handle.recv().await.unwrap().record.message, "one");
    assert_eq!(handle.recv().await.unwrap().record.message, "two");

    point.publish(make_record("three"));
    assert_eq!(handle.recv().await.unwrap().record.message, "three");
}

#[tokio::test]
async fn test_ordering_is_production_order() {
    let point = Arc::new(TailPoint::new());
    let mut handle = point.subscribe(TailMode::FromStart).unwrap();

    for i in 0..100 {
        point.publish(make_record(&format!("record-{i}")));
    }

    for i in 0..100 {
        let item = handle.recv().await.unwrap();
        assert_eq!(item.record.message, format!("record-{i}"));
        assert!(!item.gap);
    }
}

#[tokio::test]
async fn test_recv_waits_for_publish() {
    let point = Arc::new(TailPoint::new());
    let mut handle = point.subscribe(TailMode::Live).unwrap();

    let publisher = Arc::clone(&point);
    let task = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        publisher.publish(make_record("late"));
    });

    let item = tokio::time::timeout(Duration::from_secs(1), handle.recv())
        .await
        .expect("recv should wake on publish")
        .unwrap();
    assert_eq!(item.record.message, "late");
    task.await.unwrap();
}

// ============================================================================
// Close semantics
// ============================================================================

#[tokio::test]
async fn test_close_drains_then_ends_stream() {
    let point = Arc::new(TailPoint::new());
    let mut handle = point.subscribe(TailMode::FromStart).unwrap();

    point.publish(make_record("last"));
    point.close();

    assert_eq!(handle.recv().await.unwrap().record.message, "last");
    assert!(handle.recv().await.is_none());
}

#[tokio::test]
async fn test_subscribe_after_close_is_rejected() {
    let point = Arc::new(TailPoint::new());
    point.close();

    let err = point.subscribe(TailMode::FromStart).unwrap_err();
    assert!(matches!(err, crate::TailError::Closed));
    assert_eq!(point.subscriber_count(), 0);
}

#[tokio::test]
async fn test_publish_after_close_is_noop() {
    let point = Arc::new(TailPoint::new());
    point.close();
    point.publish(make_record("ignored"));
    assert!(point.is_empty());
}

#[tokio::test]
async fn test_close_wakes_parked_subscriber() {
    let point = Arc::new(TailPoint::new());
    let mut handle = point.subscribe(TailMode::Live).unwrap();

    let closer = Arc::clone(&point);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        closer.close();
    });

    let ended = tokio::time::timeout(Duration::from_secs(1), handle.recv())
        .await
        .expect("recv should wake on close");
    assert!(ended.is_none());
}

// ============================================================================
// Limits and stats
// ============================================================================

#[tokio::test]
async fn test_subscriber_cap() {
    let point = Arc::new(TailPoint::with_limits(16, 2));

    let _a = point.subscribe(TailMode::Live).unwrap();
    let _b = point.subscribe(TailMode::Live).unwrap();
    let err = point.subscribe(TailMode::Live).unwrap_err();
    assert!(matches!(err, crate::TailError::MaxSubscribers { max: 2 }));
}

#[tokio::test]
async fn test_drop_releases_slot() {
    let point = Arc::new(TailPoint::with_limits(16, 1));

    let handle = point.subscribe(TailMode::Live).unwrap();
    assert_eq!(point.subscriber_count(), 1);

    drop(handle);
    assert_eq!(point.subscriber_count(), 0);
    let _again = point.subscribe(TailMode::Live).unwrap();
}

#[tokio::test]
async fn test_stats() {
    let point = Arc::new(TailPoint::new());
    let _handle = point.subscribe(TailMode::Live).unwrap();

    point.publish(make_record("a"));
    point.publish(make_record("b"));

    let stats = point.stats();
    assert_eq!(stats.published, 2);
    assert_eq!(stats.log_len, 2);
    assert_eq!(stats.subscriber_count, 1);
    assert_eq!(stats.dropped, 0);
}
