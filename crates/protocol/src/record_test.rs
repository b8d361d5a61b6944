//! Tests for log records and level detection

use super::*;

// ============================================================================
// Level detection
// ============================================================================

#[test]
fn test_detect_plain_tokens() {
    assert_eq!(LogLevel::detect("ERROR something broke"), LogLevel::Error);
    assert_eq!(LogLevel::detect("WARN disk almost full"), LogLevel::Warn);
    assert_eq!(LogLevel::detect("INFO started"), LogLevel::Info);
    assert_eq!(LogLevel::detect("DEBUG cache miss"), LogLevel::Debug);
    assert_eq!(LogLevel::detect("TRACE enter loop"), LogLevel::Trace);
}

#[test]
fn test_detect_bracketed_and_keyed_tokens() {
    assert_eq!(LogLevel::detect("[warn] low memory"), LogLevel::Warn);
    assert_eq!(LogLevel::detect("level=debug msg=ok"), LogLevel::Debug);
    assert_eq!(
        LogLevel::detect("2024-01-01T00:00:00Z ERROR boom"),
        LogLevel::Error
    );
}

#[test]
fn test_detect_defaults_to_info() {
    assert_eq!(LogLevel::detect("just a line"), LogLevel::Info);
    assert_eq!(LogLevel::detect(""), LogLevel::Info);
}

#[test]
fn test_detect_first_token_wins() {
    assert_eq!(LogLevel::detect("ERROR then warn"), LogLevel::Error);
}

#[test]
fn test_detect_ignores_substrings() {
    // "errors" is not the token "error"
    assert_eq!(LogLevel::detect("3 errorsy things"), LogLevel::Info);
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_record_json_shape() {
    let record = LogRecord::new("ok", LogLevel::Info, false);
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["message"], "ok");
    assert_eq!(json["level"], "info");
    assert_eq!(json["redacted"], false);
    assert!(json["timestamp"].is_string());
}

#[test]
fn test_record_round_trip() {
    let record = LogRecord::new("user=alice [REDACTED]", LogLevel::Warn, true);
    let json = serde_json::to_string(&record).unwrap();
    let back: LogRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}
