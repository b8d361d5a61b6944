//! Tests for line splitting

use super::*;

fn lines(data: &[u8]) -> Vec<&[u8]> {
    split_lines(data).collect()
}

#[test]
fn test_terminated_lines() {
    assert_eq!(lines(b"a\nb\n"), vec![b"a" as &[u8], b"b"]);
}

#[test]
fn test_final_unterminated_line_is_kept() {
    assert_eq!(lines(b"a\nb"), vec![b"a" as &[u8], b"b"]);
}

#[test]
fn test_no_trailing_empty_line() {
    // a trailing '\n' terminates the last line, it does not open a new one
    assert_eq!(lines(b"only\n").len(), 1);
}

#[test]
fn test_interior_empty_lines_are_records() {
    assert_eq!(lines(b"a\n\nb\n"), vec![b"a" as &[u8], b"", b"b"]);
}

#[test]
fn test_single_newline_is_one_empty_line() {
    assert_eq!(lines(b"\n"), vec![b"" as &[u8]]);
}

#[test]
fn test_empty_input_has_no_lines() {
    assert!(lines(b"").is_empty());
}

#[test]
fn test_crlf_is_stripped() {
    assert_eq!(lines(b"a\r\nb\r\n"), vec![b"a" as &[u8], b"b"]);
}

#[test]
fn test_terminator_probe() {
    assert!(ends_with_terminator(b"a\n"));
    assert!(!ends_with_terminator(b"a"));
    assert!(!ends_with_terminator(b""));
}
