//! Tests for the cursor position protocol

use super::*;
use crate::error::ErrorType;
use crate::test_utils::MockTerminal;

#[test]
fn test_parse_reverses_fields() {
    let pos = parse_cursor_report(b"12;34").unwrap();
    assert_eq!(pos, CursorPosition { column: 34, row: 12 });
}

#[test]
fn test_parse_rejects_malformed_payloads() {
    for payload in [
        &b""[..],
        b"12",
        b"12;",
        b";34",
        b"1;2;3",
        b"a;3",
        b"-1;3",
        b"99999;1",
    ] {
        let err = parse_cursor_report(payload).unwrap_err();
        assert_eq!(err.kind, ErrorType::Protocol, "payload {payload:?}");
        assert_eq!(err.code, "CURSOR_REPORT_MALFORMED");
    }
}

#[test]
fn test_query_sends_request_and_parses_response() {
    let mut term = MockTerminal::new(24, 80);
    term.push_input(b"\x1b[12;34R");

    let pos = query_cursor_position(&mut term).unwrap();
    assert_eq!(pos, CursorPosition::new(34, 12));
    // Request was flushed before reading
    assert_eq!(term.batches[0], b"\x1b[6n");
}

#[test]
fn test_query_leaves_following_input_unread() {
    let mut term = MockTerminal::new(24, 80);
    term.push_input(b"\x1b[1;1Rx");

    query_cursor_position(&mut term).unwrap();
    assert_eq!(term.read_byte().unwrap(), b'x');
}

#[test]
fn test_query_budget_exceeded() {
    let mut term = MockTerminal::new(24, 80);
    term.push_input(&[b'1'; REPORT_BYTE_BUDGET + 8]);

    let err = query_cursor_position(&mut term).unwrap_err();
    assert_eq!(err.kind, ErrorType::Protocol);
    assert_eq!(err.code, "CURSOR_REPORT_UNTERMINATED");
}

#[test]
fn test_query_malformed_response() {
    let mut term = MockTerminal::new(24, 80);
    term.push_input(b"\x1b[12R");

    let err = query_cursor_position(&mut term).unwrap_err();
    assert_eq!(err.code, "CURSOR_REPORT_MALFORMED");
}

#[test]
fn test_query_missing_response_is_unterminated() {
    let mut term = MockTerminal::new(24, 80);
    let err = query_cursor_position(&mut term).unwrap_err();
    assert_eq!(err.kind, ErrorType::Protocol);
    assert_eq!(err.code, "CURSOR_REPORT_UNTERMINATED");

    let mut term = MockTerminal::new(24, 80);
    term.push_input(b"\x1b[12;");
    term.push_failure(ClikitError::new(
        ErrorType::Interrupted,
        "READ_INTERRUPTED",
        "signal",
    ));
    let err = query_cursor_position(&mut term).unwrap_err();
    assert_eq!(err.code, "CURSOR_REPORT_UNTERMINATED");
}

#[test]
fn test_query_propagates_io_failure() {
    let mut term = MockTerminal::new(24, 80);
    term.push_failure(ClikitError::new(ErrorType::Io, "IO_ERROR", "tty gone"));
    let err = query_cursor_position(&mut term).unwrap_err();
    assert_eq!(err.kind, ErrorType::Io);
}

#[test]
fn test_apply_writes_absolute_move() {
    let mut term = MockTerminal::new(24, 80);
    CursorPosition::new(7, 3).apply(&mut term).unwrap();
    assert_eq!(term.get_written_string(), "\x1b[3;7H");
}
