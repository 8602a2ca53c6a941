//! Tests for test utilities
//! These tests verify that MockTerminal works correctly

use crate::error::{ClikitError, ErrorType};
use crate::term::TerminalBackend;
use crate::test_utils::MockTerminal;

#[test]
fn test_mock_terminal_new() {
    let term = MockTerminal::new(10, 80);
    assert_eq!(term.size, (10, 80));
    assert_eq!(term.flush_count(), 0);
    assert!(term.get_written_bytes().is_empty());
    assert!(!term.has_pending_input());
}

#[test]
fn test_mock_terminal_write_and_flush() {
    let mut term = MockTerminal::new(10, 80);
    term.write(b"hello").unwrap();
    term.write(b" world").unwrap();
    assert_eq!(term.flush_count(), 0);
    assert_eq!(term.get_written_string(), "hello world");

    term.flush().unwrap();
    assert_eq!(term.flush_count(), 1);
    assert_eq!(term.batches[0], b"hello world");
    assert!(term.queued.is_empty());
}

#[test]
fn test_mock_terminal_chunks_model_pending_input() {
    let mut term = MockTerminal::new(10, 80);
    term.push_input(b"ab");
    term.push_input(b"c");

    // Nothing has arrived before the first read
    assert!(!term.has_pending_input());
    assert_eq!(term.read_byte().unwrap(), b'a');
    assert!(term.has_pending_input());
    assert_eq!(term.read_byte().unwrap(), b'b');
    // The next chunk is a separate read
    assert!(!term.has_pending_input());
    assert_eq!(term.read_byte().unwrap(), b'c');
}

#[test]
fn test_mock_terminal_exhausted_input_is_interrupt() {
    let mut term = MockTerminal::new(10, 80);
    let err = term.read_byte().unwrap_err();
    assert!(err.is_interrupt());
}

#[test]
fn test_mock_terminal_resize_applies_between_chunks() {
    let mut term = MockTerminal::new(10, 80);
    term.push_input(b"a");
    term.push_resize(30, 100);
    term.push_input(b"b");

    term.read_byte().unwrap();
    assert_eq!(term.get_size().unwrap().rows, 10);
    term.read_byte().unwrap();
    assert_eq!(term.get_size().unwrap().rows, 30);
    assert_eq!(term.get_size().unwrap().cols, 100);
}

#[test]
fn test_mock_terminal_scripted_failure() {
    let mut term = MockTerminal::new(10, 80);
    term.push_failure(ClikitError::from("boom"));
    let err = term.read_byte().unwrap_err();
    assert_eq!(err.message, "boom");
}

#[test]
fn test_mock_terminal_count_and_clear() {
    let mut term = MockTerminal::new(10, 80);
    term.write_str("xx-xx").unwrap();
    assert_eq!(term.count_written("xx"), 2);
    term.clear();
    assert!(term.get_written_bytes().is_empty());
}

#[test]
fn test_fail_flush_drops_batch_once() {
    let mut term = MockTerminal::new(24, 80);
    term.fail_flush(1, ClikitError::new(ErrorType::Io, "IO_ERROR", "tty gone"));
    term.write_str("first").unwrap();
    term.flush().unwrap();
    term.write_str("lost").unwrap();
    assert!(term.flush().unwrap_err().contains_msg("tty gone"));
    term.write_str("third").unwrap();
    term.flush().unwrap();
    assert_eq!(term.flush_count(), 2);
    assert_eq!(term.get_written_string(), "firstthird");
}
