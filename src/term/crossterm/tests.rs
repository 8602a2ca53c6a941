//! Tests for crossterm backend

use crate::term::crossterm::CrosstermBackend;
use crate::term::TerminalBackend;
use std::io::Cursor;

#[test]
fn test_crossterm_backend_new() {
    let backend = CrosstermBackend::new();
    assert!(backend.is_ok());
    let backend = backend.unwrap();
    assert!(!backend.is_raw_mode());
    assert!(!backend.has_pending_input());
}

#[test]
fn test_get_size() {
    let backend = CrosstermBackend::new().unwrap();
    // This might fail if not in a real terminal, so we just check it doesn't panic
    // In a real terminal, it should return Ok(Size { rows: > 0, cols: > 0 })
    let size_result = backend.get_size();
    assert!(size_result.is_ok() || size_result.is_err());
}

#[test]
fn test_fill_keeps_whole_escape_sequence() {
    let mut backend = CrosstermBackend::new().unwrap();
    let mut input = Cursor::new(b"\x1b[A".to_vec());
    backend.fill_from(&mut input).unwrap();

    assert_eq!(backend.read_byte().unwrap(), 0x1b);
    assert!(backend.has_pending_input());
    assert_eq!(backend.read_byte().unwrap(), b'[');
    assert_eq!(backend.read_byte().unwrap(), b'A');
    assert!(!backend.has_pending_input());
}

#[test]
fn test_fill_at_end_of_input_is_interrupt() {
    let mut backend = CrosstermBackend::new().unwrap();
    let mut input = Cursor::new(Vec::new());
    let err = backend.fill_from(&mut input).unwrap_err();
    assert!(err.is_interrupt());
    assert_eq!(err.code, "END_OF_INPUT");
}

#[test]
fn test_write_is_queued_until_flush() {
    let mut backend = CrosstermBackend::new().unwrap();
    backend.write(b"hello").unwrap();
    backend.write_str(" world").unwrap();
    assert_eq!(backend.queued_output_len(), 11);
    backend.flush().unwrap();
    assert_eq!(backend.queued_output_len(), 0);
}
