//! Tests for clikit error handling

use super::*;
use std::io;

#[test]
fn test_error_severity_display() {
    assert_eq!(format!("{}", ErrorSeverity::Info), "INFO");
    assert_eq!(format!("{}", ErrorSeverity::Warning), "WARN");
    assert_eq!(format!("{}", ErrorSeverity::Error), "ERROR");
    assert_eq!(format!("{}", ErrorSeverity::Critical), "CRITICAL");
}

#[test]
fn test_error_severity_ordering() {
    assert!(ErrorSeverity::Info < ErrorSeverity::Warning);
    assert!(ErrorSeverity::Warning < ErrorSeverity::Error);
    assert!(ErrorSeverity::Error < ErrorSeverity::Critical);
}

#[test]
fn test_error_type_display() {
    assert_eq!(format!("{}", ErrorType::Io), "IO");
    assert_eq!(format!("{}", ErrorType::Interrupted), "Interrupted");
    assert_eq!(format!("{}", ErrorType::Protocol), "Protocol");
    assert_eq!(format!("{}", ErrorType::Construction), "Construction");
    assert_eq!(format!("{}", ErrorType::Renderer), "Renderer");
    assert_eq!(format!("{}", ErrorType::Internal), "Internal");
    assert_eq!(format!("{}", ErrorType::Other), "Other");
}

#[test]
fn test_constructors_set_kind_and_severity() {
    let err = ClikitError::protocol("CURSOR_REPORT_MALFORMED", "bad field");
    assert_eq!(err.severity, ErrorSeverity::Error);
    assert_eq!(err.kind, ErrorType::Protocol);
    assert_eq!(err.code, "CURSOR_REPORT_MALFORMED");

    let err = ClikitError::construction("NO_ENTRIES", "empty");
    assert_eq!(err.kind, ErrorType::Construction);

    let err = ClikitError::critical(ErrorType::Renderer, "TERM_LOST", "gone");
    assert_eq!(err.severity, ErrorSeverity::Critical);

    let err = ClikitError::warning(ErrorType::Other, "W1", "careful");
    assert_eq!(err.severity, ErrorSeverity::Warning);
}

#[test]
fn test_display_format() {
    let err = ClikitError::new(ErrorType::Io, "E001", "test msg");
    assert_eq!(format!("{}", err), "[ERROR] IO(E001): test msg");

    let std_err: &dyn std::error::Error = &err;
    assert_eq!(format!("{}", std_err), "[ERROR] IO(E001): test msg");
}

#[test]
fn test_contains_msg() {
    let err = ClikitError::new(ErrorType::Other, "E", "the quick brown fox");
    assert!(err.contains_msg("quick"));
    assert!(!err.contains_msg("lazy"));
}

#[test]
fn test_from_io_error_maps_interrupts() {
    let err: ClikitError = io::Error::new(io::ErrorKind::Interrupted, "signal").into();
    assert_eq!(err.kind, ErrorType::Interrupted);
    assert!(err.is_interrupt());

    let err: ClikitError = io::Error::new(io::ErrorKind::UnexpectedEof, "eof").into();
    assert_eq!(err.code, "END_OF_INPUT");
    assert!(err.is_interrupt());

    let err: ClikitError = io::Error::new(io::ErrorKind::BrokenPipe, "pipe").into();
    assert_eq!(err.kind, ErrorType::Io);
    assert_eq!(err.code, "IO_ERROR");
    assert!(!err.is_interrupt());
}

#[test]
fn test_from_string_conversions() {
    let err: ClikitError = "str error".into();
    assert_eq!(err.kind, ErrorType::Other);
    assert_eq!(err.code, "GENERIC_ERROR");

    let err: ClikitError = String::from("string error").into();
    assert_eq!(err.message, "string error");
}

#[test]
fn test_result_alias() {
    fn produce_error() -> Result<()> {
        Err(ClikitError::new(ErrorType::Other, "FAIL", "reason"))
    }

    assert_eq!(produce_error().unwrap_err().code, "FAIL");
}
