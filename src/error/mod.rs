//! Centralized error handling for clikit
//! Defines the crate error type, severity levels, and error codes

use std::fmt;
use std::io;

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational message (not really an error)
    Info,
    /// Warning - something might be wrong but operation can continue
    Warning,
    /// Standard error - the current operation failed
    Error,
    /// Critical error - terminal state may be left inconsistent
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Category of the error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    /// Terminal channel I/O errors
    Io,
    /// A blocking read was interrupted or input reached its end
    Interrupted,
    /// Malformed or missing terminal response (cursor position report)
    Protocol,
    /// Invalid widget configuration, reported before anything is drawn
    Construction,
    /// Rendering or terminal backend errors
    Renderer,
    /// Internal logic or invariant violations
    Internal,
    /// Errors that don't fit other categories
    Other,
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => write!(f, "IO"),
            Self::Interrupted => write!(f, "Interrupted"),
            Self::Protocol => write!(f, "Protocol"),
            Self::Construction => write!(f, "Construction"),
            Self::Renderer => write!(f, "Renderer"),
            Self::Internal => write!(f, "Internal"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A structured error in clikit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClikitError {
    /// How serious the error is
    pub severity: ErrorSeverity,
    /// What kind of error occurred
    pub kind: ErrorType,
    /// Machine-readable error code (e.g., "CURSOR_REPORT_MALFORMED")
    pub code: String,
    /// Human-readable description
    pub message: String,
}

impl ClikitError {
    /// Create a new standard error (Severity: Error)
    pub fn new(kind: ErrorType, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ErrorSeverity::Error,
            kind,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a new critical error (Severity: Critical)
    pub fn critical(kind: ErrorType, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ErrorSeverity::Critical,
            kind,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a new warning (Severity: Warning)
    pub fn warning(kind: ErrorType, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ErrorSeverity::Warning,
            kind,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Protocol violation while talking to the terminal
    pub fn protocol(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorType::Protocol, code, message)
    }

    /// Invalid configuration detected at construction time
    pub fn construction(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorType::Construction, code, message)
    }

    /// True when a blocking read was interrupted or hit end of input.
    /// Interactive widgets treat this as a user cancellation.
    #[must_use]
    pub fn is_interrupt(&self) -> bool {
        self.kind == ErrorType::Interrupted
    }

    /// Check if the message contains a substring (useful for tests)
    pub fn contains_msg(&self, sub: &str) -> bool {
        self.message.contains(sub)
    }
}

impl fmt::Display for ClikitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}({}): {}",
            self.severity, self.kind, self.code, self.message
        )
    }
}

impl std::error::Error for ClikitError {}

impl From<String> for ClikitError {
    fn from(msg: String) -> Self {
        Self::new(ErrorType::Other, "GENERIC_ERROR", msg)
    }
}

impl From<&str> for ClikitError {
    fn from(msg: &str) -> Self {
        Self::new(ErrorType::Other, "GENERIC_ERROR", msg)
    }
}

impl From<io::Error> for ClikitError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::Interrupted => {
                Self::new(ErrorType::Interrupted, "READ_INTERRUPTED", err.to_string())
            }
            io::ErrorKind::UnexpectedEof => {
                Self::new(ErrorType::Interrupted, "END_OF_INPUT", err.to_string())
            }
            _ => Self::new(ErrorType::Io, "IO_ERROR", err.to_string()),
        }
    }
}

/// Result alias for clikit operations
pub type Result<T> = std::result::Result<T, ClikitError>;

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
