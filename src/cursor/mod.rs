//! Cursor position protocol
//! Asks the terminal where the cursor is and parses the report

/// ## cursor/ Invariants
///
/// - The query is synchronous: no other reader may consume the channel meanwhile.
/// - At most `REPORT_BYTE_BUDGET` bytes are read per query.
/// - A malformed or missing report is an error, never a default position.
use crate::error::{ClikitError, Result};
use crate::term::ansi::{
    self, CSI_INTRODUCER, CURSOR_REPORT_SEPARATOR, CURSOR_REPORT_TERMINATOR, ESC,
};
use crate::term::TerminalBackend;

/// Upper bound on bytes read while waiting for the report terminator
pub const REPORT_BYTE_BUDGET: usize = 32;

/// Cursor position as reported by the terminal, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CursorPosition {
    pub column: u16,
    pub row: u16,
}

impl CursorPosition {
    #[must_use]
    pub fn new(column: u16, row: u16) -> Self {
        CursorPosition { column, row }
    }

    /// Queue a move of the cursor back to this position
    pub fn apply<T: TerminalBackend + ?Sized>(&self, term: &mut T) -> Result<()> {
        term.write_str(&ansi::format_cursor_position(self.row, self.column))
    }
}

/// Query the cursor position over the terminal channel.
///
/// Writes the device status report request, then reads the response one byte
/// at a time up to the terminator. The terminal must be in raw mode, otherwise
/// the response is echoed and line buffered.
///
/// # Errors
///
/// Returns a protocol error when the terminator does not arrive within
/// [`REPORT_BYTE_BUDGET`] bytes, input ends first, or the payload cannot be
/// parsed. Other read failures propagate unchanged.
pub fn query_cursor_position<T: TerminalBackend + ?Sized>(term: &mut T) -> Result<CursorPosition> {
    term.write_str(ansi::QUERY_CURSOR_POSITION)?;
    term.flush()?;

    let mut payload = Vec::with_capacity(REPORT_BYTE_BUDGET);
    let mut terminated = false;
    for _ in 0..REPORT_BYTE_BUDGET {
        let byte = match term.read_byte() {
            Ok(byte) => byte,
            Err(e) if e.is_interrupt() => {
                log::warn!("input ended before the cursor position report: {e}");
                return Err(unterminated());
            }
            Err(e) => return Err(e),
        };
        match byte {
            CURSOR_REPORT_TERMINATOR => {
                terminated = true;
                break;
            }
            ESC | CSI_INTRODUCER => {}
            other => payload.push(other),
        }
    }

    if !terminated {
        log::warn!("cursor position report exceeded {REPORT_BYTE_BUDGET} bytes");
        return Err(unterminated());
    }

    let position = parse_cursor_report(&payload)?;
    log::trace!("cursor at {position:?}");
    Ok(position)
}

fn unterminated() -> ClikitError {
    ClikitError::protocol(
        "CURSOR_REPORT_UNTERMINATED",
        format!("No cursor position report terminator within {REPORT_BYTE_BUDGET} bytes or before input ended"),
    )
}

/// Parse the report payload `row;column` (introducer and terminator removed).
///
/// The terminal sends the row first; the fields are swapped into
/// `(column, row)` order.
///
/// # Errors
///
/// Fails unless the payload holds exactly two decimal fields.
pub fn parse_cursor_report(payload: &[u8]) -> Result<CursorPosition> {
    let mut fields: Vec<&[u8]> = payload.split(|&b| b == CURSOR_REPORT_SEPARATOR).collect();
    if fields.len() != 2 {
        return Err(ClikitError::protocol(
            "CURSOR_REPORT_MALFORMED",
            format!(
                "Expected 2 fields in cursor position report, got {}: {:?}",
                fields.len(),
                String::from_utf8_lossy(payload)
            ),
        ));
    }
    fields.reverse();

    let column = parse_field(fields[0])?;
    let row = parse_field(fields[1])?;
    Ok(CursorPosition { column, row })
}

fn parse_field(field: &[u8]) -> Result<u16> {
    let text = std::str::from_utf8(field).unwrap_or_default();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ClikitError::protocol(
            "CURSOR_REPORT_MALFORMED",
            format!(
                "Invalid cursor position field: {:?}",
                String::from_utf8_lossy(field)
            ),
        ));
    }
    text.parse::<u16>().map_err(|e| {
        ClikitError::protocol(
            "CURSOR_REPORT_MALFORMED",
            format!("Cursor position field {text:?} out of range: {e}"),
        )
    })
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
