//! ANSI escape sequences for terminal control
//! Covers the sequences crossterm does not expose as commands

/// ANSI escape sequence constants
pub const ESC: u8 = 0x1b;
pub const CSI_INTRODUCER: u8 = b'[';
pub const RESET_ATTRIBUTES: &str = "\x1b[0m";

/// Device status report: ask for the cursor position
pub const QUERY_CURSOR_POSITION: &str = "\x1b[6n";
/// Final byte of the cursor position report
pub const CURSOR_REPORT_TERMINATOR: u8 = b'R';
/// Separates row and column in the cursor position report
pub const CURSOR_REPORT_SEPARATOR: u8 = b';';

/// Reset the scrolling region to the full screen
pub const RESET_SCROLL_REGION: &str = "\x1b[r";
/// Soft terminal reset (DECSTR)
pub const SOFT_RESET: &str = "\x1b[!p";

/// Switch to the DEC special graphics charset and back
pub const LINE_DRAWING_ON: &str = "\x1b(0";
pub const LINE_DRAWING_OFF: &str = "\x1b(B";
/// Horizontal line glyph in the DEC special graphics charset
pub const LINE_DRAWING_HORIZONTAL: char = 'q';

/// Format cursor position escape sequence (1-based row and column)
#[must_use]
pub fn format_cursor_position(row: u16, col: u16) -> String {
    format!("\x1b[{row};{col}H")
}

/// Format a scrolling region covering rows `top..=bottom` (1-based)
#[must_use]
pub fn format_scroll_region(top: u16, bottom: u16) -> String {
    format!("\x1b[{top};{bottom}r")
}
