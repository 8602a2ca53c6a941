//! Small output helpers for command-line programs

use crate::color::{Painter, Theme};
use crate::error::Result;
use crate::term::ansi;
use crate::term::TerminalBackend;

/// Indentation used by the formatted helpers
const INDENT: &str = "  ";

/// Render a flag as "Yes" or "No"
#[must_use]
pub fn yesno(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Format an indented `name: value` line, the name padded to `ljust`
/// columns when given
#[must_use]
pub fn param(painter: &Painter, theme: &Theme, name: &str, value: &str, ljust: Option<usize>) -> String {
    let label = format!("{name}: ");
    let label = match ljust {
        Some(width) => format!("{label:<width$}"),
        None => label,
    };
    format!(
        "{INDENT}{label}{}\r\n",
        painter.paint_string(theme.input, value)
    )
}

/// A horizontal rule one column narrower than the terminal, drawn with the
/// line-drawing charset
#[must_use]
pub fn vline(columns: u16) -> String {
    let len = usize::from(columns.saturating_sub(1));
    let mut line = String::with_capacity(len + 6);
    line.push_str(ansi::LINE_DRAWING_ON);
    line.extend(std::iter::repeat_n(ansi::LINE_DRAWING_HORIZONTAL, len));
    line.push_str(ansi::LINE_DRAWING_OFF);
    line
}

/// A horizontal rule as wide as the terminal currently is
pub fn vline_for<T: TerminalBackend + ?Sized>(term: &T) -> Result<String> {
    Ok(vline(term.get_size()?.cols))
}

/// Wait for any key before the program exits.
///
/// Input typed before the prompt appeared is discarded. The terminal must be
/// in raw mode.
pub fn pause<T: TerminalBackend + ?Sized>(term: &mut T) -> Result<()> {
    term.write_str(ansi::RESET_ATTRIBUTES)?;
    term.write_str("\r\nPress any key to exit . . . ")?;
    term.flush()?;
    term.discard_pending_input()?;
    match term.read_byte() {
        Ok(_) => {}
        Err(e) if e.is_interrupt() => {}
        Err(e) => return Err(e),
    }
    term.write_str(ansi::SOFT_RESET)?;
    term.write_str("\r\n")?;
    term.flush()
}
