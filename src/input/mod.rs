//! Line-oriented input on a raw terminal
//! Single-line prompts and multi-line capture built on the terminal channel

/// ## input/ Invariants
///
/// - Input is read byte by byte from the channel; nothing is line buffered
///   by the terminal.
/// - Committed lines are valid UTF-8 (invalid sequences are replaced).
/// - Cancellation and end of input are results, not errors.
use std::path::{Path, PathBuf};

use crossterm::cursor::{MoveRight, MoveTo, MoveUp, RestorePosition, SavePosition};
use crossterm::queue;
use crossterm::style::{Print, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use unicode_width::UnicodeWidthChar;

use crate::color::{Painter, Theme};
use crate::cursor::query_cursor_position;
use crate::decoder::LEAD_BYTE_NULL;
use crate::error::Result;
use crate::output::vline;
use crate::term::ansi::{self, CSI_INTRODUCER, ESC};
use crate::term::{Capabilities, Size, TerminalBackend};

const ETX: u8 = 0x03;
const EOT: u8 = 0x04;
const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7f;
/// Ctrl+Z, also produced by F6 on Windows consoles
const SUB: u8 = 0x1a;
const SS3_INTRODUCER: u8 = b'O';

/// Result of reading one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// Enter pressed
    Line(String),
    /// Ctrl+C, a lone Escape, or an interrupted read
    Cancelled,
    /// Ctrl+D / Ctrl+Z on an empty line, or the input stream ended
    EndOfInput,
}

/// Minimal raw-mode line editor: typing, backspace, commit
#[derive(Debug, Clone, Copy)]
pub struct LineEditor {
    capabilities: Capabilities,
    theme: Theme,
    /// Echo this character instead of what was typed
    mask: Option<char>,
}

impl LineEditor {
    #[must_use]
    pub fn new(capabilities: Capabilities, theme: Theme) -> Self {
        LineEditor {
            capabilities,
            theme,
            mask: None,
        }
    }

    #[must_use]
    pub fn with_mask(mut self, mask: char) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Read one line, echoing what is typed in the input color
    pub fn read_line<T: TerminalBackend + ?Sized>(&self, term: &mut T) -> Result<LineEvent> {
        if self.capabilities.color {
            let mut frame = Vec::new();
            queue!(frame, SetForegroundColor(self.theme.input.to_crossterm()))?;
            term.write(&frame)?;
        }
        term.flush()?;

        let event = self.edit(term);
        term.write_str(ansi::RESET_ATTRIBUTES)?;
        if matches!(event, Ok(LineEvent::Line(_))) {
            term.write_str("\r\n")?;
        }
        term.flush()?;
        event
    }

    fn edit<T: TerminalBackend + ?Sized>(&self, term: &mut T) -> Result<LineEvent> {
        let mut line: Vec<u8> = Vec::new();
        loop {
            let byte = match term.read_byte() {
                Ok(byte) => byte,
                Err(e) if e.is_interrupt() => {
                    return Ok(if e.code == "READ_INTERRUPTED" {
                        LineEvent::Cancelled
                    } else {
                        LineEvent::EndOfInput
                    });
                }
                Err(e) => return Err(e),
            };

            match byte {
                b'\r' | b'\n' => {
                    return Ok(LineEvent::Line(String::from_utf8_lossy(&line).into_owned()));
                }
                ETX => return Ok(LineEvent::Cancelled),
                EOT | SUB if line.is_empty() => return Ok(LineEvent::EndOfInput),
                ESC if term.has_pending_input() => skip_escape_sequence(term)?,
                ESC => return Ok(LineEvent::Cancelled),
                BACKSPACE | DELETE => {
                    if let Some(removed) = pop_char(&mut line) {
                        let shown = self.mask.unwrap_or(removed);
                        let width = shown.width().unwrap_or(1).max(1);
                        for _ in 0..width {
                            term.write_str("\x08 \x08")?;
                        }
                        term.flush()?;
                    }
                }
                LEAD_BYTE_NULL => {
                    // Special key on a console host; ignore its code
                    term.read_byte()?;
                }
                0xe0 if !self.capabilities.ansi_input => {
                    term.read_byte()?;
                }
                control if control < 0x20 => {}
                other => {
                    line.push(other);
                    match self.mask {
                        None => term.write(&[other])?,
                        // One mask per character, not per byte
                        Some(mask) if other & 0xc0 != 0x80 => {
                            let mut buf = [0u8; 4];
                            term.write_str(mask.encode_utf8(&mut buf))?;
                        }
                        Some(_) => {}
                    }
                    if !term.has_pending_input() {
                        term.flush()?;
                    }
                }
            }
        }
    }
}

/// Consume the rest of an escape sequence (arrows, function keys) up to its
/// final byte, leaving keys typed after it in place
fn skip_escape_sequence<T: TerminalBackend + ?Sized>(term: &mut T) -> Result<()> {
    let introducer = term.read_byte()?;
    if introducer != CSI_INTRODUCER && introducer != SS3_INTRODUCER {
        return Ok(());
    }
    while term.has_pending_input() {
        if (0x40..=0x7e).contains(&term.read_byte()?) {
            break;
        }
    }
    Ok(())
}

/// Remove the last UTF-8 character from `line`
fn pop_char(line: &mut Vec<u8>) -> Option<char> {
    let mut start = line.len().checked_sub(1)?;
    while start > 0 && line[start] & 0xc0 == 0x80 {
        start -= 1;
    }
    let removed = line.split_off(start);
    Some(
        String::from_utf8_lossy(&removed)
            .chars()
            .next()
            .unwrap_or(char::REPLACEMENT_CHARACTER),
    )
}

/// Prompt for a single line. Returns `None` when the user cancels or input
/// ends.
pub fn ask_input<T: TerminalBackend + ?Sized>(
    term: &mut T,
    prompt: &str,
    capabilities: Capabilities,
    theme: Theme,
) -> Result<Option<String>> {
    let mut frame = Vec::new();
    Painter::new(capabilities.color).reset(&mut frame)?;
    queue!(frame, Print("\r"), MoveRight(2), Print(prompt))?;
    term.write(&frame)?;

    match LineEditor::new(capabilities, theme).read_line(term)? {
        LineEvent::Line(line) => Ok(Some(line)),
        LineEvent::Cancelled | LineEvent::EndOfInput => {
            term.write_str("\r\n")?;
            term.flush()?;
            Ok(None)
        }
    }
}

/// Prompt for a secret, echoing `mask` for every character typed.
/// Returns `None` when the user cancels or input ends.
pub fn getpass<T: TerminalBackend + ?Sized>(
    term: &mut T,
    prompt: &str,
    mask: char,
    capabilities: Capabilities,
) -> Result<Option<String>> {
    term.write_str(prompt)?;
    let editor = LineEditor::new(capabilities, Theme::default()).with_mask(mask);
    match editor.read_line(term)? {
        LineEvent::Line(secret) => Ok(Some(secret)),
        LineEvent::Cancelled | LineEvent::EndOfInput => {
            term.write_str("\r\n")?;
            term.flush()?;
            Ok(None)
        }
    }
}

/// What kind of filesystem entry `ask_path` accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathKind {
    #[default]
    Any,
    File,
    Directory,
}

/// Why `path` is not acceptable, if it is not
#[must_use]
pub fn check_path(path: &Path, kind: PathKind) -> Option<&'static str> {
    if !path.exists() {
        return Some(match kind {
            PathKind::Any => "This path does not exist!",
            PathKind::File => "This file does not exist!",
            PathKind::Directory => "This directory does not exist!",
        });
    }
    match kind {
        PathKind::File if !path.is_file() => Some("The specified path is not a file!"),
        PathKind::Directory if !path.is_dir() => Some("The specified path is not a directory!"),
        _ => None,
    }
}

/// Strip one pair of matching surrounding quotes, as pasted paths carry them
fn unquote(text: &str) -> &str {
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[1..text.len() - 1];
        }
    }
    text
}

/// Prompt until the user enters an existing path of the requested kind.
///
/// Empty answers re-prompt on the same line; invalid ones show the reason
/// below the prompt. Returns `None` when the user cancels or input ends.
pub fn ask_path<T: TerminalBackend + ?Sized>(
    term: &mut T,
    prompt: &str,
    kind: PathKind,
    capabilities: Capabilities,
    theme: Theme,
) -> Result<Option<PathBuf>> {
    let painter = Painter::new(capabilities.color);
    loop {
        let Some(answer) = ask_input(term, prompt, capabilities, theme)? else {
            return Ok(None);
        };
        let path = Path::new(unquote(answer.trim()));

        let mut frame = Vec::new();
        if path.as_os_str().is_empty() {
            queue!(frame, MoveUp(1), Clear(ClearType::CurrentLine))?;
        } else if let Some(problem) = check_path(path, kind) {
            log::debug!("rejected path {}: {problem}", path.display());
            queue!(frame, Print("\r"), MoveRight(2), Clear(ClearType::FromCursorDown))?;
            painter.paint(&mut frame, theme.cancelled, problem)?;
            queue!(frame, MoveUp(1), Print("\r"), Clear(ClearType::CurrentLine))?;
        } else {
            queue!(frame, Clear(ClearType::FromCursorDown))?;
            term.write(&frame)?;
            term.flush()?;
            return Ok(Some(path.to_path_buf()));
        }
        term.write(&frame)?;
    }
}

/// Multi-line capture configuration
#[derive(Debug, Clone)]
pub struct ConsoleInputOptions {
    /// Text shown above the input area
    pub header: Option<String>,
    /// Capture inside the alternate screen
    pub alt_screen: bool,
    pub theme: Theme,
    pub capabilities: Capabilities,
}

impl ConsoleInputOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    #[must_use]
    pub fn with_alt_screen(mut self, alt_screen: bool) -> Self {
        self.alt_screen = alt_screen;
        self
    }

    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }
}

impl Default for ConsoleInputOptions {
    fn default() -> Self {
        ConsoleInputOptions {
            header: None,
            alt_screen: true,
            theme: Theme::default(),
            capabilities: Capabilities::default(),
        }
    }
}

/// Hint printed under the header
pub const CONSOLE_INPUT_HINT: &str =
    "Press CTRL+D (or CTRL+Z) in an empty line or CTRL+C to finish.";

/// Lines of the console input header for a terminal `cols` wide
fn header_lines(options: &ConsoleInputOptions, cols: u16) -> Vec<String> {
    let painter = Painter::new(options.capabilities.color);
    let mut lines = vec![vline(cols)];
    if let Some(header) = &options.header {
        lines.push(String::new());
        lines.extend(header.lines().map(|line| format!("  {line}")));
    }
    lines.push(String::new());
    lines.push(format!(
        "  {}",
        painter.paint_string(options.theme.hint, CONSOLE_INPUT_HINT)
    ));
    lines.push(vline(cols));
    lines
}

/// Capture several lines of text below a fixed header.
///
/// The header stays in place through a scrolling region and is redrawn when
/// the terminal size changes. Lines are collected until end of input or
/// cancellation and returned joined with `\n`.
///
/// # Errors
///
/// Fails when the cursor position cannot be queried or the terminal fails.
pub fn console_input<T: TerminalBackend + ?Sized>(
    term: &mut T,
    options: &ConsoleInputOptions,
) -> Result<String> {
    if options.alt_screen {
        let mut frame = Vec::new();
        queue!(frame, EnterAlternateScreen)?;
        term.write(&frame)?;
    }
    let result = capture_lines(term, options);

    term.write_str(ansi::RESET_SCROLL_REGION)?;
    let mut frame = Vec::new();
    if options.alt_screen {
        queue!(frame, LeaveAlternateScreen)?;
    } else {
        let cols = term.get_size().map(|size| size.cols).unwrap_or(80);
        queue!(frame, Print("\r\n"), Print(vline(cols)), Print("\r\n\r\n"))?;
    }
    term.write(&frame)?;
    term.flush()?;

    result.map(|lines| lines.join("\n"))
}

/// Query the header position, then read lines below the header until end of
/// input or cancellation
fn capture_lines<T: TerminalBackend + ?Sized>(
    term: &mut T,
    options: &ConsoleInputOptions,
) -> Result<Vec<String>> {
    let begin = query_cursor_position(term)?.row;
    let editor = LineEditor::new(options.capabilities, options.theme);

    let mut lines = Vec::new();
    let mut prev_size: Option<Size> = None;
    loop {
        let size = term.get_size()?;
        if prev_size != Some(size) {
            let header = header_lines(options, size.cols);
            let header_rows = u16::try_from(header.len()).unwrap_or(u16::MAX);
            let first_draw = prev_size.is_none();
            let start = begin.saturating_add(header_rows).saturating_add(1);
            draw_header(term, &header, begin, start, size, first_draw)?;
            prev_size = Some(size);
        }

        term.write_str("\r")?;
        let mut frame = Vec::new();
        queue!(frame, MoveRight(2))?;
        term.write(&frame)?;
        match editor.read_line(term)? {
            LineEvent::Line(line) => lines.push(line),
            LineEvent::Cancelled | LineEvent::EndOfInput => break,
        }
    }
    log::debug!("console input captured {} line(s) below row {begin}", lines.len());
    Ok(lines)
}

/// Draw the header at `begin` (1-based) and confine scrolling to the rows
/// from `start` down to the second-to-last row
fn draw_header<T: TerminalBackend + ?Sized>(
    term: &mut T,
    header: &[String],
    begin: u16,
    start: u16,
    size: Size,
    first_draw: bool,
) -> Result<()> {
    let mut frame = Vec::new();
    let begin_row = begin.saturating_sub(1);
    let start_row = start.saturating_sub(1);
    if first_draw {
        queue!(frame, MoveTo(0, start_row), SavePosition)?;
    } else {
        queue!(frame, SavePosition, MoveTo(0, start_row), Clear(ClearType::FromCursorUp))?;
    }

    queue!(frame, MoveTo(0, begin_row))?;
    for line in header {
        queue!(frame, Print(line), Print("\r\n"))?;
    }

    let bottom = size.rows.saturating_sub(1);
    if start < bottom {
        queue!(frame, Print(ansi::format_scroll_region(start, bottom)))?;
    }
    queue!(frame, RestorePosition)?;
    term.write(&frame)?;
    term.flush()
}
