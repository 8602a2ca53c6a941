//! Crossterm-based terminal backend
//! Raw mode and size queries through crossterm, raw bytes straight from stdin

use crossterm::terminal;
use std::collections::VecDeque;
use std::io::{self, stdin, stdout, Read, Write};

use crate::error::{ClikitError, ErrorType, Result};
use crate::term::{Size, TerminalBackend};

/// Largest chunk taken from stdin in one read. Escape sequences sent by a
/// terminal for a single key press always fit.
const READ_CHUNK: usize = 1024;

/// Crossterm-based terminal backend implementation
pub struct CrosstermBackend {
    raw_mode_enabled: bool,
    /// Bytes that arrived in the last read but were not consumed yet
    pending: VecDeque<u8>,
    /// Output queued until the next flush
    output: Vec<u8>,
}

impl CrosstermBackend {
    pub fn new() -> Result<Self> {
        Ok(CrosstermBackend {
            raw_mode_enabled: false,
            pending: VecDeque::new(),
            output: Vec::new(),
        })
    }

    /// Whether raw mode is currently enabled by this backend
    #[must_use]
    pub fn is_raw_mode(&self) -> bool {
        self.raw_mode_enabled
    }

    /// Number of bytes queued for output
    #[must_use]
    pub fn queued_output_len(&self) -> usize {
        self.output.len()
    }

    /// Perform one blocking read from `reader`, keeping everything that
    /// arrived so lookahead can see the rest of an escape sequence
    pub(crate) fn fill_from(&mut self, reader: &mut impl Read) -> Result<()> {
        let mut chunk = [0u8; READ_CHUNK];
        let n = reader.read(&mut chunk)?;
        if n == 0 {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        log::trace!("read {n} byte(s) from terminal");
        self.pending.extend(&chunk[..n]);
        Ok(())
    }
}

impl TerminalBackend for CrosstermBackend {
    fn init(&mut self) -> Result<()> {
        if !self.raw_mode_enabled {
            terminal::enable_raw_mode().map_err(|e| {
                ClikitError::new(
                    ErrorType::Renderer,
                    "RAW_MODE_FAILED",
                    format!("Failed to enable raw mode: {e}"),
                )
            })?;
            self.raw_mode_enabled = true;
        }
        Ok(())
    }

    fn deinit(&mut self) {
        let _ = self.flush();
        if self.raw_mode_enabled {
            let _ = terminal::disable_raw_mode();
            self.raw_mode_enabled = false;
        }
    }

    fn read_byte(&mut self) -> Result<u8> {
        loop {
            if let Some(byte) = self.pending.pop_front() {
                return Ok(byte);
            }
            let mut input = stdin().lock();
            self.fill_from(&mut input)?;
        }
    }

    fn has_pending_input(&self) -> bool {
        !self.pending.is_empty()
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.output.extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if self.output.is_empty() {
            return Ok(());
        }
        let mut out = stdout().lock();
        out.write_all(&self.output)
            .map_err(|e| ClikitError::new(ErrorType::Io, "WRITE_FAILED", format!("Write failed: {e}")))?;
        out.flush()
            .map_err(|e| ClikitError::new(ErrorType::Io, "FLUSH_FAILED", format!("Flush failed: {e}")))?;
        self.output.clear();
        Ok(())
    }

    fn get_size(&self) -> Result<Size> {
        let (cols, rows) = terminal::size().map_err(|e| {
            ClikitError::new(
                ErrorType::Io,
                "SIZE_UNAVAILABLE",
                format!("Failed to get terminal size: {e}"),
            )
        })?;
        Ok(Size { rows, cols })
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        self.deinit();
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
