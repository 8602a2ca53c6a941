//! Terminal channel abstraction
//! Provides a platform-agnostic byte-level interface to the controlling terminal

/// ## term/ Invariants
///
/// - Terminal handling is isolated behind a strict abstraction boundary.
/// - Bytes are read one at a time; nothing above this layer buffers input.
/// - Writes are batched and only reach the terminal on `flush`.
/// - Raw mode is restored on normal exit and on drop.
/// - Terminal size queries are accurate at the time of use.
use crate::error::Result;

pub mod ansi;
pub mod crossterm;

/// Terminal size information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub rows: u16,
    pub cols: u16,
}

/// Terminal channel trait
/// All terminal backends must implement these operations
pub trait TerminalBackend {
    /// Put the terminal into raw (unbuffered, non-echoing) input mode
    fn init(&mut self) -> Result<()>;

    /// Restore terminal to original state
    fn deinit(&mut self);

    /// Read a single raw byte
    /// Blocks until a byte is available
    fn read_byte(&mut self) -> Result<u8>;

    /// True when bytes that already arrived are waiting to be read.
    /// Never blocks.
    fn has_pending_input(&self) -> bool;

    /// Queue bytes for output
    fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Send all queued output to the terminal
    fn flush(&mut self) -> Result<()>;

    /// Get terminal dimensions
    fn get_size(&self) -> Result<Size>;

    /// Queue a string for output
    fn write_str(&mut self, text: &str) -> Result<()> {
        self.write(text.as_bytes())
    }

    /// Discard all input that already arrived
    fn discard_pending_input(&mut self) -> Result<()> {
        while self.has_pending_input() {
            self.read_byte()?;
        }
        Ok(())
    }
}

/// What the attached terminal can do, detected once at process start and
/// handed to the decoder and the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Arrow keys arrive as ANSI escape sequences (`ESC [ A`)
    pub ansi_input: bool,
    /// Foreground colors may be emitted
    pub color: bool,
}

impl Capabilities {
    /// Inspect the process environment
    #[must_use]
    pub fn detect() -> Self {
        let caps = Self::from_env(
            cfg!(windows),
            |name| std::env::var(name).ok(),
        );
        log::debug!("detected terminal capabilities: {caps:?}");
        caps
    }

    /// Capability detection over an arbitrary environment lookup
    pub fn from_env(windows: bool, var: impl Fn(&str) -> Option<String>) -> Self {
        let dumb = var("TERM").is_some_and(|term| term == "dumb");
        // NO_COLOR disables color whenever it is set to a non-empty value
        let no_color = var("NO_COLOR").is_some_and(|value| !value.is_empty());
        // Classic Windows consoles report arrows as lead-byte pairs only
        let ansi_input = !windows || var("WT_SESSION").is_some();

        Capabilities {
            ansi_input: ansi_input && !dumb,
            color: !no_color && !dumb,
        }
    }

    /// Plain capabilities: no escape-sequence input, no color
    #[must_use]
    pub fn plain() -> Self {
        Capabilities {
            ansi_input: false,
            color: false,
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Capabilities {
            ansi_input: true,
            color: true,
        }
    }
}
