//! Key decoder
//! Turns raw terminal bytes into logical key events

/// ## decoder/ Invariants
///
/// - Each call consumes exactly one key press worth of bytes.
/// - Lookahead never exceeds the bytes of one escape sequence.
/// - Unknown bytes and unknown follow-up codes decode to `Other`, never an error.
/// - Interrupted reads and end of input decode to `Cancel`.
/// - Decoding is stateless across calls.
use crate::error::Result;
use crate::key::KeyEvent;
use crate::term::ansi::{CSI_INTRODUCER, ESC};
use crate::term::{Capabilities, TerminalBackend};

/// Lead byte sent by classic Windows consoles before a special key
pub const LEAD_BYTE_EXTENDED: u8 = 0xe0;
/// Lead byte sent by some hosts (VS shells, OpenSSH) before a special key
pub const LEAD_BYTE_NULL: u8 = 0x00;

/// Follow-up codes after a lead byte
const CODE_UP: u8 = b'H';
const CODE_DOWN: u8 = b'P';
const CODE_LEFT: u8 = b'K';
const CODE_RIGHT: u8 = b'M';

const ETX: u8 = 0x03;
/// Introduces SS3 sequences (`ESC O A`) in application cursor mode
const SS3_INTRODUCER: u8 = b'O';

/// Decodes key presses read from a terminal channel
#[derive(Debug, Clone, Copy)]
pub struct KeyDecoder {
    /// Treat ESC as the start of an ANSI sequence when more bytes are pending
    ansi_sequences: bool,
}

impl KeyDecoder {
    #[must_use]
    pub fn new(capabilities: Capabilities) -> Self {
        KeyDecoder {
            ansi_sequences: capabilities.ansi_input,
        }
    }

    /// Read and decode a single key press
    /// Blocks until enough bytes are available
    pub fn decode<T: TerminalBackend + ?Sized>(&self, term: &mut T) -> Result<KeyEvent> {
        match self.decode_inner(term) {
            Err(e) if e.is_interrupt() => {
                log::debug!("input interrupted ({}), decoding as cancel", e.code);
                Ok(KeyEvent::Cancel)
            }
            other => other,
        }
    }

    fn decode_inner<T: TerminalBackend + ?Sized>(&self, term: &mut T) -> Result<KeyEvent> {
        let byte = term.read_byte()?;
        let event = match byte {
            b'\r' | b'\n' => KeyEvent::Confirm,
            ETX => KeyEvent::Cancel,
            ESC if self.ansi_sequences && term.has_pending_input() => {
                self.decode_escape_sequence(term)?
            }
            ESC => KeyEvent::Cancel,
            b'1'..=b'9' => KeyEvent::Digit(byte - b'0'),
            b'w' => KeyEvent::MoveUp,
            b's' => KeyEvent::MoveDown,
            LEAD_BYTE_EXTENDED | LEAD_BYTE_NULL => {
                let code = term.read_byte()?;
                decode_lead_code(code)
            }
            other => KeyEvent::Other(other),
        };
        log::trace!("decoded {byte:#04x} as {event:?}");
        Ok(event)
    }

    /// ESC already consumed and more bytes of the same read are waiting
    fn decode_escape_sequence<T: TerminalBackend + ?Sized>(&self, term: &mut T) -> Result<KeyEvent> {
        let introducer = term.read_byte()?;
        if introducer != CSI_INTRODUCER && introducer != SS3_INTRODUCER {
            // Alt+key and similar
            return Ok(KeyEvent::Other(introducer));
        }

        // Skip parameter bytes (e.g. `1;5` in `ESC [ 1 ; 5 A`) up to the final byte
        let mut last = introducer;
        while term.has_pending_input() {
            last = term.read_byte()?;
            if (0x40..=0x7e).contains(&last) {
                break;
            }
        }

        Ok(match last {
            b'A' => KeyEvent::MoveUp,
            b'B' => KeyEvent::MoveDown,
            other => KeyEvent::Other(other),
        })
    }
}

impl Default for KeyDecoder {
    fn default() -> Self {
        Self::new(Capabilities::default())
    }
}

/// Map the byte after a lead byte
fn decode_lead_code(code: u8) -> KeyEvent {
    match code {
        CODE_UP => KeyEvent::MoveUp,
        CODE_DOWN => KeyEvent::MoveDown,
        // Left and right are known but not actionable
        CODE_LEFT | CODE_RIGHT => KeyEvent::Other(code),
        other => KeyEvent::Other(other),
    }
}
