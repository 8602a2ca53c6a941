//! Logical key events produced by the decoder

/// Represents one decoded key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    /// Arrow up or `w`
    MoveUp,
    /// Arrow down or `s`
    MoveDown,
    /// Digit key `1`..=`9`
    Digit(u8),
    /// Enter
    Confirm,
    /// Ctrl+C or a lone Escape
    Cancel,
    /// Anything else, carrying the last byte read
    Other(u8),
}
