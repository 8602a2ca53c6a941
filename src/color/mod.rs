//! Color system
//! Provides color types and the theme used by the widgets

use crossterm::style::{Color as CrosstermColor, Print, ResetColor, SetForegroundColor};
use crossterm::QueueableCommand;
use std::io::Write;

use crate::error::Result;

/// Color representation wrapping crossterm's Color enum
/// Supports 16 colors, 256 colors, and RGB colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Reset to default color
    Reset,
    /// Standard 16 colors
    Black,
    DarkGrey,
    Red,
    DarkRed,
    Green,
    DarkGreen,
    Yellow,
    DarkYellow,
    Blue,
    DarkBlue,
    Magenta,
    DarkMagenta,
    Cyan,
    DarkCyan,
    White,
    Grey,
    /// 256-color palette (0-255)
    Ansi256(u8),
    /// RGB color (r, g, b) where each component is 0-255
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    /// Convert to crossterm Color
    #[must_use]
    pub fn to_crossterm(self) -> CrosstermColor {
        match self {
            Color::Reset => CrosstermColor::Reset,
            Color::Black => CrosstermColor::Black,
            Color::DarkGrey => CrosstermColor::DarkGrey,
            Color::Red => CrosstermColor::Red,
            Color::DarkRed => CrosstermColor::DarkRed,
            Color::Green => CrosstermColor::Green,
            Color::DarkGreen => CrosstermColor::DarkGreen,
            Color::Yellow => CrosstermColor::Yellow,
            Color::DarkYellow => CrosstermColor::DarkYellow,
            Color::Blue => CrosstermColor::Blue,
            Color::DarkBlue => CrosstermColor::DarkBlue,
            Color::Magenta => CrosstermColor::Magenta,
            Color::DarkMagenta => CrosstermColor::DarkMagenta,
            Color::Cyan => CrosstermColor::Cyan,
            Color::DarkCyan => CrosstermColor::DarkCyan,
            Color::White => CrosstermColor::White,
            Color::Grey => CrosstermColor::Grey,
            Color::Ansi256(n) => CrosstermColor::AnsiValue(n),
            Color::Rgb { r, g, b } => CrosstermColor::Rgb { r, g, b },
        }
    }
}

/// Colors used by the selector, prompts and consoles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Selection marker glyph
    pub marker: Color,
    /// Highlighted entry under the marker
    pub selected: Color,
    /// Value printed after a confirmed selection
    pub confirmed: Color,
    /// Cancellation notice
    pub cancelled: Color,
    /// User input echoed after prompts
    pub input: Color,
    /// Hints and instructions
    pub hint: Color,
    /// De-emphasized text
    pub muted: Color,
    /// Horizontal rules and banners
    pub rule: Color,
    /// Headings
    pub heading: Color,
}

impl Theme {
    /// Set marker color
    #[must_use]
    pub fn with_marker(mut self, color: Color) -> Self {
        self.marker = color;
        self
    }

    /// Set highlight color of the selected entry
    #[must_use]
    pub fn with_selected(mut self, color: Color) -> Self {
        self.selected = color;
        self
    }

    /// Set color of the confirmed value
    #[must_use]
    pub fn with_confirmed(mut self, color: Color) -> Self {
        self.confirmed = color;
        self
    }

    /// Set color of the cancellation notice
    #[must_use]
    pub fn with_cancelled(mut self, color: Color) -> Self {
        self.cancelled = color;
        self
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            marker: Color::White,
            selected: Color::Cyan,
            confirmed: Color::Cyan,
            cancelled: Color::Red,
            input: Color::Cyan,
            hint: Color::Yellow,
            muted: Color::DarkGrey,
            rule: Color::Blue,
            heading: Color::Green,
        }
    }
}

/// Writes text with an optional foreground color.
/// With color disabled only the text is written.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Painter { enabled }
    }

    /// Queue `text` in `color`, resetting afterwards
    pub fn paint(&self, out: &mut impl Write, color: Color, text: &str) -> Result<()> {
        if self.enabled {
            out.queue(SetForegroundColor(color.to_crossterm()))?;
            out.queue(Print(text))?;
            out.queue(ResetColor)?;
        } else {
            out.queue(Print(text))?;
        }
        Ok(())
    }

    /// Queue a plain attribute reset
    pub fn reset(&self, out: &mut impl Write) -> Result<()> {
        if self.enabled {
            out.queue(ResetColor)?;
        }
        Ok(())
    }

    /// Render `text` in `color` into a string
    #[must_use]
    pub fn paint_string(&self, color: Color, text: &str) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.paint(&mut buf, color, text);
        String::from_utf8_lossy(&buf).into_owned()
    }
}
