//! Render engine for the selector
//! Draws the entry list once, then repaints only the rows that change

/// ## render/ Invariants
///
/// - All row movement is relative to the anchor saved before the first draw.
/// - Row offsets always come from `layout::physical_row`.
/// - Every tick ends with the cursor back on the anchor.
/// - One tick produces exactly one flush.
/// - A size change since the previous tick forces a full redraw.
/// - The cursor is hidden by `begin` and shown again by exactly one of
///   `finish` or `abort`.
use crossterm::cursor::{Hide, MoveDown, MoveRight, MoveUp, RestorePosition, SavePosition, Show};
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use unicode_width::UnicodeWidthStr;

use crate::color::{Painter, Theme};
use crate::error::Result;
use crate::layout::EntryList;
use crate::term::{Capabilities, Size, TerminalBackend};

/// Columns left of the marker
const MARKER_MARGIN: u16 = 2;
/// Columns before a title
const TITLE_MARGIN: u16 = 2;

/// How an interaction ended, as far as drawing is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish<'a> {
    /// A value was chosen
    Confirmed(&'a str),
    /// The user cancelled
    Cancelled,
}

/// Incremental renderer for a vertical list with a selection marker
#[derive(Debug, Clone)]
pub struct RenderEngine {
    marker: String,
    title: Option<String>,
    theme: Theme,
    painter: Painter,
    /// Columns from the left edge to the entry text
    indent: u16,
    /// Size seen at the previous tick
    last_size: Option<Size>,
    /// Index highlighted after the previous tick
    prev: usize,
}

impl RenderEngine {
    pub fn new(marker: &str, title: Option<&str>, theme: Theme, capabilities: Capabilities) -> Self {
        // Shift the marker one column right under a title
        let marker = match title {
            Some(_) => format!(" {marker}"),
            None => marker.to_string(),
        };
        let marker_width = u16::try_from(marker.width()).unwrap_or(u16::MAX);
        RenderEngine {
            indent: MARKER_MARGIN.saturating_add(marker_width).saturating_add(1),
            marker,
            title: title.map(str::to_string),
            theme,
            painter: Painter::new(capabilities.color),
            last_size: None,
            prev: 0,
        }
    }

    /// Columns from the left edge to the entry text
    #[must_use]
    pub fn indent(&self) -> u16 {
        self.indent
    }

    /// Hide the cursor, print the title and draw every entry.
    /// Output is queued; the first `tick` flushes it.
    pub fn begin<T: TerminalBackend + ?Sized>(
        &mut self,
        term: &mut T,
        list: &EntryList,
        start: usize,
    ) -> Result<()> {
        let mut frame = Vec::new();
        queue!(frame, Hide)?;
        self.painter.reset(&mut frame)?;
        if let Some(title) = &self.title {
            queue!(frame, Print("\r"), MoveRight(TITLE_MARGIN), Print(title), Print("\r\n"))?;
        }
        self.draw_full(&mut frame, list)?;
        self.prev = start;
        self.last_size = term.get_size().ok();
        term.write(&frame)
    }

    /// Repaint after the selection moved to `pos`
    pub fn tick<T: TerminalBackend + ?Sized>(
        &mut self,
        term: &mut T,
        list: &EntryList,
        pos: usize,
    ) -> Result<()> {
        let mut frame = Vec::new();
        queue!(frame, RestorePosition)?;

        match term.get_size() {
            Ok(size) => {
                if self.last_size.is_some_and(|last| last != size) {
                    log::debug!("terminal resized to {}x{}, redrawing", size.cols, size.rows);
                    queue!(frame, Clear(ClearType::FromCursorDown))?;
                    self.draw_full(&mut frame, list)?;
                }
                self.last_size = Some(size);
            }
            Err(e) => log::warn!("skipping resize check: {e}"),
        }

        // Previous row loses the marker
        if let Some(text) = list.get(self.prev) {
            move_to_row(&mut frame, list.physical_row(self.prev))?;
            queue!(frame, Clear(ClearType::CurrentLine), MoveRight(self.indent))?;
            self.painter.reset(&mut frame)?;
            queue!(frame, Print(text), RestorePosition)?;
        }

        // New row gains it
        if let Some(text) = list.get(pos) {
            move_to_row(&mut frame, list.physical_row(pos))?;
            queue!(frame, Clear(ClearType::CurrentLine), MoveRight(MARKER_MARGIN))?;
            self.painter.paint(&mut frame, self.theme.marker, &self.marker)?;
            queue!(frame, Print(" "))?;
            self.painter.paint(&mut frame, self.theme.selected, text)?;
            queue!(frame, RestorePosition)?;
        }

        self.prev = pos;
        term.write(&frame)?;
        term.flush()
    }

    /// Remove the list, show the cursor and optionally print the outcome
    /// next to the title
    pub fn finish<T: TerminalBackend + ?Sized>(
        &mut self,
        term: &mut T,
        finish: Finish<'_>,
        print_result: bool,
    ) -> Result<()> {
        let mut frame = Vec::new();
        queue!(frame, RestorePosition, Show, Clear(ClearType::FromCursorDown))?;

        if print_result {
            match &self.title {
                Some(title) => {
                    let title_width = u16::try_from(title.width()).unwrap_or(u16::MAX);
                    queue!(
                        frame,
                        MoveUp(1),
                        Print("\r"),
                        MoveRight(TITLE_MARGIN.saturating_add(title_width).saturating_add(1))
                    )?;
                }
                None => queue!(frame, Print("\r"), MoveRight(TITLE_MARGIN))?,
            }
            match finish {
                Finish::Confirmed(value) => {
                    self.painter.paint(&mut frame, self.theme.confirmed, value)?;
                }
                Finish::Cancelled => {
                    self.painter.paint(&mut frame, self.theme.cancelled, "canceled")?;
                }
            }
            queue!(frame, Print("\r\n"))?;
        } else if self.title.is_some() {
            // Take the title with us
            queue!(frame, MoveUp(1), Print("\r"), Clear(ClearType::FromCursorDown))?;
        }

        term.write(&frame)?;
        term.flush()
    }

    /// Best-effort cleanup after a failure: show the cursor below the list
    pub fn abort<T: TerminalBackend + ?Sized>(&mut self, term: &mut T) -> Result<()> {
        let mut frame = Vec::new();
        queue!(frame, RestorePosition, Show, Clear(ClearType::FromCursorDown))?;
        self.painter.reset(&mut frame)?;
        term.write(&frame)?;
        term.flush()
    }

    /// Reserve rows, save the anchor and write every entry unselected
    fn draw_full(&self, frame: &mut Vec<u8>, list: &EntryList) -> Result<()> {
        // Scroll now so the anchor stays valid while drawing below it
        let rows = u16::try_from(list.total_rows()).unwrap_or(u16::MAX);
        queue!(frame, Print("\r"))?;
        for _ in 0..rows {
            queue!(frame, Print("\n"))?;
        }
        if rows > 0 {
            queue!(frame, MoveUp(rows))?;
        }
        queue!(frame, SavePosition)?;

        for (index, text) in list.items().iter().enumerate() {
            queue!(frame, MoveRight(self.indent))?;
            self.painter.reset(frame)?;
            queue!(frame, Print(text), Print("\r\n"))?;
            if list.separators().contains(index) {
                queue!(frame, Print("\r\n"))?;
            }
        }

        queue!(frame, RestorePosition)?;
        Ok(())
    }
}

/// Move down from the anchor to a physical row; row 0 is the anchor itself
fn move_to_row(frame: &mut Vec<u8>, row: usize) -> Result<()> {
    if row > 0 {
        let rows = u16::try_from(row).unwrap_or(u16::MAX);
        queue!(frame, MoveDown(rows))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
