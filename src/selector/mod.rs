//! Single-choice list selector
//! Interactive widget: arrows, `w`/`s` or digits move and pick, Enter
//! confirms, Ctrl+C or Escape cancels

/// ## selector/ Invariants
///
/// - `pos` always indexes a real entry: `0 <= pos <= highest_index`.
/// - Up/Down wrap around at both ends.
/// - Out-of-range digits are ignored.
/// - Cancellation is an outcome, never an error.
/// - Nothing is drawn for a selector that failed construction.
/// - The cursor is shown again exactly once on every exit path.
use crate::color::Theme;
use crate::decoder::KeyDecoder;
use crate::error::Result;
use crate::key::KeyEvent;
use crate::layout::EntryList;
use crate::render::{Finish, RenderEngine};
use crate::term::{Capabilities, TerminalBackend};

/// Default selection marker
pub const DEFAULT_MARKER: &str = ">";

/// Phase of an interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Confirmed,
    Cancelled,
}

/// The confirmed entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Zero-based index among the real entries
    pub index: usize,
    pub value: String,
}

/// Result of running a selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Selected(Selection),
    Cancelled,
}

impl Outcome {
    /// The selection, if one was confirmed
    #[must_use]
    pub fn selection(&self) -> Option<&Selection> {
        match self {
            Outcome::Selected(selection) => Some(selection),
            Outcome::Cancelled => None,
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }
}

/// Selector configuration
#[derive(Debug, Clone)]
pub struct SelectorOptions {
    pub title: Option<String>,
    pub marker: String,
    /// Print the chosen value (or a cancellation notice) after exit
    pub print_result: bool,
    /// Initially highlighted entry, clamped into range
    pub start: Option<usize>,
    pub theme: Theme,
    pub capabilities: Capabilities,
}

impl SelectorOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    #[must_use]
    pub fn with_print_result(mut self, print_result: bool) -> Self {
        self.print_result = print_result;
        self
    }

    #[must_use]
    pub fn with_start(mut self, start: usize) -> Self {
        self.start = Some(start);
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }
}

impl Default for SelectorOptions {
    fn default() -> Self {
        SelectorOptions {
            title: None,
            marker: DEFAULT_MARKER.to_string(),
            print_result: true,
            start: None,
            theme: Theme::default(),
            capabilities: Capabilities::default(),
        }
    }
}

/// Position and phase of a running selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorState {
    pos: usize,
    highest_index: usize,
    phase: Phase,
}

impl SelectorState {
    /// `start` is clamped to `highest_index`
    #[must_use]
    pub fn new(highest_index: usize, start: usize) -> Self {
        SelectorState {
            pos: start.min(highest_index),
            highest_index,
            phase: Phase::Running,
        }
    }

    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Apply one key event. Events after a terminal phase are ignored.
    pub fn apply(&mut self, event: KeyEvent) -> Phase {
        if self.phase != Phase::Running {
            return self.phase;
        }
        match event {
            KeyEvent::MoveUp => {
                self.pos = if self.pos == 0 {
                    self.highest_index
                } else {
                    self.pos - 1
                };
            }
            KeyEvent::MoveDown => {
                self.pos = if self.pos == self.highest_index {
                    0
                } else {
                    self.pos + 1
                };
            }
            KeyEvent::Digit(n) => {
                // 0th position == 1st entry
                if let Some(index) = usize::from(n).checked_sub(1) {
                    if index <= self.highest_index {
                        self.pos = index;
                        self.phase = Phase::Confirmed;
                    }
                }
            }
            KeyEvent::Confirm => self.phase = Phase::Confirmed,
            KeyEvent::Cancel => self.phase = Phase::Cancelled,
            KeyEvent::Other(_) => {}
        }
        self.phase
    }
}

/// Interactive single-choice selector
#[derive(Debug, Clone)]
pub struct Selector {
    entries: EntryList,
    options: SelectorOptions,
}

impl Selector {
    /// Build a selector from raw entry strings; empty strings become blank
    /// separator rows.
    ///
    /// # Errors
    ///
    /// Fails when there is no non-empty entry. Nothing is written to the
    /// terminal in that case.
    pub fn new<I, S>(entries: I, options: SelectorOptions) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = EntryList::from_raw(entries)?;
        log::debug!(
            "selector with {} entries, {} separator rows",
            entries.len(),
            entries.separators().len()
        );
        Ok(Selector { entries, options })
    }

    pub fn entries(&self) -> &EntryList {
        &self.entries
    }

    pub fn options(&self) -> &SelectorOptions {
        &self.options
    }

    /// Run the interaction until the user confirms or cancels.
    ///
    /// The terminal must already be in raw mode.
    ///
    /// # Errors
    ///
    /// Only genuine terminal I/O failures are returned; cancellation is
    /// `Outcome::Cancelled`. The cursor is made visible again before any
    /// error is returned.
    pub fn run<T: TerminalBackend + ?Sized>(&self, term: &mut T) -> Result<Outcome> {
        let mut engine = RenderEngine::new(
            &self.options.marker,
            self.options.title.as_deref(),
            self.options.theme,
            self.options.capabilities,
        );
        let decoder = KeyDecoder::new(self.options.capabilities);
        let start = self.options.start.unwrap_or(0);
        let mut state = SelectorState::new(self.entries.highest_index(), start);

        let result = engine
            .begin(term, &self.entries, state.pos())
            .and_then(|()| self.interact(term, &mut engine, &decoder, &mut state));

        match result {
            Ok(outcome) => {
                let finish = match &outcome {
                    Outcome::Selected(selection) => Finish::Confirmed(&selection.value),
                    Outcome::Cancelled => Finish::Cancelled,
                };
                if let Err(e) = engine.finish(term, finish, self.options.print_result) {
                    log::warn!("selector finish failed: {e}");
                    if let Err(cleanup) = engine.abort(term) {
                        log::warn!("failed to restore cursor: {cleanup}");
                    }
                    return Err(e);
                }
                log::debug!("selector finished: {outcome:?}");
                Ok(outcome)
            }
            Err(e) => {
                log::warn!("selector aborted: {e}");
                if let Err(cleanup) = engine.abort(term) {
                    log::warn!("failed to restore cursor: {cleanup}");
                }
                Err(e)
            }
        }
    }

    fn interact<T: TerminalBackend + ?Sized>(
        &self,
        term: &mut T,
        engine: &mut RenderEngine,
        decoder: &KeyDecoder,
        state: &mut SelectorState,
    ) -> Result<Outcome> {
        engine.tick(term, &self.entries, state.pos())?;
        loop {
            let event = decoder.decode(term)?;
            match state.apply(event) {
                Phase::Running => engine.tick(term, &self.entries, state.pos())?,
                Phase::Confirmed => {
                    let index = state.pos();
                    let value = self.entries.get(index).unwrap_or_default().to_string();
                    return Ok(Outcome::Selected(Selection { index, value }));
                }
                Phase::Cancelled => return Ok(Outcome::Cancelled),
            }
        }
    }
}
