//! Interactive console
//! A read-eval-print loop drawn below a fixed banner in the alternate screen

/// ## console/ Invariants
///
/// - The banner occupies the first `BANNER_ROWS` rows; input scrolls below it.
/// - Bindings are the permanent ones merged with the temporary context;
///   a temporary context is consumed by exactly one console.
/// - The terminal leaves the alternate screen on every exit path.
use std::collections::BTreeMap;

use crossterm::cursor::{MoveTo, MoveUp};
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};

use crate::color::{Painter, Theme};
use crate::error::Result;
use crate::input::{LineEditor, LineEvent};
use crate::output::vline;
use crate::term::ansi;
use crate::term::{Capabilities, TerminalBackend};

/// Rows taken by the banner: rule, blank, title, hint, blank, rule
pub const BANNER_ROWS: u16 = 6;

pub const DEFAULT_TITLE: &str = "Interactive Console";
pub const DEFAULT_PROMPT: &str = ">>> ";
pub const DEFAULT_CONTINUATION: &str = "... ";

const BANNER_HINT: &str = "CTRL+C to exit, '!help' for help.";

const HELP_ENTRIES: &[(&str, &str)] = &[
    ("cls, clear", "clears the screen"),
    ("exit, quit", "exits"),
    ("!rerender", "redraws the banner, useful after a resize"),
    ("!reload", "restarts the console with only the permanent bindings"),
];

/// Named values visible to evaluated input
pub type Bindings = BTreeMap<String, String>;

/// Result of evaluating one complete or partial statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalOutcome {
    /// Evaluation finished; the value is printed when present
    Value(Option<String>),
    /// The statement continues on the next line
    Incomplete,
    /// Evaluation raised a condition, printed as `name: message`
    Raised {
        name: String,
        message: Option<String>,
    },
    /// The evaluated input asked the console to exit
    Exit,
}

/// Language backend of the console
pub trait Evaluator {
    /// Evaluate `source`, which may span several lines once continued
    fn eval(&mut self, source: &str, bindings: &mut Bindings) -> EvalOutcome;
}

impl<F> Evaluator for F
where
    F: FnMut(&str, &mut Bindings) -> EvalOutcome,
{
    fn eval(&mut self, source: &str, bindings: &mut Bindings) -> EvalOutcome {
        self(source, bindings)
    }
}

/// Console configuration; `permanent` bindings are present in every session
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub permanent: Bindings,
    pub title: String,
    pub prompt: String,
    pub continuation: String,
    pub theme: Theme,
    pub capabilities: Capabilities,
}

impl ConsoleConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_binding(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.permanent.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
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

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            permanent: Bindings::new(),
            title: DEFAULT_TITLE.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            continuation: DEFAULT_CONTINUATION.to_string(),
            theme: Theme::default(),
            capabilities: Capabilities::default(),
        }
    }
}

/// Bindings for the next console only
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsoleContext {
    bindings: Bindings,
}

impl ConsoleContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a binding
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.bindings.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.bindings.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    /// Take over all bindings of `other`; its values win on conflicts
    pub fn merge(&mut self, other: ConsoleContext) {
        self.bindings.extend(other.bindings);
    }
}

/// Built-in commands recognised before input reaches the evaluator
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command<'a> {
    Empty,
    Help,
    Clear,
    Rerender,
    Reload,
    Exit,
    Source(&'a str),
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        match line.trim() {
            "" => Command::Empty,
            "!help" => Command::Help,
            "cls" | "clear" => Command::Clear,
            "!rerender" => Command::Rerender,
            "!reload" => Command::Reload,
            "exit" | "quit" => Command::Exit,
            source => Command::Source(source),
        }
    }
}

/// Read-eval-print loop over a terminal channel
pub struct InteractiveConsole<E: Evaluator> {
    evaluator: E,
    config: ConsoleConfig,
    bindings: Bindings,
    painter: Painter,
}

impl<E: Evaluator> InteractiveConsole<E> {
    /// Create a console; `context` is consumed and only visible to this one
    pub fn new(evaluator: E, config: ConsoleConfig, context: ConsoleContext) -> Self {
        let mut bindings = config.permanent.clone();
        bindings.extend(context.bindings);
        log::debug!("console created with {} binding(s)", bindings.len());
        InteractiveConsole {
            evaluator,
            painter: Painter::new(config.capabilities.color),
            config,
            bindings,
        }
    }

    #[must_use]
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    #[must_use]
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Run until `exit`, Ctrl+C or end of input. The terminal must be in raw
    /// mode.
    pub fn run<T: TerminalBackend + ?Sized>(&mut self, term: &mut T) -> Result<()> {
        self.banner(term)?;
        let result = self.repl(term);

        term.write_str(ansi::RESET_SCROLL_REGION)?;
        term.write_str(ansi::SOFT_RESET)?;
        let mut frame = Vec::new();
        queue!(frame, LeaveAlternateScreen)?;
        term.write(&frame)?;
        term.flush()?;
        result
    }

    fn repl<T: TerminalBackend + ?Sized>(&mut self, term: &mut T) -> Result<()> {
        loop {
            let prompt = self.config.prompt.clone();
            let Some(line) = self.read_line(term, &prompt)? else {
                return Ok(());
            };

            let mut frame = Vec::new();
            match Command::parse(&line) {
                Command::Empty => {
                    // Reuse the prompt line
                    queue!(frame, MoveUp(1))?;
                    term.write(&frame)?;
                    continue;
                }
                Command::Help => self.help(&mut frame)?,
                Command::Clear => {
                    queue!(frame, MoveTo(0, BANNER_ROWS), Clear(ClearType::FromCursorDown))?;
                    term.write(&frame)?;
                    term.flush()?;
                    continue;
                }
                Command::Rerender => {
                    self.banner(term)?;
                    continue;
                }
                Command::Reload => {
                    self.bindings = self.config.permanent.clone();
                    log::debug!("console reloaded");
                    self.banner(term)?;
                    continue;
                }
                Command::Exit => return Ok(()),
                Command::Source(source) => {
                    if !self.execute(term, source.to_string())? {
                        return Ok(());
                    }
                }
            }
            queue!(frame, Print("\r\n"))?;
            term.write(&frame)?;
            term.flush()?;
        }
    }

    /// Evaluate a statement, reading continuation lines while it is
    /// incomplete. Returns false when the console should exit.
    fn execute<T: TerminalBackend + ?Sized>(&mut self, term: &mut T, mut source: String) -> Result<bool> {
        loop {
            let outcome = self.evaluator.eval(&source, &mut self.bindings);
            log::trace!("evaluated {source:?}: {outcome:?}");

            let mut frame = Vec::new();
            match outcome {
                EvalOutcome::Incomplete => {
                    let continuation = self.config.continuation.clone();
                    match self.read_line(term, &continuation)? {
                        Some(more) => {
                            source.push('\n');
                            source.push_str(&more);
                            continue;
                        }
                        // Abandon the statement
                        None => return Ok(true),
                    }
                }
                EvalOutcome::Value(None) => return Ok(true),
                EvalOutcome::Value(Some(value)) => {
                    queue!(frame, Print(value.replace('\n', "\r\n")), Print("\r\n"))?;
                }
                EvalOutcome::Raised { name, message } => {
                    self.painter.paint(&mut frame, self.config.theme.cancelled, &name)?;
                    if let Some(message) = message {
                        self.painter.paint(&mut frame, self.config.theme.muted, ":")?;
                        queue!(frame, Print(" "), Print(message))?;
                    }
                    queue!(frame, Print("\r\n"))?;
                }
                EvalOutcome::Exit => return Ok(false),
            }
            term.write(&frame)?;
            return Ok(true);
        }
    }

    fn read_line<T: TerminalBackend + ?Sized>(&self, term: &mut T, prompt: &str) -> Result<Option<String>> {
        let mut frame = Vec::new();
        self.painter.reset(&mut frame)?;
        queue!(frame, Print("\r"), Print(prompt))?;
        term.write(&frame)?;

        let editor = LineEditor::new(self.config.capabilities, self.config.theme);
        match editor.read_line(term)? {
            LineEvent::Line(line) => Ok(Some(line)),
            LineEvent::Cancelled | LineEvent::EndOfInput => Ok(None),
        }
    }

    fn help(&self, frame: &mut Vec<u8>) -> Result<()> {
        let theme = &self.config.theme;
        queue!(frame, Print("\r\n  "))?;
        self.painter.paint(frame, theme.heading, "List of all custom commands:")?;
        queue!(frame, Print("\r\n\r\n"))?;
        for (command, description) in HELP_ENTRIES {
            queue!(frame, Print("   - "))?;
            self.painter.paint(frame, theme.marker, &format!("{command:<22}"))?;
            self.painter.paint(frame, theme.muted, description)?;
            queue!(frame, Print("\r\n"))?;
        }
        Ok(())
    }

    /// Enter the alternate screen, draw the banner and confine scrolling to
    /// the rows below it
    fn banner<T: TerminalBackend + ?Sized>(&self, term: &mut T) -> Result<()> {
        let size = term.get_size()?;
        let theme = &self.config.theme;
        let rule = vline(size.cols);

        let mut frame = Vec::new();
        queue!(frame, LeaveAlternateScreen, EnterAlternateScreen, MoveTo(0, 0))?;
        self.painter.paint(&mut frame, theme.rule, &rule)?;
        queue!(frame, Print("\r\n\r\n  "))?;
        self.painter.paint(&mut frame, theme.heading, &self.config.title)?;
        queue!(frame, Print("\r\n  "))?;
        self.painter.paint(&mut frame, theme.muted, BANNER_HINT)?;
        queue!(frame, Print("\r\n\r\n"))?;
        self.painter.paint(&mut frame, theme.rule, &rule)?;
        queue!(
            frame,
            Print("\r\n"),
            Print(ansi::format_scroll_region(BANNER_ROWS + 1, size.rows.max(BANNER_ROWS + 1))),
            MoveTo(0, BANNER_ROWS)
        )?;
        term.write(&frame)?;
        term.flush()
    }
}
