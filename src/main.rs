//! clikit - Interactive terminal toolkit
//! Demo entry point exercising every widget

mod calc;

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use clikit::color::{Painter, Theme};
use clikit::console::{ConsoleConfig, ConsoleContext, InteractiveConsole};
use clikit::cursor::query_cursor_position;
use clikit::input::{ask_input, ask_path, console_input, getpass, ConsoleInputOptions, PathKind};
use clikit::output::{param, pause, vline_for};
use clikit::term::crossterm::CrosstermBackend;
use clikit::timer::Timer;
use clikit::{Capabilities, Outcome, Selector, SelectorOptions, TerminalBackend};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "clikit", about = "Interactive terminal toolkit demo")]
struct Args {
    /// Write debug logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Never emit colors
    #[arg(long)]
    no_color: bool,

    /// Wait for a key press before exiting
    #[arg(long)]
    pause: bool,

    #[command(subcommand)]
    demo: Demo,
}

#[derive(Subcommand)]
enum Demo {
    /// Pick one entry; empty entries become separators
    Select {
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long, default_value = ">")]
        marker: String,
        /// Initially highlighted entry (0-based)
        #[arg(long)]
        start: Option<usize>,
        /// Do not print the chosen value next to the title
        #[arg(long)]
        quiet: bool,
        #[arg(required = true)]
        entries: Vec<String>,
    },
    /// Ask for a single line
    Ask {
        #[arg(default_value = "Input: ")]
        prompt: String,
        /// Mask typed characters
        #[arg(long)]
        password: bool,
    },
    /// Ask for an existing path
    Path {
        #[arg(default_value = "Path: ")]
        prompt: String,
        #[arg(long, conflicts_with = "dir")]
        file: bool,
        #[arg(long)]
        dir: bool,
    },
    /// Capture several lines of text
    Multiline {
        #[arg(long)]
        header: Option<String>,
        /// Stay on the main screen
        #[arg(long)]
        inline: bool,
    },
    /// Integer calculator console
    Console,
    /// Report where the cursor is
    Cursor,
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    WriteLogger::init(LevelFilter::Debug, config, file)?;
    Ok(())
}

/// Run one demo on a raw terminal; returns text to print once the terminal
/// is restored
fn run_demo(demo: Demo, term: &mut CrosstermBackend, caps: Capabilities) -> anyhow::Result<Option<String>> {
    let theme = Theme::default();
    match demo {
        Demo::Select {
            title,
            marker,
            start,
            quiet,
            entries,
        } => {
            let mut options = SelectorOptions::new()
                .with_marker(marker)
                .with_print_result(!quiet)
                .with_capabilities(caps);
            if let Some(title) = title {
                options = options.with_title(title);
            }
            if let Some(start) = start {
                options = options.with_start(start);
            }
            let selector = Selector::new(entries, options)?;

            let mut timer = Timer::new();
            timer.start();
            let outcome = selector.run(term)?;
            log::info!("selection took {:?}", timer.stop());

            Ok(match outcome {
                Outcome::Selected(selection) if quiet => Some(selection.index.to_string()),
                _ => None,
            })
        }
        Demo::Ask { prompt, password } => {
            let answer = if password {
                getpass(term, &prompt, '*', caps)?
            } else {
                ask_input(term, &prompt, caps, theme)?
            };
            Ok(answer.map(|answer| {
                let painter = Painter::new(caps.color);
                param(&painter, &theme, "Answer", &answer, None)
            }))
        }
        Demo::Path { prompt, file, dir } => {
            let kind = if file {
                PathKind::File
            } else if dir {
                PathKind::Directory
            } else {
                PathKind::Any
            };
            let path = ask_path(term, &prompt, kind, caps, theme)?;
            Ok(path.map(|path| path.display().to_string()))
        }
        Demo::Multiline { header, inline } => {
            let mut options = ConsoleInputOptions::new()
                .with_alt_screen(!inline)
                .with_capabilities(caps);
            if let Some(header) = header {
                options = options.with_header(header);
            }
            Ok(Some(console_input(term, &options)?))
        }
        Demo::Console => {
            let config = ConsoleConfig::new()
                .with_title("Calculator")
                .with_binding("answer", "42")
                .with_capabilities(caps);
            InteractiveConsole::new(calc::Calculator, config, ConsoleContext::new()).run(term)?;
            Ok(None)
        }
        Demo::Cursor => {
            let position = query_cursor_position(term)?;
            let rule = vline_for(&*term)?;
            term.write_str(&rule)?;
            term.write_str("\r\n")?;
            term.flush()?;
            Ok(Some(format!("row {}, column {}", position.row, position.column)))
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let mut caps = Capabilities::detect();
    if args.no_color {
        caps.color = false;
    }
    log::info!("clikit starting with {caps:?}");

    let mut term = CrosstermBackend::new()?;
    term.init()?;
    let result = run_demo(args.demo, &mut term, caps);
    if args.pause && result.is_ok() {
        pause(&mut term)?;
    }
    term.deinit();

    if let Some(report) = result? {
        println!("{}", report.trim_end());
    }
    Ok(())
}
