//! Tests for the render engine
//! Expected sequences assume ANSI output with color disabled

use super::*;
use crate::test_utils::MockTerminal;

const SAVE: &str = "\x1b7";
const RESTORE: &str = "\x1b8";
const HIDE: &str = "\x1b[?25l";
const SHOW: &str = "\x1b[?25h";

fn plain_engine(title: Option<&str>) -> RenderEngine {
    RenderEngine::new(">", title, Theme::default(), Capabilities::plain())
}

fn grouped_list() -> EntryList {
    EntryList::from_raw(["A", "B", "", "C"]).unwrap()
}

#[test]
fn test_indent_accounts_for_marker_and_title() {
    assert_eq!(plain_engine(None).indent(), 4);
    assert_eq!(plain_engine(Some("Pick")).indent(), 5);

    let wide = RenderEngine::new("→→", None, Theme::default(), Capabilities::plain());
    assert_eq!(wide.indent(), 5);
}

#[test]
fn test_begin_draws_all_entries_with_separator_rows() {
    let mut term = MockTerminal::new(24, 80);
    let mut engine = plain_engine(None);
    engine.begin(&mut term, &grouped_list(), 0).unwrap();

    let expected = format!(
        "{HIDE}\r\n\n\n\n\x1b[4A{SAVE}\x1b[4CA\r\n\x1b[4CB\r\n\r\n\x1b[4CC\r\n{RESTORE}"
    );
    assert_eq!(term.get_written_string(), expected);
    // Nothing flushed until the first tick
    assert_eq!(term.flush_count(), 0);
}

#[test]
fn test_begin_prints_title_line() {
    let mut term = MockTerminal::new(24, 80);
    let mut engine = plain_engine(Some("Pick"));
    engine.begin(&mut term, &grouped_list(), 0).unwrap();
    assert!(term
        .get_written_string()
        .starts_with(&format!("{HIDE}\r\x1b[2CPick\r\n")));
}

#[test]
fn test_tick_repaints_previous_and_new_rows() {
    let mut term = MockTerminal::new(24, 80);
    let mut engine = plain_engine(None);
    let list = grouped_list();
    engine.begin(&mut term, &list, 0).unwrap();
    term.clear();

    engine.tick(&mut term, &list, 2).unwrap();

    // Row 0 unhighlighted in place, row 2 lives on physical row 3
    let expected = format!(
        "{RESTORE}\x1b[2K\x1b[4CA{RESTORE}\x1b[3B\x1b[2K\x1b[2C> C{RESTORE}"
    );
    assert_eq!(term.get_written_string(), expected);
    assert_eq!(term.flush_count(), 1);

    term.clear();
    engine.tick(&mut term, &list, 1).unwrap();
    let expected = format!(
        "{RESTORE}\x1b[3B\x1b[2K\x1b[4CC{RESTORE}\x1b[1B\x1b[2K\x1b[2C> B{RESTORE}"
    );
    assert_eq!(term.get_written_string(), expected);
}

#[test]
fn test_tick_without_resize_does_not_redraw() {
    let mut term = MockTerminal::new(24, 80);
    let mut engine = plain_engine(None);
    let list = grouped_list();
    engine.begin(&mut term, &list, 0).unwrap();
    term.clear();

    engine.tick(&mut term, &list, 0).unwrap();
    engine.tick(&mut term, &list, 1).unwrap();
    assert_eq!(term.count_written("\x1b[J"), 0);
    assert_eq!(term.count_written(SAVE), 0);
    assert_eq!(term.flush_count(), 2);
}

#[test]
fn test_tick_after_resize_redraws_everything() {
    let list = grouped_list();
    for (rows, cols) in [(30, 80), (24, 100)] {
        let mut term = MockTerminal::new(24, 80);
        let mut engine = plain_engine(None);
        engine.begin(&mut term, &list, 0).unwrap();
        engine.tick(&mut term, &list, 0).unwrap();
        term.clear();

        term.size = (rows, cols);
        engine.tick(&mut term, &list, 1).unwrap();

        let out = term.get_written_string();
        assert!(out.starts_with(&format!("{RESTORE}\x1b[J\r")));
        assert_eq!(term.count_written(SAVE), 1);
        assert_eq!(term.count_written("\x1b[4CC\r\n"), 1);
        assert!(out.ends_with(&format!("\x1b[1B\x1b[2K\x1b[2C> B{RESTORE}")));
        // Everything in one batch
        assert_eq!(term.flush_count(), 1);

        // Size remembered: next tick is incremental again
        term.clear();
        engine.tick(&mut term, &list, 2).unwrap();
        assert_eq!(term.count_written("\x1b[J"), 0);
    }
}

#[test]
fn test_finish_confirmed_prints_value() {
    let mut term = MockTerminal::new(24, 80);
    let mut engine = plain_engine(None);
    engine
        .finish(&mut term, Finish::Confirmed("No"), true)
        .unwrap();
    assert_eq!(
        term.get_written_string(),
        format!("{RESTORE}{SHOW}\x1b[J\r\x1b[2CNo\r\n")
    );
    assert_eq!(term.flush_count(), 1);
}

#[test]
fn test_finish_with_title_prints_next_to_title() {
    let mut term = MockTerminal::new(24, 80);
    let mut engine = plain_engine(Some("Pick"));
    engine.finish(&mut term, Finish::Cancelled, true).unwrap();
    assert_eq!(
        term.get_written_string(),
        format!("{RESTORE}{SHOW}\x1b[J\x1b[1A\r\x1b[7Ccanceled\r\n")
    );
}

#[test]
fn test_finish_without_printing() {
    let mut term = MockTerminal::new(24, 80);
    plain_engine(None)
        .finish(&mut term, Finish::Confirmed("x"), false)
        .unwrap();
    assert_eq!(term.get_written_string(), format!("{RESTORE}{SHOW}\x1b[J"));

    let mut term = MockTerminal::new(24, 80);
    plain_engine(Some("T"))
        .finish(&mut term, Finish::Confirmed("x"), false)
        .unwrap();
    assert_eq!(
        term.get_written_string(),
        format!("{RESTORE}{SHOW}\x1b[J\x1b[1A\r\x1b[J")
    );
}

#[test]
fn test_abort_shows_cursor() {
    let mut term = MockTerminal::new(24, 80);
    plain_engine(None).abort(&mut term).unwrap();
    assert_eq!(term.count_written(SHOW), 1);
    assert_eq!(term.flush_count(), 1);
}

#[test]
fn test_colored_tick_highlights_selection() {
    let mut term = MockTerminal::new(24, 80);
    let mut engine = RenderEngine::new(">", None, Theme::default(), Capabilities::default());
    let list = grouped_list();
    engine.begin(&mut term, &list, 0).unwrap();
    term.clear();

    engine.tick(&mut term, &list, 1).unwrap();
    let painter = Painter::new(true);
    let out = term.get_written_string();
    assert!(out.contains(&painter.paint_string(Theme::default().marker, ">")));
    assert!(out.contains(&painter.paint_string(Theme::default().selected, "B")));
}
