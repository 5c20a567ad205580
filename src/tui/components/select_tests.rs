#![allow(clippy::unwrap_used)]

use crossterm::event::{KeyCode, KeyEvent};

use super::*;
use crate::tui::{
    engine::{KeySource, ScriptedKeys},
    test_support::{RecordingConsole, SharedBuffer},
};

const MOVE_UP: &str = "\x1b[1A";
const CLEAR_LINE: &str = "\x1b[2K";
const HIDE_CURSOR: &str = "\x1b[?25l";
const SHOW_CURSOR: &str = "\x1b[?25h";

fn engine(keys: impl KeySource + 'static) -> (TerminalEngine, SharedBuffer) {
    let out = SharedBuffer::new();
    let engine =
        TerminalEngine::new(EngineConfig::default(), keys, out.clone(), SharedBuffer::new())
            .unwrap();
    (engine, out)
}

struct BrokenKeys;

impl KeySource for BrokenKeys {
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        Err(io::Error::other("terminal went away"))
    }
}

#[test]
fn test_next_wraps_around() {
    let mut list = SelectList::new("pick", ["a", "b", "c"]);
    let mut console = RecordingConsole::default();

    let mut seen = Vec::new();
    for _ in 0..3 {
        list.on_key(&mut console, Some(""), 0, Key::Next);
        seen.push(list.current_index());
    }
    assert_eq!(seen, [1, 2, 0]);
}

#[test]
fn test_prev_wraps_around() {
    let mut list = SelectList::new("pick", ["a", "b", "c"]);
    let mut console = RecordingConsole::default();

    list.on_key(&mut console, Some(""), 0, Key::Prev);
    assert_eq!(list.current_index(), 2);
    list.on_key(&mut console, Some(""), 0, Key::Prev);
    assert_eq!(list.current_index(), 1);
}

#[test]
fn test_index_stays_in_range_for_any_sequence() {
    let mut console = RecordingConsole::default();

    for len in 1..=4 {
        let options: Vec<String> = (0..len).map(|i| format!("opt{i}")).collect();
        let mut list = SelectList::new("pick", options);

        for step in 0..25 {
            let key = if step % 3 == 0 { Key::Prev } else { Key::Next };
            list.on_key(&mut console, Some(""), 0, key);
            assert!(list.current_index() < len);
        }
    }
}

#[test]
fn test_single_option_never_moves() {
    let mut list = SelectList::new("pick", ["only"]);
    let mut console = RecordingConsole::default();

    list.on_key(&mut console, Some(""), 0, Key::Next);
    list.on_key(&mut console, Some(""), 0, Key::Prev);
    assert_eq!(list.current_index(), 0);
}

#[test]
fn test_listener_never_passes_keys_through() {
    let mut list = SelectList::new("pick", ["a", "b"]);
    let mut console = RecordingConsole::default();

    for key in [Key::Start, Key::Next, Key::Prev, Key::Char('x'), Key::Backspace] {
        let reply = list.on_key(&mut console, Some(""), 0, key);
        assert!(!reply.allow_default, "{key:?} was passed through");
    }
    assert!(!list.is_done());

    let reply = list.on_key(&mut console, Some(""), 0, Key::Enter);
    assert!(!reply.allow_default);
    assert!(list.is_done());
}

#[test]
fn test_first_paint_does_not_move_up() {
    let mut list = SelectList::new("pick", ["a", "b", "c"]);
    let mut console = RecordingConsole::default();

    list.on_key(&mut console, None, 0, Key::Start);

    let text = console.text();
    assert_eq!(text.matches(MOVE_UP).count(), 0);
    assert_eq!(text.matches('\n').count(), 3);
    assert!(text.contains(GLYPH_SELECTION));
}

#[test]
fn test_repaint_emits_exactly_one_line_per_option() {
    let mut list = SelectList::new("pick", ["a", "b", "c", "d"]);
    let mut console = RecordingConsole::default();
    list.on_key(&mut console, None, 0, Key::Start);

    for key in [Key::Next, Key::Next, Key::Prev] {
        console.written.clear();
        list.on_key(&mut console, Some(""), 0, key);

        let text = console.text();
        assert_eq!(text.matches(MOVE_UP).count(), 4);
        assert_eq!(text.matches('\n').count(), 4);
        assert_eq!(text.matches(GLYPH_SELECTION).count(), 1);
    }
}

#[test]
fn test_other_keys_do_not_repaint() {
    let mut list = SelectList::new("pick", ["a", "b"]);
    let mut console = RecordingConsole::default();
    list.on_key(&mut console, None, 0, Key::Start);
    console.written.clear();

    list.on_key(&mut console, Some(""), 0, Key::Char('q'));
    assert!(console.written.is_empty());
}

#[test]
fn test_commit_erases_options_and_label() {
    let mut list = SelectList::new("Pick a letter", ["a", "b", "c"]);
    let mut console = RecordingConsole::default();
    list.on_key(&mut console, Some(""), 0, Key::Next);
    console.written.clear();

    list.clean_and_commit(&mut console).unwrap();

    let text = console.text();
    assert_eq!(text.matches(MOVE_UP).count(), 4);
    assert_eq!(text.matches(CLEAR_LINE).count(), 4);
    assert_eq!(text.matches('\n').count(), 1);
    assert!(text.contains("Pick a letter: b"));
}

#[test]
fn test_commit_skips_colon_after_question() {
    let list = SelectList::new("Which one?", ["a", "b"]);
    let mut console = RecordingConsole::default();

    list.clean_and_commit(&mut console).unwrap();
    assert!(console.text().contains("Which one? a"));
}

#[test]
fn test_run_scenario_wraps_and_confirms() {
    let keys = ScriptedKeys::new()
        .key(KeyCode::Down)
        .key(KeyCode::Down)
        .key(KeyCode::Down)
        .key(KeyCode::Enter);
    let (mut engine, out) = engine(keys);
    let mut list = SelectList::new("pick", ["a", "b", "c"]);

    let result = list.run_with(&mut engine).unwrap();

    assert_eq!(
        result,
        SelectResult {
            selected_index: 0,
            selected_value: "a".into(),
            cancelled: false,
        }
    );
    let text = out.text();
    assert!(text.contains("pick [Use ↑/↓ to select, enter to confirm]"));
    assert!(text.contains("pick: a"));
}

#[test]
fn test_run_hides_and_restores_cursor() {
    let (mut engine, out) = engine(ScriptedKeys::new().key(KeyCode::Enter));
    let mut list = SelectList::new("pick", ["a", "b"]);

    list.run_with(&mut engine).unwrap();

    let text = out.text();
    let hidden = text.find(HIDE_CURSOR).unwrap();
    let shown = text.rfind(SHOW_CURSOR).unwrap();
    assert!(hidden < shown);
}

#[test]
fn test_cursor_restored_on_read_error() {
    let (mut engine, out) = engine(BrokenKeys);
    let mut list = SelectList::new("pick", ["a", "b"]);

    assert!(list.run_with(&mut engine).is_err());
    assert!(out.text().contains(SHOW_CURSOR));
}

#[test]
fn test_starting_index_is_clamped() {
    let (mut engine, _) = engine(ScriptedKeys::new().key(KeyCode::Enter));
    let mut list = SelectList::new("pick", ["a", "b"]).with_starting_index(10);

    let result = list.run_with(&mut engine).unwrap();
    assert_eq!(result.selected_index, 1);
    assert_eq!(result.selected_value, "b");
}

#[test]
fn test_interrupt_cancels() {
    let keys = ScriptedKeys::new().key(KeyCode::Down).ctrl('c');
    let (mut engine, out) = engine(keys);
    let mut list = SelectList::new("pick", ["a", "b"]);

    let result = list.run_with(&mut engine).unwrap();

    assert!(result.cancelled);
    assert!(result.selected_value.is_empty());
    assert!(out.text().contains(SHOW_CURSOR));
}

#[test]
fn test_end_of_input_cancels() {
    let (mut engine, _) = engine(ScriptedKeys::new());
    let mut list = SelectList::new("pick", ["a"]);

    assert!(list.run_with(&mut engine).unwrap().cancelled);
}

#[test]
fn test_empty_options_fail_before_drawing() {
    let (mut engine, out) = engine(ScriptedKeys::new());
    let mut list = SelectList::new("pick", Vec::<String>::new());

    assert!(list.run_with(&mut engine).is_err());
    assert!(out.bytes().is_empty());
}

#[test]
fn test_description_is_printed_before_instructions() {
    let (mut engine, out) = engine(ScriptedKeys::new().key(KeyCode::Enter));
    let mut list = SelectList::new("pick", ["a"]).with_description("Choose wisely");

    list.run_with(&mut engine).unwrap();

    let text = out.text();
    let description = text.find("Choose wisely").unwrap();
    let instructions = text.find("[Use").unwrap();
    assert!(description < instructions);
}
