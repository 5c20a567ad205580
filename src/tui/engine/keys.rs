//! Key sources and translation of raw terminal events into [`Key`]s.

use std::{collections::VecDeque, io};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    tty::IsTty,
};
use log::trace;

use super::Key;
use crate::tui::raw_mode::RawMode;

/// Where the engine pulls keystrokes from.
pub trait KeySource {
    /// Next key press, or `None` once input is exhausted.
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>>;

    /// Called before a read starts. Terminal-backed sources switch to raw mode here.
    fn enter_raw(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Called when a read ends, on every path.
    fn leave_raw(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Key presses from the controlling terminal, via crossterm.
pub struct TerminalKeys {
    raw: Option<RawMode>,
}

impl TerminalKeys {
    /// Fails when stdin is not a terminal.
    pub fn new() -> io::Result<Self> {
        if !io::stdin().is_tty() {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "stdin is not a terminal",
            ));
        }
        Ok(Self { raw: None })
    }
}

impl KeySource for TerminalKeys {
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(Some(key)),
                other => trace!("ignoring terminal event {other:?}"),
            }
        }
    }

    fn enter_raw(&mut self) -> io::Result<()> {
        if self.raw.is_none() {
            self.raw = Some(RawMode::enable()?);
        }
        Ok(())
    }

    fn leave_raw(&mut self) -> io::Result<()> {
        match self.raw.take() {
            Some(raw) => raw.disable(),
            None => Ok(()),
        }
    }
}

/// A fixed sequence of key presses. Runs dry into end-of-input.
///
/// Useful for driving widgets headless:
///
/// ```
/// use crossterm::event::KeyCode;
/// use promptline::tui::engine::ScriptedKeys;
///
/// let keys = ScriptedKeys::new().text("ok").key(KeyCode::Enter);
/// assert_eq!(keys.len(), 3);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ScriptedKeys {
    events: VecDeque<KeyEvent>,
}

impl ScriptedKeys {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn key(mut self, code: KeyCode) -> Self {
        self.events.push_back(KeyEvent::new(code, KeyModifiers::NONE));
        self
    }

    #[must_use]
    pub fn ctrl(mut self, c: char) -> Self {
        self.events
            .push_back(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
        self
    }

    #[must_use]
    pub fn alt(mut self, code: KeyCode) -> Self {
        self.events.push_back(KeyEvent::new(code, KeyModifiers::ALT));
        self
    }

    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.events.extend(
            text.chars()
                .map(|c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)),
        );
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl KeySource for ScriptedKeys {
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        Ok(self.events.pop_front())
    }
}

/// Decodes a key press into the engine's key vocabulary.
///
/// Ctrl-D always decodes to [`Key::Eof`]; the engine downgrades it to a
/// forward delete when the line is not empty.
#[must_use]
pub fn translate(event: &KeyEvent) -> Key {
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let alt = event.modifiers.contains(KeyModifiers::ALT);

    match event.code {
        KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
            'c' => Key::Interrupt,
            'd' => Key::Eof,
            'a' => Key::Home,
            'e' => Key::End,
            'b' => Key::Left,
            'f' => Key::Right,
            'k' => Key::KillToEnd,
            'u' => Key::KillLine,
            'w' => Key::KillWord,
            'p' => Key::Prev,
            'n' => Key::Next,
            'h' => Key::Backspace,
            'j' | 'm' => Key::Enter,
            _ => Key::Other,
        },
        KeyCode::Char('b') if alt => Key::WordLeft,
        KeyCode::Char('f') if alt => Key::WordRight,
        KeyCode::Char(c) if !c.is_control() => Key::Char(c),
        KeyCode::Backspace if alt || ctrl => Key::MetaBackspace,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Delete => Key::Delete,
        KeyCode::Left if ctrl || alt => Key::WordLeft,
        KeyCode::Right if ctrl || alt => Key::WordRight,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Up => Key::Prev,
        KeyCode::Down => Key::Next,
        _ => Key::Other,
    }
}
