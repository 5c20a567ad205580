//! Terminal-backed line engine.

use std::{
    error::Error,
    io::{self, Write},
};

use crossterm::{
    cursor::MoveLeft,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use derive_more::Display;
use log::{debug, trace};
use tui_input::{Input, InputRequest};

use super::{
    Console, EditMode, EngineConfig, Key, KeyListener, KeySource, LineEngine, ListenerReply,
    ReadError,
    keys::{TerminalKeys, translate},
};
use crate::tui::style::BELL;

/// Reasons an engine cannot be set up.
#[derive(Debug, Display)]
pub enum EngineError {
    #[display("input is not a terminal: {_0}")]
    NotATerminal(io::Error),
    #[display("edit mode '{_0}' is not supported")]
    UnsupportedEditMode(EditMode),
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotATerminal(e) => Some(e),
            Self::UnsupportedEditMode(_) => None,
        }
    }
}

/// Writes `\n` as `\r\n`, since raw mode turns off the terminal's own translation.
struct CrlfWriter {
    inner: Box<dyn Write>,
}

impl Write for CrlfWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match buf.iter().position(|&b| b == b'\n') {
            None => self.inner.write(buf),
            Some(0) => {
                self.inner.write_all(b"\r\n")?;
                Ok(1)
            }
            Some(n) => {
                let (head, _) = buf.split_at(n);
                self.inner.write(head)
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

enum Outcome {
    Continue,
    Submit,
}

/// Single-line editor driving a terminal: raw key input, one editable line,
/// a key listener hook and optional history.
pub struct TerminalEngine {
    config: EngineConfig,
    keys: Box<dyn KeySource>,
    out: CrlfWriter,
    err: Box<dyn Write>,
    prompt: String,
    input: Input,
    history: Vec<String>,
    history_index: Option<usize>,
    saved_line: Option<String>,
    closed: bool,
}

impl TerminalEngine {
    pub fn new<K, O, E>(config: EngineConfig, keys: K, out: O, err: E) -> Result<Self, EngineError>
    where
        K: KeySource + 'static,
        O: Write + 'static,
        E: Write + 'static,
    {
        if config.edit_mode != EditMode::Emacs {
            return Err(EngineError::UnsupportedEditMode(config.edit_mode));
        }
        debug!("engine config: {config:?}");

        Ok(Self {
            config,
            keys: Box::new(keys),
            out: CrlfWriter {
                inner: Box::new(out),
            },
            err: Box::new(err),
            prompt: String::new(),
            input: Input::default(),
            history: Vec::new(),
            history_index: None,
            saved_line: None,
            closed: false,
        })
    }

    /// Engine reading the controlling terminal and writing to stdout/stderr.
    pub fn stdio(config: EngineConfig) -> Result<Self, EngineError> {
        let keys = TerminalKeys::new().map_err(EngineError::NotATerminal)?;
        Self::new(config, keys, io::stdout(), io::stderr())
    }

    /// Lines submitted so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    fn read_loop(
        &mut self,
        seed: &str,
        listener: &mut dyn KeyListener,
    ) -> Result<String, ReadError> {
        self.input = Input::new(seed.to_string());
        self.history_index = None;
        self.saved_line = None;

        let pos = self.input.cursor();
        let reply = listener.on_key(self, None, pos, Key::Start);
        self.apply_reply(reply);
        if listener.is_done() {
            return Ok(self.input.value().to_string());
        }
        self.redraw()?;

        loop {
            let Some(event) = self.keys.next_key()? else {
                return Err(self.signal(listener, Key::Eof));
            };

            let mut key = translate(&event);
            if key == Key::Eof && !self.input.value().is_empty() {
                key = Key::Delete;
            }
            if matches!(key, Key::Interrupt | Key::Eof) {
                return Err(self.signal(listener, key));
            }

            let line = self.input.value().to_string();
            let pos = self.input.cursor();
            let reply = listener.on_key(self, Some(&line), pos, key);
            let allow_default = reply.allow_default;
            self.apply_reply(reply);

            if listener.is_done() {
                trace!("listener finished the read on {key:?}");
                return Ok(self.input.value().to_string());
            }

            if allow_default && matches!(self.apply_default(key), Outcome::Submit) {
                let line = self.input.value().to_string();
                self.finish_line()?;
                self.remember(&line);
                return Ok(line);
            }

            self.redraw()?;
        }
    }

    /// Lets the listener see the final line, then ends the read.
    fn signal(&mut self, listener: &mut dyn KeyListener, key: Key) -> ReadError {
        debug!("read ended by {key:?}");
        let line = self.input.value().to_string();
        let pos = self.input.cursor();
        let _ = listener.on_key(self, Some(&line), pos, key);
        if let Err(e) = self.finish_line() {
            return ReadError::Io(e);
        }

        if key == Key::Interrupt {
            ReadError::Interrupted
        } else {
            ReadError::Eof
        }
    }

    fn apply_reply(&mut self, reply: ListenerReply) {
        if let Some(line) = reply.line {
            self.set_line(line, reply.pos);
        }
    }

    fn set_line(&mut self, line: String, pos: usize) {
        let pos = pos.min(line.chars().count());
        self.input = Input::new(line).with_cursor(pos);
    }

    fn apply_default(&mut self, key: Key) -> Outcome {
        let request = match key {
            Key::Enter => return Outcome::Submit,
            Key::Char(c) => InputRequest::InsertChar(c),
            Key::Backspace => InputRequest::DeletePrevChar,
            Key::MetaBackspace | Key::KillWord => InputRequest::DeletePrevWord,
            Key::Delete => InputRequest::DeleteNextChar,
            Key::Left => InputRequest::GoToPrevChar,
            Key::Right => InputRequest::GoToNextChar,
            Key::Home => InputRequest::GoToStart,
            Key::End => InputRequest::GoToEnd,
            Key::WordLeft => InputRequest::GoToPrevWord,
            Key::WordRight => InputRequest::GoToNextWord,
            Key::KillToEnd => InputRequest::DeleteTillEnd,
            Key::KillLine => InputRequest::DeleteLine,
            Key::Prev => {
                if !self.history_prev() {
                    self.ring_bell();
                }
                return Outcome::Continue;
            }
            Key::Next => {
                if !self.history_next() {
                    self.ring_bell();
                }
                return Outcome::Continue;
            }
            Key::Start | Key::Esc | Key::Other | Key::Interrupt | Key::Eof => {
                return Outcome::Continue;
            }
        };

        if self.input.handle(request).is_none() {
            self.ring_bell();
        }
        Outcome::Continue
    }

    fn history_prev(&mut self) -> bool {
        let idx = match self.history_index {
            None if self.history.is_empty() => return false,
            None => {
                self.saved_line = Some(self.input.value().to_string());
                self.history.len().saturating_sub(1)
            }
            Some(0) => return false,
            Some(idx) => idx.saturating_sub(1),
        };

        let Some(entry) = self.history.get(idx).cloned() else {
            return false;
        };
        self.history_index = Some(idx);
        let end = entry.chars().count();
        self.set_line(entry, end);
        true
    }

    fn history_next(&mut self) -> bool {
        let Some(idx) = self.history_index else {
            return false;
        };

        let next = idx.saturating_add(1);
        let entry = if let Some(entry) = self.history.get(next).cloned() {
            self.history_index = Some(next);
            entry
        } else {
            self.history_index = None;
            self.saved_line.take().unwrap_or_default()
        };
        let end = entry.chars().count();
        self.set_line(entry, end);
        true
    }

    fn remember(&mut self, line: &str) {
        if line.is_empty() || !self.config.history.is_enabled() {
            return;
        }
        if self.history.last().is_some_and(|last| last == line) {
            return;
        }

        self.history.push(line.to_string());
        if let Some(cap) = self.config.history.cap() {
            let excess = self.history.len().saturating_sub(cap);
            self.history.drain(..excess);
        }
    }

    fn ring_bell(&mut self) {
        // The bell goes out as a lone byte so a bell filter can recognise it.
        if let Err(e) = self.err.write(&[BELL]).and_then(|_| self.err.flush()) {
            debug!("unable to ring bell: {e}");
        }
    }

    /// Repaints the edit line: prompt, buffer, then the cursor.
    fn redraw(&mut self) -> io::Result<()> {
        let value = self.input.value();
        let len = value.chars().count();
        let shown = if self.config.mask {
            "*".repeat(len)
        } else {
            value.to_string()
        };
        let trailing = len.saturating_sub(self.input.cursor());

        queue!(
            self.out,
            Print('\r'),
            Clear(ClearType::CurrentLine),
            Print(&self.prompt),
            Print(shown)
        )?;
        if trailing > 0 {
            queue!(self.out, MoveLeft(u16::try_from(trailing).unwrap_or(u16::MAX)))?;
        }
        self.out.flush()
    }

    fn finish_line(&mut self) -> io::Result<()> {
        if self.config.unique_edit_line {
            queue!(self.out, Print('\r'), Clear(ClearType::CurrentLine))?;
        } else {
            self.redraw()?;
            queue!(self.out, Print('\n'))?;
        }
        self.out.flush()
    }
}

impl Console for TerminalEngine {
    fn set_prompt(&mut self, prompt: &str) {
        prompt.clone_into(&mut self.prompt);
    }

    fn output(&mut self) -> &mut dyn Write {
        &mut self.out
    }
}

impl LineEngine for TerminalEngine {
    fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn read_line(
        &mut self,
        seed: &str,
        listener: &mut dyn KeyListener,
    ) -> Result<String, ReadError> {
        if self.closed {
            return Err(ReadError::Io(io::Error::other("engine is closed")));
        }

        self.keys.enter_raw()?;
        let result = self.read_loop(seed, listener);
        let restored = self.keys.leave_raw();

        let line = result?;
        restored?;
        Ok(line)
    }

    fn close(&mut self) -> io::Result<()> {
        self.closed = true;
        self.keys.leave_raw()?;
        self.out.flush()?;
        self.err.flush()
    }
}

#[cfg(test)]
#[path = "terminal_tests.rs"]
mod tests;
