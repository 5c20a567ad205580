//! Line-reading engine shared by the prompt widgets.
//!
//! The engine owns the terminal while a line is being read. Widgets hook in
//! through a [`KeyListener`], which sees every keystroke before the engine's
//! own editing logic and may veto it, replace the line, or end the read.

pub mod config;
pub mod keys;
pub mod terminal;

use std::{error::Error, io};

use derive_more::Display;

pub use config::{EditMode, EngineConfig, HistoryLimit};
pub use keys::{KeySource, ScriptedKeys, TerminalKeys};
pub use terminal::{EngineError, TerminalEngine};

/// Keys as seen by a listener.
///
/// Editing keys are already decoded from the raw terminal event, so a
/// listener never has to care whether "next" came from an arrow or Ctrl-N.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Sent once at the start of every read, with no line attached.
    Start,
    Char(char),
    Enter,
    Esc,
    Backspace,
    /// Alt+Backspace
    MetaBackspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    WordLeft,
    WordRight,
    KillToEnd,
    KillLine,
    KillWord,
    /// Up arrow or Ctrl-P
    Prev,
    /// Down arrow or Ctrl-N
    Next,
    /// Ctrl-C. Delivered just before the read fails with [`ReadError::Interrupted`].
    Interrupt,
    /// End of input. Delivered just before the read fails with [`ReadError::Eof`].
    Eof,
    Other,
}

/// What a listener wants done with a keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerReply {
    /// Replacement for the engine's line buffer, if any.
    pub line: Option<String>,
    /// Cursor position (in chars) to use with `line`.
    pub pos: usize,
    /// Whether the engine should still apply its own handling of the key.
    pub allow_default: bool,
}

impl ListenerReply {
    /// Leave the line alone and let the engine handle the key.
    #[must_use]
    pub fn pass(pos: usize) -> Self {
        Self {
            line: None,
            pos,
            allow_default: true,
        }
    }

    /// Leave the line alone and swallow the key.
    #[must_use]
    pub fn swallow(pos: usize) -> Self {
        Self {
            line: None,
            pos,
            allow_default: false,
        }
    }
}

/// The part of an engine a listener may touch while a read is in progress.
pub trait Console {
    /// Replaces the prompt prefix. Takes effect on the next redraw of the edit line.
    fn set_prompt(&mut self, prompt: &str);

    /// Output stream of the engine. Everything widgets print goes through here.
    fn output(&mut self) -> &mut dyn io::Write;
}

/// Per-keystroke hook invoked by [`LineEngine::read_line`].
pub trait KeyListener {
    fn on_key(
        &mut self,
        console: &mut dyn Console,
        line: Option<&str>,
        pos: usize,
        key: Key,
    ) -> ListenerReply;

    /// Checked after every reply; `true` ends the read with the current buffer.
    fn is_done(&self) -> bool {
        false
    }
}

pub trait LineEngine: Console {
    /// Settings the engine reads and draws with.
    fn config(&self) -> &EngineConfig;

    /// Blocks until a line is submitted, the listener reports done, or a
    /// signal arrives. The edit line starts out holding `seed`.
    fn read_line(&mut self, seed: &str, listener: &mut dyn KeyListener)
    -> Result<String, ReadError>;

    /// Releases terminal resources. Further reads are not expected.
    fn close(&mut self) -> io::Result<()>;
}

/// Ways a read can end other than with a submitted line.
#[derive(Debug, Display)]
pub enum ReadError {
    #[display("interrupted")]
    Interrupted,
    #[display("end of input")]
    Eof,
    #[display("terminal I/O failed: {_0}")]
    Io(io::Error),
}

impl Error for ReadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Interrupted | Self::Eof => None,
        }
    }
}

impl From<io::Error> for ReadError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
