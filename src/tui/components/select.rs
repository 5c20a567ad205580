//! Single selection list redrawn in place.

use std::{
    io,
    ops::{Deref, DerefMut},
};

use anyhow::{Context, Result, bail};
use crossterm::{
    QueueableCommand,
    cursor::{Hide, MoveUp, Show},
    terminal::{Clear, ClearType},
};
use log::{debug, info, warn};

use super::bell::BellSuppressor;
use crate::tui::{
    engine::{
        Console, EngineConfig, Key, KeyListener, LineEngine, ListenerReply, ReadError,
        TerminalEngine, TerminalKeys,
    },
    style::{Attribute, GLYPH_CHECK, GLYPH_SELECTION, GLYPH_UP_DOWN, style},
};

/// Outcome of a [`SelectList`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectResult {
    /// Index into the options of the confirmed item. Zero when cancelled.
    pub selected_index: usize,
    /// Text of the confirmed item. Empty when cancelled.
    pub selected_value: String,
    /// Set when the user interrupted the list or closed the input.
    pub cancelled: bool,
}

impl SelectResult {
    fn cancelled() -> Self {
        Self {
            cancelled: true,
            ..Self::default()
        }
    }
}

/// Hides the terminal cursor until dropped.
struct HiddenCursor<'e, E: ?Sized + LineEngine> {
    engine: &'e mut E,
}

impl<'e, E: ?Sized + LineEngine> HiddenCursor<'e, E> {
    fn new(engine: &'e mut E) -> io::Result<Self> {
        engine.output().queue(Hide)?.flush()?;
        Ok(Self { engine })
    }
}

impl<E: ?Sized + LineEngine> Deref for HiddenCursor<'_, E> {
    type Target = E;

    fn deref(&self) -> &E {
        self.engine
    }
}

impl<E: ?Sized + LineEngine> DerefMut for HiddenCursor<'_, E> {
    fn deref_mut(&mut self) -> &mut E {
        self.engine
    }
}

impl<E: ?Sized + LineEngine> Drop for HiddenCursor<'_, E> {
    fn drop(&mut self) {
        let out = self.engine.output();
        if let Err(e) = out.queue(Show).and_then(|out| out.flush()) {
            warn!("unable to restore cursor: {e}");
        }
    }
}

/// Lets the user pick one item from a list with the arrow keys.
///
/// The list is drawn below the label and repainted in place on every move;
/// once confirmed it collapses into a single summary line.
pub struct SelectList<'a> {
    label: &'a str,
    description: Option<&'a str>,
    options: Vec<String>,
    starting_index: usize,
    config: EngineConfig,
    current_index: usize,
    rendered: bool,
    done: bool,
    redraw_error: Option<io::Error>,
}

impl<'a> SelectList<'a> {
    /// Creates a new list with the given label and options.
    #[must_use]
    pub fn new<I, S>(label: &'a str, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label,
            description: None,
            options: options.into_iter().map(Into::into).collect(),
            starting_index: 0,
            config: EngineConfig::default(),
            current_index: 0,
            rendered: false,
            done: false,
            redraw_error: None,
        }
    }

    /// Sets a line of context printed once above the list.
    #[must_use]
    pub fn with_description(mut self, description: &'a str) -> Self {
        self.description = Some(description);
        self
    }

    /// Sets the initially highlighted option. Out of range values pick the last one.
    #[must_use]
    pub fn with_starting_index(mut self, index: usize) -> Self {
        self.starting_index = index;
        self
    }

    #[must_use]
    pub fn with_engine_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn engine_config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Runs the list on the controlling terminal.
    ///
    /// Both output streams go through a [`BellSuppressor`], since the
    /// frequent repaints would otherwise let stray bells through.
    pub fn run(&mut self) -> Result<SelectResult> {
        if self.options.is_empty() {
            bail!("Nothing to select: the option list is empty");
        }

        let keys = TerminalKeys::new().context("Unable to open the terminal")?;
        let mut engine = TerminalEngine::new(
            self.config.clone(),
            keys,
            BellSuppressor::new(io::stdout()),
            BellSuppressor::new(io::stderr()),
        )
        .context("Unable to set up the line editor")?;

        let result = self.run_with(&mut engine);
        let closed = engine.close().context("Unable to release the terminal");

        let result = result?;
        closed?;
        Ok(result)
    }

    /// Runs the list on an already set up engine.
    pub fn run_with<E>(&mut self, engine: &mut E) -> Result<SelectResult>
    where
        E: LineEngine + ?Sized,
    {
        let Some(last) = self.options.len().checked_sub(1) else {
            bail!("Nothing to select: the option list is empty");
        };
        self.current_index = self.starting_index.min(last);
        self.rendered = false;
        self.done = false;
        self.redraw_error = None;

        if let Some(description) = self.description {
            writeln!(engine.output(), "{description}")?;
        }
        writeln!(
            engine.output(),
            "{} [Use {GLYPH_UP_DOWN} to select, enter to confirm]",
            self.label
        )?;

        let mut screen = HiddenCursor::new(engine).context("Unable to hide the cursor")?;

        while !self.done {
            match screen.read_line("", self) {
                Ok(_) => {}
                Err(ReadError::Interrupted | ReadError::Eof) => {
                    info!("select '{}' cancelled", self.label);
                    self.erase(&mut *screen)?;
                    return Ok(SelectResult::cancelled());
                }
                Err(e @ ReadError::Io(_)) => {
                    return Err(e).context("Unable to read from the terminal");
                }
            }
            if let Some(e) = self.redraw_error.take() {
                return Err(e).context("Unable to redraw the options");
            }
        }

        self.clean_and_commit(&mut *screen)
            .context("Unable to print the selection")?;

        let selected_value = self
            .options
            .get(self.current_index)
            .cloned()
            .unwrap_or_default();
        debug!(
            "select '{}' confirmed #{}: {selected_value}",
            self.label, self.current_index
        );

        Ok(SelectResult {
            selected_index: self.current_index,
            selected_value,
            cancelled: false,
        })
    }

    fn select_next(&mut self) {
        let next = self.current_index.saturating_add(1);
        self.current_index = if next >= self.options.len() { 0 } else { next };
    }

    fn select_prev(&mut self) {
        self.current_index = self
            .current_index
            .checked_sub(1)
            .unwrap_or_else(|| self.options.len().saturating_sub(1));
    }

    /// Paints every option, first moving back over the previous paint.
    fn render(&mut self, console: &mut dyn Console) -> io::Result<()> {
        let out = console.output();

        if self.rendered {
            for _ in 0..self.options.len() {
                out.queue(MoveUp(1))?;
            }
        }

        for (idx, option) in self.options.iter().enumerate() {
            if idx == self.current_index {
                writeln!(
                    out,
                    "  {} {}",
                    style(Attribute::Cyan, GLYPH_SELECTION),
                    style(Attribute::Cyan, option)
                )?;
            } else {
                writeln!(out, "    {option}")?;
            }
        }

        out.flush()?;
        self.rendered = true;
        Ok(())
    }

    /// Clears the label line and every option line.
    fn erase<C>(&self, console: &mut C) -> io::Result<()>
    where
        C: Console + ?Sized,
    {
        let out = console.output();
        for _ in 0..=self.options.len() {
            out.queue(MoveUp(1))?.queue(Clear(ClearType::CurrentLine))?;
        }
        out.flush()
    }

    /// Replaces the list with a one-line summary of the choice.
    fn clean_and_commit<C>(&self, console: &mut C) -> io::Result<()>
    where
        C: Console + ?Sized,
    {
        self.erase(console)?;

        let colon = if self.label.ends_with('?') { "" } else { ":" };
        let choice = self
            .options
            .get(self.current_index)
            .map_or("", String::as_str);

        let out = console.output();
        writeln!(
            out,
            "{} {}{colon} {choice}",
            style(Attribute::Green, GLYPH_CHECK),
            self.label
        )?;
        out.flush()
    }
}

impl KeyListener for SelectList<'_> {
    fn on_key(
        &mut self,
        console: &mut dyn Console,
        _line: Option<&str>,
        pos: usize,
        key: Key,
    ) -> ListenerReply {
        match key {
            Key::Next => self.select_next(),
            Key::Prev => self.select_prev(),
            Key::Enter => {
                self.done = true;
                return ListenerReply::swallow(pos);
            }
            Key::Start => {}
            _ => return ListenerReply::swallow(pos),
        }

        if let Err(e) = self.render(console) {
            self.redraw_error = Some(e);
        }
        ListenerReply::swallow(pos)
    }

    fn is_done(&self) -> bool {
        self.done || self.redraw_error.is_some()
    }
}

#[cfg(test)]
#[path = "select_tests.rs"]
mod tests;
