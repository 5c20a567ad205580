//! Single-line text prompt with validation feedback.

use anyhow::{Context, Result};
use log::{debug, info};

use crate::tui::{
    engine::{
        Console, EngineConfig, Key, KeyListener, LineEngine, ListenerReply, ReadError,
        TerminalEngine,
    },
    style::{Attribute, GLYPH_CHECK, GLYPH_ERROR, GLYPH_PROMPT, style},
};

/// Validation state shown in front of the label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Neutral,
    Accepted,
    Rejected,
}

impl Status {
    fn decoration(self) -> (&'static str, Attribute) {
        match self {
            Self::Neutral => (GLYPH_PROMPT, Attribute::Reset),
            Self::Accepted => (GLYPH_CHECK, Attribute::Green),
            Self::Rejected => (GLYPH_ERROR, Attribute::Magenta),
        }
    }
}

/// Outcome of a [`TextPrompt`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextResult {
    /// Text entered by the user.
    pub value: String,
    /// Set when the user interrupted the prompt or closed the input.
    pub cancelled: bool,
}

/// Asks for a single line of text.
///
/// With a validator set, Enter on an invalid value flips the prompt glyph to
/// an error mark and keeps the prompt open until a valid value is entered or
/// the user gives up.
pub struct TextPrompt<'a, V = fn(&str) -> bool>
where
    V: Fn(&str) -> bool,
{
    label: &'a str,
    description: Option<&'a str>,
    default_value: &'a str,
    validator: Option<V>,
    config: EngineConfig,
    value: String,
    status: Status,
}

impl<'a> TextPrompt<'a> {
    /// Creates a new prompt with the given label.
    #[must_use]
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            description: None,
            default_value: "",
            validator: None,
            config: EngineConfig::default(),
            value: String::new(),
            status: Status::Neutral,
        }
    }
}

impl<'a, V> TextPrompt<'a, V>
where
    V: Fn(&str) -> bool,
{
    /// Sets a line of context printed once above the prompt.
    #[must_use]
    pub fn with_description(mut self, description: &'a str) -> Self {
        self.description = Some(description);
        self
    }

    /// Sets the initial, editable value.
    #[must_use]
    pub fn with_default(mut self, value: &'a str) -> Self {
        self.default_value = value;
        self
    }

    /// Sets the predicate a value must satisfy before it is accepted.
    #[must_use]
    pub fn with_validator<NewV>(self, validator: NewV) -> TextPrompt<'a, NewV>
    where
        NewV: Fn(&str) -> bool,
    {
        TextPrompt {
            label: self.label,
            description: self.description,
            default_value: self.default_value,
            validator: Some(validator),
            config: self.config,
            value: self.value,
            status: self.status,
        }
    }

    #[must_use]
    pub fn with_engine_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Runs the prompt on the controlling terminal.
    ///
    /// # Returns
    ///
    /// - `Ok(result)` - the accepted value, or a cancellation
    /// - `Err(_)` - the terminal could not be set up or read
    pub fn run(&mut self) -> Result<TextResult> {
        let mut engine =
            TerminalEngine::stdio(self.config.clone()).context("Unable to open the terminal")?;

        let result = self.run_with(&mut engine);
        let closed = engine.close().context("Unable to release the terminal");

        let result = result?;
        closed?;
        Ok(result)
    }

    /// Runs the prompt on an already set up engine.
    pub fn run_with<E>(&mut self, engine: &mut E) -> Result<TextResult>
    where
        E: LineEngine + ?Sized,
    {
        if let Some(description) = self.description {
            writeln!(engine.output(), "{description}")?;
        }

        self.value = self.default_value.to_string();
        self.set_status(engine, Status::Neutral);

        loop {
            let seed = self.value.clone();
            let line = match engine.read_line(&seed, self) {
                Ok(line) => line,
                Err(ReadError::Interrupted) => {
                    info!("prompt '{}' interrupted", self.label);
                    return Ok(TextResult {
                        value: String::new(),
                        cancelled: true,
                    });
                }
                Err(ReadError::Eof) => {
                    info!("prompt '{}' reached end of input", self.label);
                    return Ok(TextResult {
                        value: self.value.clone(),
                        cancelled: true,
                    });
                }
                Err(e @ ReadError::Io(_)) => {
                    return Err(e).context("Unable to read from the terminal");
                }
            };

            self.value.clone_from(&line);
            if let Some(validator) = &self.validator
                && !validator(&line)
            {
                debug!("prompt '{}' rejected input", self.label);
                self.set_status(engine, Status::Rejected);
                continue;
            }

            self.set_status(engine, Status::Accepted);
            self.echo_accepted(engine, &line)?;

            return Ok(TextResult {
                value: line,
                cancelled: false,
            });
        }
    }

    /// Leaves the accepted line in scrollback, masked like the edit line was.
    fn echo_accepted<E>(&self, engine: &mut E, line: &str) -> Result<()>
    where
        E: LineEngine + ?Sized,
    {
        let config = engine.config();
        // The engine already left its own copy of the line behind
        if !config.unique_edit_line {
            return Ok(());
        }

        let shown = if config.mask {
            "*".repeat(line.chars().count())
        } else {
            line.to_string()
        };
        let prompt = self.prompt_string();
        writeln!(engine.output(), "{prompt}{shown}")?;
        engine.output().flush()?;
        Ok(())
    }

    fn prompt_string(&self) -> String {
        let (glyph, attr) = self.status.decoration();
        format!("{} {}: ", style(attr, glyph), self.label)
    }

    fn set_status<C>(&mut self, console: &mut C, status: Status)
    where
        C: Console + ?Sized,
    {
        self.status = status;
        console.set_prompt(&self.prompt_string());
    }
}

fn is_noise(key: Key) -> bool {
    matches!(key, Key::Esc | Key::MetaBackspace)
}

impl<V> KeyListener for TextPrompt<'_, V>
where
    V: Fn(&str) -> bool,
{
    fn on_key(
        &mut self,
        console: &mut dyn Console,
        line: Option<&str>,
        pos: usize,
        key: Key,
    ) -> ListenerReply {
        if is_noise(key) {
            return ListenerReply::swallow(pos);
        }

        if let Some(line) = line {
            line.clone_into(&mut self.value);
        }

        if key == Key::Enter {
            let status = match &self.validator {
                Some(validator) if !validator(&self.value) => Status::Rejected,
                _ => Status::Accepted,
            };
            self.set_status(console, status);
        }

        ListenerReply::pass(pos)
    }
}

#[cfg(test)]
#[path = "text_prompt_tests.rs"]
mod tests;
