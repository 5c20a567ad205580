//! Glyphs, colours and raw control codes used by the prompt widgets.

use colored::Colorize;

/// Terminal bell.
pub const BELL: u8 = 0x07;

pub const GLYPH_PROMPT: &str = "?";
pub const GLYPH_CHECK: &str = "✔";
pub const GLYPH_ERROR: &str = "✖";
pub const GLYPH_SELECTION: &str = "❯";
pub const GLYPH_UP_DOWN: &str = "↑/↓";

/// Text attributes understood by [`style`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    /// No styling at all.
    Reset,
    Faint,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

/// Wraps `text` in the escape codes for `attr`.
///
/// Honours the global colour switch in `colored::control`, so disabling
/// colours yields the bare text.
#[must_use]
pub fn style(attr: Attribute, text: &str) -> String {
    match attr {
        Attribute::Reset => text.to_string(),
        Attribute::Faint => text.dimmed().to_string(),
        Attribute::Red => text.red().to_string(),
        Attribute::Green => text.green().to_string(),
        Attribute::Yellow => text.yellow().to_string(),
        Attribute::Blue => text.blue().to_string(),
        Attribute::Magenta => text.magenta().to_string(),
        Attribute::Cyan => text.cyan().to_string(),
    }
}

/// Turns ANSI styling on or off for the whole process.
pub fn set_color_enabled(enabled: bool) {
    colored::control::set_override(enabled);
}
