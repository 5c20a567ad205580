//! Inline terminal prompts built on a small line-reading engine.
//!
//! - `TextPrompt` - Text input with validation feedback
//! - `SelectList` - Single selection from a list, redrawn in place
//! - `BellSuppressor` - Output filter that drops lone terminal bells

pub mod components;
pub mod engine;
mod prompts;
pub(crate) mod raw_mode;
pub mod style;

#[cfg(test)]
mod test_support;

pub use components::{
    BellSuppressor, PromptResult, SelectList, SelectResult, Status, TextPrompt, TextResult,
};
pub use prompts::{select_prompt, text_prompt};
