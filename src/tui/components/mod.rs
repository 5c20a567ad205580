//! Reusable prompt widgets.

mod bell;
mod select;
mod text_prompt;

pub use bell::BellSuppressor;
pub use select::{SelectList, SelectResult};
pub use text_prompt::{Status, TextPrompt, TextResult};

use anyhow::Result;

/// Result type for prompt operations.
///
/// - `Ok(Some(value))` - User submitted a value
/// - `Ok(None)` - User cancelled (Ctrl+C or end of input)
/// - `Err(_)` - An error occurred
pub type PromptResult<T> = Result<Option<T>>;
