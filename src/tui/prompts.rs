//! One-call helpers for the common prompt shapes.

use super::components::{PromptResult, SelectList, SelectResult, TextPrompt, TextResult};

/// Asks for a line of text on the controlling terminal.
///
/// # Arguments
///
/// * `label` - The prompt label
/// * `default` - Optional initial, editable value
/// * `validator` - Optional predicate the value must satisfy
///
/// # Returns
///
/// - `Ok(Some(text))` - User entered an accepted value
/// - `Ok(None)` - User cancelled
/// - `Err(_)` - Terminal error
///
/// # Example
///
/// ```ignore
/// let name = text_prompt("Your name", None, Some(|s: &str| !s.is_empty()))?;
/// ```
pub fn text_prompt<V>(
    label: &str,
    default: Option<&str>,
    validator: Option<V>,
) -> PromptResult<String>
where
    V: Fn(&str) -> bool,
{
    let mut prompt = TextPrompt::new(label).with_default(default.unwrap_or_default());

    let result = match validator {
        Some(v) => prompt.with_validator(v).run()?,
        None => prompt.run()?,
    };
    Ok(accepted_text(result))
}

/// Lets the user pick one of `options` on the controlling terminal.
///
/// # Returns
///
/// - `Ok(Some(index))` - Index of the selected option
/// - `Ok(None)` - User cancelled
/// - `Err(_)` - Terminal error, or `options` is empty
pub fn select_prompt<I, S>(label: &str, options: I) -> PromptResult<usize>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let result = SelectList::new(label, options).run()?;
    Ok(selected_index(&result))
}

fn accepted_text(result: TextResult) -> Option<String> {
    (!result.cancelled).then_some(result.value)
}

fn selected_index(result: &SelectResult) -> Option<usize> {
    (!result.cancelled).then_some(result.selected_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_text_maps_to_none() {
        let result = TextResult {
            value: "partial".into(),
            cancelled: true,
        };
        assert_eq!(accepted_text(result), None);
    }

    #[test]
    fn test_accepted_text_is_returned() {
        let result = TextResult {
            value: "done".into(),
            cancelled: false,
        };
        assert_eq!(accepted_text(result).as_deref(), Some("done"));
    }

    #[test]
    fn test_selection_maps_to_index() {
        let picked = SelectResult {
            selected_index: 2,
            selected_value: "c".into(),
            cancelled: false,
        };
        assert_eq!(selected_index(&picked), Some(2));

        let cancelled = SelectResult {
            cancelled: true,
            ..SelectResult::default()
        };
        assert_eq!(selected_index(&cancelled), None);
    }
}
