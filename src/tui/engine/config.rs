use bon::Builder;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// How many submitted lines the engine remembers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum HistoryLimit {
    #[display("disabled")]
    Disabled,
    #[default]
    #[display("unbounded")]
    Unbounded,
    #[display("{_0}")]
    Max(usize),
}

impl HistoryLimit {
    /// Maximum number of retained entries, `None` when unbounded.
    #[must_use]
    pub fn cap(self) -> Option<usize> {
        match self {
            Self::Disabled => Some(0),
            Self::Unbounded => None,
            Self::Max(max) => Some(max),
        }
    }

    #[must_use]
    pub fn is_enabled(self) -> bool {
        !matches!(self, Self::Disabled | Self::Max(0))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    #[default]
    #[display("emacs")]
    Emacs,
    #[display("vi")]
    Vi,
}

/// Engine settings. Streams are handed to the engine separately.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct EngineConfig {
    /// Draw the buffer as `*` characters.
    #[builder(default)]
    pub mask: bool,
    #[builder(default)]
    pub history: HistoryLimit,
    #[builder(default)]
    pub edit_mode: EditMode,
    /// Erase the edit line in place when a read ends instead of moving to a new line.
    #[builder(default = true)]
    pub unique_edit_line: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(!config.mask);
        assert_eq!(config.history, HistoryLimit::Unbounded);
        assert_eq!(config.edit_mode, EditMode::Emacs);
        assert!(config.unique_edit_line);
    }

    #[test]
    fn test_builder_overrides() {
        let config = EngineConfig::builder()
            .mask(true)
            .history(HistoryLimit::Max(2))
            .unique_edit_line(false)
            .build();
        assert!(config.mask);
        assert_eq!(config.history, HistoryLimit::Max(2));
        assert!(!config.unique_edit_line);
    }

    #[test]
    fn test_history_limit_cap() {
        assert_eq!(HistoryLimit::Disabled.cap(), Some(0));
        assert_eq!(HistoryLimit::Unbounded.cap(), None);
        assert_eq!(HistoryLimit::Max(2).cap(), Some(2));
        assert!(!HistoryLimit::Max(0).is_enabled());
        assert!(HistoryLimit::Unbounded.is_enabled());
    }

    #[test]
    fn test_history_limit_serialization() {
        let json = serde_json::to_string(&HistoryLimit::Max(5)).unwrap();
        assert_eq!(json, r#"{"max":5}"#);
        let parsed: HistoryLimit = serde_json::from_str(r#""unbounded""#).unwrap();
        assert_eq!(parsed, HistoryLimit::Unbounded);
    }
}
