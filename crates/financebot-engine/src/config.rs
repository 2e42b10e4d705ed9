//! Configuration for the chat widget.
//!
//! Every field has a default, so an empty JSON object is a valid config.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::classify::GREETING;

/// Main configuration for a chat session and its host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Name shown in the panel header.
    #[serde(default = "default_assistant_name")]
    pub assistant_name: String,

    /// Subtitle shown under the assistant name.
    #[serde(default = "default_assistant_tagline")]
    pub assistant_tagline: String,

    /// Text of the opening assistant message. May be empty.
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Delay before a reply is appended, in milliseconds.
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,

    /// How many quick questions to offer before the first message.
    #[serde(default = "default_quick_question_count")]
    pub quick_question_count: usize,

    /// Cap on overlapping replies. `None` lets every reply run on its own
    /// timer; with a cap, replies past it are queued behind the last one.
    #[serde(default)]
    pub max_in_flight: Option<usize>,

    /// Terminal event loop tick, in milliseconds.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_assistant_name() -> String {
    "FinanceBot".into()
}

fn default_assistant_tagline() -> String {
    "AI Financial Assistant".into()
}

fn default_greeting() -> String {
    GREETING.into()
}

fn default_reply_delay_ms() -> u64 {
    1500
}

fn default_quick_question_count() -> usize {
    2
}

fn default_tick_rate_ms() -> u64 {
    100
}

impl ChatConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Load configuration from a file, falling back to defaults if it does
    /// not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            assistant_name: default_assistant_name(),
            assistant_tagline: default_assistant_tagline(),
            greeting: default_greeting(),
            reply_delay_ms: default_reply_delay_ms(),
            quick_question_count: default_quick_question_count(),
            max_in_flight: None,
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChatConfig::default();
        assert_eq!(config.assistant_name, "FinanceBot");
        assert_eq!(config.reply_delay(), Duration::from_millis(1500));
        assert_eq!(config.quick_question_count, 2);
        assert_eq!(config.max_in_flight, None);
        assert_eq!(config.greeting, GREETING);
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let parsed: ChatConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, ChatConfig::default());
    }

    #[test]
    fn test_partial_config_overrides() {
        let parsed: ChatConfig =
            serde_json::from_str(r#"{"reply_delay_ms": 10, "max_in_flight": 3}"#).unwrap();
        assert_eq!(parsed.reply_delay_ms, 10);
        assert_eq!(parsed.max_in_flight, Some(3));
        assert_eq!(parsed.assistant_name, "FinanceBot");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = ChatConfig {
            assistant_name: "LedgerBot".into(),
            greeting: String::new(),
            ..ChatConfig::default()
        };
        config.save(&path).unwrap();

        let loaded = ChatConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ChatConfig::load_or_default(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, ChatConfig::default());
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            ChatConfig::load(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
