//! `financebot-engine`: headless conversation engine for the chat widget
//!
//! This crate provides the logic behind the chat widget, including:
//! - The message model and session state
//! - Keyword classification into canned replies
//! - Delayed reply delivery on an injectable clock
//! - Widget configuration

pub mod classify;
pub mod clock;
pub mod config;
pub mod message;
pub mod session;

// Re-export commonly used types
pub use classify::{classify, Topic, GREETING, QUICK_QUESTIONS};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ChatConfig, ConfigError};
pub use message::{Message, MessageId, Sender};
pub use session::{Session, SessionSnapshot};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_version() {
        let version = engine_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}
