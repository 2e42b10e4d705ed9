//! Chat message model.
//!
//! Messages are immutable once built: a session only ever appends them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person typing into the widget.
    User,
    /// The canned-response assistant.
    Assistant,
}

impl Sender {
    /// Short label used in transcripts.
    pub fn label(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Session-scoped message identifier.
///
/// Ids come from a per-session sequence counter, so they are unique and
/// strictly increasing in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(u64);

impl MessageId {
    /// Id assigned to the greeting.
    pub const FIRST: MessageId = MessageId(1);

    /// Raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }

    /// The id following this one.
    #[must_use]
    pub(crate) fn next(self) -> MessageId {
        MessageId(self.0 + 1)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single entry in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    text: String,
    sender: Sender,
    timestamp: DateTime<Utc>,
}

impl Message {
    pub(crate) fn new(
        id: MessageId,
        sender: Sender,
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            sender,
            timestamp,
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Whether the user wrote this message.
    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    /// Time label shown next to the message, 24-hour `HH:MM`.
    pub fn format_time(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_time_is_24_hour() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 17, 5, 42).unwrap();
        let msg = Message::new(MessageId::FIRST, Sender::User, "hi", ts);
        assert_eq!(msg.format_time(), "17:05");
    }

    #[test]
    fn test_message_id_sequence() {
        let id = MessageId::FIRST;
        assert_eq!(id.get(), 1);
        assert_eq!(id.next().get(), 2);
        assert!(id.next() > id);
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        let json = serde_json::to_string(&Sender::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
        let parsed: Sender = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(parsed, Sender::User);
    }

    #[test]
    fn test_message_accessors() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let msg = Message::new(MessageId::FIRST, Sender::Assistant, "Hello", ts);
        assert_eq!(msg.text(), "Hello");
        assert_eq!(msg.sender(), Sender::Assistant);
        assert_eq!(msg.timestamp(), ts);
        assert!(!msg.is_user());
    }
}
