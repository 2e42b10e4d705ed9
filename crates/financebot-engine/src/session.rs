//! Conversation session for the chat widget.
//!
//! A session owns the message list, the draft the user is typing, and two
//! presentation flags. Submitting text appends the user's message at once
//! and queues the assistant's reply on an internal timer queue; the host
//! calls [`Session::deliver_due`] from its event loop to append replies
//! whose delay has elapsed.
//!
//! ```text
//!  submit("tax?")           deliver_due()  (after reply_delay)
//!  ──────────────►  [user]  ─────────────►  [user] [assistant]
//!  awaiting = true                          awaiting = false
//! ```

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info};

use crate::classify::{classify, QUICK_QUESTIONS};
use crate::clock::{Clock, SystemClock};
use crate::config::ChatConfig;
use crate::message::{Message, MessageId, Sender};

/// A reply waiting for its delay to elapse.
///
/// Ordered by due time, then by submission sequence, so replies that
/// become due together are appended in submission order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct PendingReply {
    due: Instant,
    seq: u64,
    text: &'static str,
}

/// Owned copy of the session's read-only surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub messages: Vec<Message>,
    pub draft: String,
    pub awaiting_reply: bool,
    pub panel_open: bool,
    pub pending_replies: usize,
}

/// In-memory state of one chat widget.
#[derive(Debug)]
pub struct Session {
    config: ChatConfig,
    clock: Arc<dyn Clock>,
    messages: Vec<Message>,
    next_id: MessageId,
    draft: String,
    awaiting_reply: bool,
    panel_open: bool,
    pending: BinaryHeap<Reverse<PendingReply>>,
    next_seq: u64,
}

impl Session {
    /// Create a session. The greeting is appended immediately.
    pub fn new(config: ChatConfig, clock: Arc<dyn Clock>) -> Self {
        let mut session = Self {
            config,
            clock,
            messages: Vec::new(),
            next_id: MessageId::FIRST,
            draft: String::new(),
            awaiting_reply: false,
            panel_open: false,
            pending: BinaryHeap::new(),
            next_seq: 0,
        };
        let greeting = session.config.greeting.clone();
        session.push(Sender::Assistant, greeting);
        info!(
            assistant = %session.config.assistant_name,
            reply_delay_ms = session.config.reply_delay_ms,
            "Chat session created"
        );
        session
    }

    /// Create a session with default configuration on real time.
    pub fn with_defaults() -> Self {
        Self::new(ChatConfig::default(), Arc::new(SystemClock))
    }

    /// Submit user text.
    ///
    /// Blank input (empty after trimming) is ignored and returns `false`.
    /// Otherwise the trimmed text is appended, the draft is cleared, and a
    /// reply is queued; further submissions do not wait for it.
    pub fn submit(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("Ignoring blank submission");
            return false;
        }

        let id = self.push(Sender::User, trimmed);
        self.draft.clear();
        self.awaiting_reply = true;

        let due = self.schedule_due();
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Reverse(PendingReply {
            due,
            seq,
            text: classify(text),
        }));

        debug!(
            message_id = %id,
            pending = self.pending.len(),
            "Accepted user message"
        );
        true
    }

    /// Append every reply whose delay has elapsed.
    ///
    /// Returns the messages appended by this call, oldest first.
    pub fn deliver_due(&mut self) -> &[Message] {
        let start = self.messages.len();
        let now = self.clock.instant();

        while let Some(Reverse(next)) = self.pending.peek() {
            if next.due > now {
                break;
            }
            let Some(Reverse(reply)) = self.pending.pop() else {
                break;
            };
            let id = self.push(Sender::Assistant, reply.text);
            self.awaiting_reply = false;
            debug!(
                message_id = %id,
                remaining = self.pending.len(),
                "Delivered assistant reply"
            );
        }

        &self.messages[start..]
    }

    /// Time until the earliest pending reply is due, if any.
    pub fn next_reply_in(&self) -> Option<Duration> {
        self.pending
            .peek()
            .map(|Reverse(next)| next.due.saturating_duration_since(self.clock.instant()))
    }

    /// Number of replies still waiting on their delay.
    pub fn pending_replies(&self) -> usize {
        self.pending.len()
    }

    /// Replace the draft. No validation.
    pub fn update_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Show or hide the chat panel.
    pub fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
        debug!(panel_open = self.panel_open, "Toggled chat panel");
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    pub fn panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Quick questions to offer; empty once the user has said anything.
    pub fn suggested_questions(&self) -> &'static [&'static str] {
        if self.messages.len() == 1 {
            let count = self.config.quick_question_count.min(QUICK_QUESTIONS.len());
            &QUICK_QUESTIONS[..count]
        } else {
            &[]
        }
    }

    /// Owned copy of everything a host renders.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            messages: self.messages.clone(),
            draft: self.draft.clone(),
            awaiting_reply: self.awaiting_reply,
            panel_open: self.panel_open,
            pending_replies: self.pending.len(),
        }
    }

    fn push(&mut self, sender: Sender, text: impl Into<String>) -> MessageId {
        let id = self.next_id;
        self.next_id = id.next();
        self.messages
            .push(Message::new(id, sender, text, self.clock.timestamp()));
        id
    }

    /// Due time for a reply submitted now.
    fn schedule_due(&self) -> Instant {
        let delay = self.config.reply_delay();
        let now = self.clock.instant();

        match self.config.max_in_flight {
            Some(limit) if self.pending.len() >= limit => {
                let last = self
                    .pending
                    .iter()
                    .map(|Reverse(p)| p.due)
                    .max()
                    .unwrap_or(now);
                debug!(limit, "Reply limit reached, queueing behind last reply");
                last.max(now) + delay
            }
            _ => now + delay,
        }
    }
}
