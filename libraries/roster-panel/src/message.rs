//! Transient user-facing messages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

/// Default time a message stays on screen.
pub const DEFAULT_MESSAGE_TTL: Duration = Duration::from_secs(4);

/// Visual weight of a message; maps to the `alert-*` class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiMessage {
    pub id: MessageId,
    pub text: String,
    pub severity: Severity,
    pub expires_at: Instant,
}

/// Ordered set of live messages, each with its own deadline.
///
/// Deadlines use `tokio::time::Instant`, so a paused test clock controls
/// expiry.
#[derive(Debug)]
pub struct MessageBoard {
    ttl: Duration,
    next_id: u64,
    messages: Vec<UiMessage>,
}

impl Default for MessageBoard {
    fn default() -> Self {
        Self::new(DEFAULT_MESSAGE_TTL)
    }
}

impl MessageBoard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            next_id: 1,
            messages: Vec::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn push(&mut self, severity: Severity, text: impl Into<String>) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.messages.push(UiMessage {
            id,
            text: text.into(),
            severity,
            expires_at: Instant::now() + self.ttl,
        });
        id
    }

    /// Remove a message before it expires. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: MessageId) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| m.id != id);
        self.messages.len() != before
    }

    /// Drop every message whose deadline has passed.
    pub fn prune(&mut self) -> usize {
        let now = Instant::now();
        let before = self.messages.len();
        self.messages.retain(|m| m.expires_at > now);
        before - self.messages.len()
    }

    /// Messages that have not yet expired, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &UiMessage> {
        let now = Instant::now();
        self.messages.iter().filter(move |m| m.expires_at > now)
    }

    /// Earliest pending deadline, for drivers that sleep until the next prune.
    pub fn next_expiry(&self) -> Option<Instant> {
        self.messages.iter().map(|m| m.expires_at).min()
    }

    /// Remove every message, returning the ones that had not yet expired.
    pub fn drain(&mut self) -> Vec<UiMessage> {
        let now = Instant::now();
        let mut live = std::mem::take(&mut self.messages);
        live.retain(|m| m.expires_at > now);
        live
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
