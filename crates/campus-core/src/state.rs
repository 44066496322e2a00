//! UI-agnostic conversation state types
//!
//! These are shared by every front end and don't depend on any UI framework.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique token identifying a single message
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(String);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// Clock style used for message time labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeFormat {
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
    #[serde(rename = "12h")]
    TwelveHour,
}

impl TimeFormat {
    fn pattern(self) -> &'static str {
        match self {
            TimeFormat::TwentyFourHour => "%H:%M",
            TimeFormat::TwelveHour => "%I:%M %p",
        }
    }
}

/// A single chat message. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    content: String,
    sender: Sender,
    timestamp: DateTime<Local>,
}

impl Message {
    pub fn new(sender: Sender, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            content: content.into(),
            sender,
            timestamp: Local::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Sender::User, content)
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(Sender::Bot, content)
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Hour:minute label shown under the message bubble
    pub fn time_label(&self, format: TimeFormat) -> String {
        self.timestamp.format(format.pattern()).to_string()
    }
}
