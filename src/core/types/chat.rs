//! Chat message types shared by the router, providers and the chat endpoint

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a chat message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// One turn of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new<S: Into<String>>(role: MessageRole, content: S) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system<S: Into<String>>(content: S) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn user<S: Into<String>>(content: S) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant<S: Into<String>>(content: S) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Current wall-clock time in epoch milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
