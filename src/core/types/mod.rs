//! Core type definitions

pub mod chat;

pub use chat::{ChatMessage, MessageRole, now_millis};
