//! Content safety filtering
//!
//! Rejects sensitive or ad-like user input and redacts links before text reaches a provider.

mod filter;
mod patterns;
mod types;

pub use filter::{
    AD_BLOCK_MESSAGE, ContentSafetyFilter, DEFAULT_BLOCK_MESSAGE, SENSITIVE_BLOCK_MESSAGE,
    block_message,
};
pub use patterns::{AD_RULES, REDACTION_PLACEHOLDER, SENSITIVE_WORDS};
pub use types::{AdRule, SafetyReason, SafetyVerdict};
