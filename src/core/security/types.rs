//! Safety filter type definitions

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a piece of input was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyReason {
    /// Matched the sensitive-word denylist
    SensitiveWord,
    /// Matched a contact-solicitation or link pattern
    AdContent,
}

impl fmt::Display for SafetyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SafetyReason::SensitiveWord => write!(f, "sensitive_word"),
            SafetyReason::AdContent => write!(f, "ad_content"),
        }
    }
}

/// Outcome of a safety check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SafetyVerdict {
    pub safe: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<SafetyReason>,
}

impl SafetyVerdict {
    pub fn safe() -> Self {
        Self {
            safe: true,
            reason: None,
        }
    }

    pub fn blocked(reason: SafetyReason) -> Self {
        Self {
            safe: false,
            reason: Some(reason),
        }
    }
}

/// One entry of the ad rule table
#[derive(Debug, Clone)]
pub struct AdRule {
    /// Short label used in logs
    pub name: &'static str,
    /// Case-insensitive matcher
    pub pattern: Regex,
}
