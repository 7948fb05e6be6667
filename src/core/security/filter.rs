//! Content safety filter
//!
//! Pure, deterministic checks over user input: a sensitive-word denylist followed by the ad
//! rule table. The first rule that matches decides the reason.

use super::patterns::{AD_RULES, REDACTION_PLACEHOLDER, SENSITIVE_WORDS};
use super::types::{AdRule, SafetyReason, SafetyVerdict};
use tracing::debug;

/// Message for a sensitive-word block
pub const SENSITIVE_BLOCK_MESSAGE: &str = "抱歉，这个问题我无法回答。";
/// Message for an ad-content block
pub const AD_BLOCK_MESSAGE: &str = "请保持对话纯粹，避免广告引流。";
/// Message when no specific reason is available
pub const DEFAULT_BLOCK_MESSAGE: &str = "抱歉，这条消息无法通过安全检查。";

/// Rule-table driven safety filter
#[derive(Debug, Clone)]
pub struct ContentSafetyFilter {
    sensitive_words: Vec<String>,
    ad_rules: Vec<AdRule>,
}

impl Default for ContentSafetyFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentSafetyFilter {
    /// Filter with the built-in rule tables
    pub fn new() -> Self {
        Self {
            sensitive_words: SENSITIVE_WORDS.iter().map(|w| w.to_string()).collect(),
            ad_rules: AD_RULES.clone(),
        }
    }

    /// Filter with caller supplied tables
    pub fn with_rules(sensitive_words: Vec<String>, ad_rules: Vec<AdRule>) -> Self {
        Self {
            sensitive_words,
            ad_rules,
        }
    }

    /// Check text against the sensitive list, then the ad table
    pub fn check_safety(&self, text: &str) -> SafetyVerdict {
        if let Some(word) = self
            .sensitive_words
            .iter()
            .find(|word| text.contains(word.as_str()))
        {
            debug!("Safety check matched sensitive word {:?}", word);
            return SafetyVerdict::blocked(SafetyReason::SensitiveWord);
        }

        if let Some(rule) = self.ad_rules.iter().find(|rule| rule.pattern.is_match(text)) {
            debug!("Safety check matched ad rule {}", rule.name);
            return SafetyVerdict::blocked(SafetyReason::AdContent);
        }

        SafetyVerdict::safe()
    }

    /// Redact every ad match; does not re-run the safety check
    pub fn sanitize(&self, text: &str) -> String {
        self.ad_rules.iter().fold(text.to_string(), |acc, rule| {
            rule.pattern
                .replace_all(&acc, REDACTION_PLACEHOLDER)
                .into_owned()
        })
    }
}

/// User-facing message for a block reason
pub fn block_message(reason: Option<SafetyReason>) -> &'static str {
    match reason {
        Some(SafetyReason::SensitiveWord) => SENSITIVE_BLOCK_MESSAGE,
        Some(SafetyReason::AdContent) => AD_BLOCK_MESSAGE,
        None => DEFAULT_BLOCK_MESSAGE,
    }
}
