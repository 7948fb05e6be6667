//! Safety rule tables
//!
//! The sensitive list is matched as plain, case-sensitive substrings. Some entries keep a
//! leading space on purpose so that e.g. "Trumpet" inside a word is not caught.

use super::types::AdRule;
use once_cell::sync::Lazy;
use regex::Regex;

/// Case-sensitive substring denylist
pub const SENSITIVE_WORDS: &[&str] = &[
    "习近平",
    " Trump",
    " Biden",
    "总统",
    "主席",
    "杀",
    "死",
    "爆炸",
    "恐怖",
    "色情",
    "淫秽",
];

/// Replacement for every ad match in sanitized text
pub const REDACTION_PLACEHOLDER: &str = "[链接已屏蔽]";

const AD_RULE_SOURCES: &[(&str, &str)] = &[
    ("wechat", r"(?i)微信"),
    ("vx", r"(?i)vx"),
    ("v_xin", r"(?i)v信"),
    ("add_me", r"(?i)加我"),
    ("scan_code", r"(?i)扫码"),
    ("qr_code", r"(?i)二维码"),
    ("link_word", r"(?i)链接"),
    ("url", r"(?i)https?://"),
];

/// Compiled ad rule table, in match priority order
pub static AD_RULES: Lazy<Vec<AdRule>> = Lazy::new(|| {
    AD_RULE_SOURCES
        .iter()
        .filter_map(|(name, source)| match Regex::new(source) {
            Ok(pattern) => Some(AdRule { name, pattern }),
            Err(e) => {
                tracing::error!("Failed to compile ad rule {}: {}", name, e);
                None
            }
        })
        .collect()
});
