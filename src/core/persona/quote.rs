//! Quote extraction from persona replies
//!
//! Picks the most quotable sentence of a reply for the share card. Offsets are in characters,
//! not bytes.

use serde::Serialize;

const MIN_MESSAGE_CHARS: usize = 20;
const MIN_SENTENCE_CHARS: usize = 10;
const FALLBACK_CHARS: usize = 100;
const KEYWORD_BONUS: usize = 20;

const SENTENCE_DELIMITERS: &[char] = &['。', '！', '？', '.', '!', '?'];
const QUOTE_KEYWORDS: &[&str] = &[
    "简单",
    "极致",
    "专注",
    "不",
    "艺术",
    "Simplicity",
    "Focus",
    "Great",
    "Art",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub text: String,
    pub start_index: usize,
    pub end_index: usize,
}

fn score(sentence: &str) -> usize {
    let bonus = QUOTE_KEYWORDS
        .iter()
        .filter(|keyword| sentence.contains(*keyword))
        .count()
        * KEYWORD_BONUS;
    sentence.chars().count() + bonus
}

/// Best sentence of `message`, or `None` for short messages
///
/// Sentences are split on Chinese and ASCII terminators and must be longer than ten
/// characters once trimmed. Each scores its length plus a bonus per keyword it contains; the
/// first best-scoring sentence wins and is located at its first occurrence. Without any such
/// sentence the first hundred characters are returned.
pub fn extract_quote(message: &str) -> Option<Quote> {
    let total_chars = message.chars().count();
    if total_chars < MIN_MESSAGE_CHARS {
        return None;
    }

    let mut best: Option<(usize, &str)> = None;
    for sentence in message.split(SENTENCE_DELIMITERS) {
        if sentence.trim().chars().count() <= MIN_SENTENCE_CHARS {
            continue;
        }
        let sentence_score = score(sentence);
        if best.is_none_or(|(best_score, _)| sentence_score > best_score) {
            best = Some((sentence_score, sentence));
        }
    }

    match best {
        Some((_, sentence)) => {
            let start = message
                .find(sentence)
                .map_or(0, |byte_index| message[..byte_index].chars().count());
            Some(Quote {
                text: sentence.trim().to_string(),
                start_index: start,
                end_index: start + sentence.chars().count(),
            })
        }
        None => Some(Quote {
            text: message.chars().take(FALLBACK_CHARS).collect(),
            start_index: 0,
            end_index: total_chars.min(FALLBACK_CHARS),
        }),
    }
}
