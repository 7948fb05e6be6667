//! Aggregates over the analytics event log

use super::types::AnalyticsEvent;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const TOP_ENTRIES: usize = 10;

/// Event names counted as failures seen by visitors
const ERROR_EVENT_PREFIXES: &[&str] = &[
    "rate_limit.",
    "content.blocked",
    "content_blocked.",
    "ai.error",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatStats {
    pub total_chats: usize,
    pub total_messages: usize,
    pub avg_rounds: u64,
    pub avg_duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagStats {
    pub tag_id: String,
    pub tag_label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteStats {
    pub quote: String,
    pub shares: usize,
    pub method: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorStats {
    pub total_errors: usize,
    pub errors_by_type: BTreeMap<String, usize>,
    /// Percentage of all events, two decimals
    pub error_rate: f64,
}

/// Body of `GET /api/analytics/stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsStats {
    pub chats: ChatStats,
    pub popular_tags: Vec<TagStats>,
    pub top_quotes: Vec<QuoteStats>,
    pub brand_triggers: usize,
    pub errors: ErrorStats,
    pub last_updated: i64,
}

impl AnalyticsStats {
    pub fn compute(events: &[AnalyticsEvent], now: i64) -> Self {
        Self {
            chats: chat_stats(events),
            popular_tags: popular_tags(events),
            top_quotes: top_quotes(events),
            brand_triggers: events
                .iter()
                .filter(|e| {
                    e.event == "keyword.triggered" && e.str_property("category") == Some("brand")
                })
                .count(),
            errors: error_stats(events),
            last_updated: now,
        }
    }
}

/// Length bucket a shared quote falls in
pub fn quote_range(length: f64) -> &'static str {
    if length < 30.0 {
        "短句 (<30字)"
    } else if length < 50.0 {
        "中句 (30-50字)"
    } else if length < 80.0 {
        "长句 (50-80字)"
    } else {
        "超长句 (>80字)"
    }
}

fn named<'a>(
    events: &'a [AnalyticsEvent],
    name: &'a str,
) -> impl Iterator<Item = &'a AnalyticsEvent> {
    events.iter().filter(move |e| e.event == name)
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn chat_stats(events: &[AnalyticsEvent]) -> ChatStats {
    let completed: Vec<_> = named(events, "chat.completed").collect();
    let (avg_rounds, avg_duration_ms) = if completed.is_empty() {
        (0, 0)
    } else {
        let n = completed.len() as f64;
        let rounds: f64 = completed.iter().map(|e| e.number_property("rounds")).sum();
        let duration: f64 = completed.iter().map(|e| e.number_property("duration_ms")).sum();
        (
            round_half_up(rounds / n).max(0.0) as u64,
            round_half_up(duration / n).max(0.0) as u64,
        )
    };

    ChatStats {
        total_chats: named(events, "chat.opened").count(),
        total_messages: named(events, "chat.message_sent").count(),
        avg_rounds,
        avg_duration_ms,
    }
}

/// Count `items` by key, keeping first-seen order among equal counts
fn count_in_order<K: PartialEq>(items: impl Iterator<Item = K>) -> Vec<(K, usize)> {
    let mut counts: Vec<(K, usize)> = Vec::new();
    for key in items {
        match counts.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, count)) => *count += 1,
            None => counts.push((key, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(TOP_ENTRIES);
    counts
}

fn popular_tags(events: &[AnalyticsEvent]) -> Vec<TagStats> {
    let labels = named(events, "tag.clicked").map(|e| {
        e.str_property("tag_label")
            .or_else(|| e.str_property("tag_id"))
            .unwrap_or("Unknown")
            .to_string()
    });

    count_in_order(labels)
        .into_iter()
        .map(|(tag_label, count)| TagStats {
            tag_id: tag_label
                .to_lowercase()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join("-"),
            tag_label,
            count,
        })
        .collect()
}

fn top_quotes(events: &[AnalyticsEvent]) -> Vec<QuoteStats> {
    let keys = named(events, "quote.shared").map(|e| {
        let range = quote_range(e.number_property("quote_length"));
        let method = e.str_property("method").unwrap_or("copy").to_string();
        (range, method)
    });

    count_in_order(keys)
        .into_iter()
        .map(|((_, method), shares)| QuoteStats {
            quote: format!("金句 ({})", method),
            shares,
            method,
        })
        .collect()
}

fn error_stats(events: &[AnalyticsEvent]) -> ErrorStats {
    let mut errors_by_type = BTreeMap::new();
    for event in events
        .iter()
        .filter(|e| ERROR_EVENT_PREFIXES.iter().any(|p| e.event.starts_with(p)))
    {
        *errors_by_type.entry(event.event.clone()).or_insert(0) += 1;
    }

    let total_errors: usize = errors_by_type.values().sum();
    let error_rate = if events.is_empty() {
        0.0
    } else {
        round_half_up(total_errors as f64 / events.len() as f64 * 100.0 * 100.0) / 100.0
    };

    ErrorStats {
        total_errors,
        errors_by_type,
        error_rate,
    }
}
