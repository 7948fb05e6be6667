//! Analytics records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Events older than this are dropped on the next write
pub const EVENT_RETENTION_MS: i64 = 90 * 24 * 60 * 60 * 1000;

/// Only the newest events up to this count are kept
pub const MAX_STORED_EVENTS: usize = 10_000;

/// One tracked front-end event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub event: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
    /// Epoch milliseconds at which the server received the event
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub session_id: String,
}

impl AnalyticsEvent {
    /// String property, treating empty strings as absent
    pub fn str_property(&self, key: &str) -> Option<&str> {
        self.properties
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Numeric property, zero when absent or not a number
    pub fn number_property(&self, key: &str) -> f64 {
        self.properties
            .get(key)
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }
}

/// Running totals stored next to the events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTotals {
    pub total_events: usize,
    pub last_updated: i64,
}

/// On-disk layout of `analytics.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsLog {
    #[serde(default)]
    pub events: Vec<AnalyticsEvent>,
    pub stats: EventTotals,
}

impl AnalyticsLog {
    pub fn empty(now: i64) -> Self {
        Self {
            events: Vec::new(),
            stats: EventTotals {
                total_events: 0,
                last_updated: now,
            },
        }
    }

    /// Append `event` after dropping expired ones, keeping at most [`MAX_STORED_EVENTS`]
    pub fn push(&mut self, event: AnalyticsEvent, now: i64) {
        let cutoff = now - EVENT_RETENTION_MS;
        self.events.retain(|existing| existing.timestamp > cutoff);
        self.events.push(event);

        if self.events.len() > MAX_STORED_EVENTS {
            let excess = self.events.len() - MAX_STORED_EVENTS;
            self.events.drain(..excess);
        }

        self.stats = EventTotals {
            total_events: self.events.len(),
            last_updated: now,
        };
    }
}
