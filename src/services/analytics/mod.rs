//! Usage analytics
//!
//! Front-end events are appended to a JSON file under the data directory and aggregated on
//! demand into chat, tag, quote, brand and error statistics.

mod stats;
mod store;
mod types;

pub use stats::{AnalyticsStats, ChatStats, ErrorStats, QuoteStats, TagStats, quote_range};
pub use store::{ANALYTICS_FILE, AnalyticsStore, anonymize_ip};
pub use types::{
    AnalyticsEvent, AnalyticsLog, EVENT_RETENTION_MS, EventTotals, MAX_STORED_EVENTS,
};
