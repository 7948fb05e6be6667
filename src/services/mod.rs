//! Services module
//!
//! Business services that sit beside the chat path

pub mod analytics;
pub mod visit_counter;

pub use analytics::{AnalyticsEvent, AnalyticsStats, AnalyticsStore};
pub use visit_counter::{VisitCounter, VisitStats};
