//! Site visit statistics

mod counter;
mod types;

pub use counter::{VISIT_STATS_FILE, VisitCounter};
pub use types::{DEFAULT_TOTAL_VISITS, VISIT_DEDUPE_MS, VisitStats};
