//! Visit statistics records

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Visits counted before the counter existed
pub const DEFAULT_TOTAL_VISITS: u64 = 580;

/// One visit per IP is counted within this window
pub const VISIT_DEDUPE_MS: i64 = 24 * 60 * 60 * 1000;

/// Public view of the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitStats {
    pub total_visits: u64,
    pub unique_visitors: u64,
    /// Epoch milliseconds of the last counted visit
    pub last_updated: i64,
}

/// On-disk layout of `visit-stats.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct VisitRecord {
    pub total_visits: u64,
    pub unique_visitors: u64,
    pub last_updated: i64,
    #[serde(default)]
    pub ip_records: HashMap<String, i64>,
}

impl VisitRecord {
    pub fn fresh(now: i64) -> Self {
        Self {
            total_visits: DEFAULT_TOTAL_VISITS,
            unique_visitors: 0,
            last_updated: now,
            ip_records: HashMap::new(),
        }
    }

    /// Whether a visit from `ip` at `now` counts
    pub fn should_count(&self, ip: &str, now: i64) -> bool {
        if ip == crate::server::UNKNOWN_IP {
            return false;
        }
        match self.ip_records.get(ip) {
            None => true,
            Some(last) => now - last >= VISIT_DEDUPE_MS,
        }
    }

    /// Forget IPs whose dedupe window has elapsed
    pub fn prune_expired(&mut self, now: i64) -> usize {
        let before = self.ip_records.len();
        self.ip_records.retain(|_, last| now - *last < VISIT_DEDUPE_MS);
        before - self.ip_records.len()
    }

    pub fn stats(&self) -> VisitStats {
        VisitStats {
            total_visits: self.total_visits,
            unique_visitors: self.unique_visitors,
            last_updated: self.last_updated,
        }
    }
}
