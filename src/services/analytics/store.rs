//! File-backed analytics event log

use super::stats::AnalyticsStats;
use super::types::{AnalyticsEvent, AnalyticsLog};
use crate::core::types::now_millis;
use crate::utils::error::{GatewayError, Result};
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub const ANALYTICS_FILE: &str = "analytics.json";

/// Analytics events persisted as JSON under the data directory
///
/// Shares the locking discipline of the visit counter: every read-modify-write cycle holds an
/// async mutex for its whole duration.
#[derive(Debug)]
pub struct AnalyticsStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl AnalyticsStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(ANALYTICS_FILE),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `event`, pruning expired and excess events in the same write
    pub async fn record_event(&self, event: AnalyticsEvent) -> Result<()> {
        self.record_event_at(event, now_millis()).await
    }

    pub async fn record_event_at(&self, event: AnalyticsEvent, now: i64) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut log = self.read(now).await;
        let name = event.event.clone();

        log.push(event, now);
        self.write(&log).await?;
        debug!(event = %name, stored = log.events.len(), "Analytics event recorded");
        Ok(())
    }

    /// Aggregate the stored events
    pub async fn stats(&self) -> AnalyticsStats {
        self.stats_at(now_millis()).await
    }

    pub async fn stats_at(&self, now: i64) -> AnalyticsStats {
        let _guard = self.lock.lock().await;
        let log = self.read(now).await;
        AnalyticsStats::compute(&log.events, now)
    }

    async fn read(&self, now: i64) -> AnalyticsLog {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %self.path.display(), error = %e, "Failed to read analytics data");
                }
                return AnalyticsLog::empty(now);
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Analytics file is corrupt, starting over");
            AnalyticsLog::empty(now)
        })
    }

    async fn write(&self, log: &AnalyticsLog) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await.map_err(GatewayError::Io)?;
        }
        let content = serde_json::to_string_pretty(log)?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(GatewayError::Io)
    }
}

/// Mask the host part of an address before it is stored
///
/// IPv4 loses its last octet, IPv6 keeps only the first three groups. Anything that does not
/// parse as an address is returned unchanged.
pub fn anonymize_ip(ip: &str) -> String {
    match ip.trim().parse::<IpAddr>() {
        Ok(IpAddr::V4(v4)) => {
            let [a, b, c, _] = v4.octets();
            format!("{}.{}.{}.***", a, b, c)
        }
        Ok(IpAddr::V6(v6)) => {
            let s = v6.segments();
            format!("{:x}:{:x}:{:x}:***", s[0], s[1], s[2])
        }
        Err(_) => ip.to_string(),
    }
}
