//! File-backed visit counter

use super::types::{VisitRecord, VisitStats};
use crate::core::types::now_millis;
use crate::utils::error::{GatewayError, Result};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub const VISIT_STATS_FILE: &str = "visit-stats.json";

/// Visit counter persisted as JSON under the data directory
///
/// Read-modify-write cycles are serialized by an async mutex, so concurrent visits inside one
/// process never lose an increment. Nothing is shared across processes.
#[derive(Debug)]
pub struct VisitCounter {
    path: PathBuf,
    lock: Mutex<()>,
}

impl VisitCounter {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(VISIT_STATS_FILE),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a visit from `ip` and return the resulting stats
    pub async fn record_visit(&self, ip: &str) -> Result<VisitStats> {
        self.record_visit_at(ip, now_millis()).await
    }

    pub async fn record_visit_at(&self, ip: &str, now: i64) -> Result<VisitStats> {
        let _guard = self.lock.lock().await;
        let mut record = self.read(now).await;

        if record.should_count(ip, now) {
            record.prune_expired(now);
            record.total_visits += 1;
            record.unique_visitors += 1;
            record.ip_records.insert(ip.to_string(), now);
            record.last_updated = now;
            self.write(&record).await?;
            debug!(ip = %ip, total = record.total_visits, "Visit counted");
        }

        Ok(record.stats())
    }

    /// Current stats without recording anything
    pub async fn stats(&self) -> VisitStats {
        let _guard = self.lock.lock().await;
        self.read(now_millis()).await.stats()
    }

    async fn read(&self, now: i64) -> VisitRecord {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %self.path.display(), error = %e, "Failed to read visit stats");
                }
                return VisitRecord::fresh(now);
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Visit stats file is corrupt, starting over");
            VisitRecord::fresh(now)
        })
    }

    async fn write(&self, record: &VisitRecord) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await.map_err(GatewayError::Io)?;
        }
        let content = serde_json::to_string_pretty(record)?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(GatewayError::Io)
    }
}
