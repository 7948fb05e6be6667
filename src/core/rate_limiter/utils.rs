//! Cleanup and background maintenance for the rate limiter

use super::limiter::RateLimiter;
use super::types::{CleanupReport, RateLimitEntry, RateLimitScope};
use crate::core::types::now_millis;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

impl RateLimiter {
    /// Remove entries whose own window has elapsed
    pub async fn cleanup_expired(&self) -> CleanupReport {
        self.cleanup_expired_at(now_millis()).await
    }

    pub async fn cleanup_expired_at(&self, now: i64) -> CleanupReport {
        let ip_window = self.ip_limit.window_ms;
        let session_window = self.session_limit.window_ms;

        CleanupReport {
            ip: self
                .ip_store
                .retain(&|entry: &RateLimitEntry| now - entry.window_start <= ip_window)
                .await,
            session: self
                .session_store
                .retain(&|entry: &RateLimitEntry| {
                    now - entry.window_start <= session_window
                })
                .await,
        }
    }

    /// Remove entries whose window started before the retention horizon
    pub async fn sweep_stale_at(&self, now: i64) -> CleanupReport {
        let retention = self.retention_ms;
        let keep = move |entry: &RateLimitEntry| now - entry.window_start <= retention;

        CleanupReport {
            ip: self.ip_store.retain(&keep).await,
            session: self.session_store.retain(&keep).await,
        }
    }

    /// Start background cleanup task
    pub fn start_cleanup_task(self: Arc<Self>) -> JoinHandle<()> {
        let period = self.cleanup_interval;
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                interval.tick().await;
                let report = self.sweep_stale_at(now_millis()).await;
                if report.total() > 0 {
                    info!(
                        "Rate limiter sweep removed {} ip and {} session entries",
                        report.ip, report.session
                    );
                } else {
                    debug!("Rate limiter sweep found nothing to remove");
                }
            }
        })
    }

    /// Number of tracked identifiers in `scope`
    pub async fn tracked(&self, scope: RateLimitScope) -> usize {
        self.store(scope).len().await
    }
}
