//! Core rate limiter implementation

use super::store::{CounterStore, MemoryStore};
use super::types::{
    RateLimitEntry, RateLimitResult, RateLimitScope, RateLimitStatus, ScopeLimit,
};
use crate::config::models::rate_limit::RateLimitConfig;
use crate::core::types::now_millis;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

/// Fixed-window rate limiter with an IP scope and a session scope
pub struct RateLimiter {
    pub(super) ip_limit: ScopeLimit,
    pub(super) session_limit: ScopeLimit,
    pub(super) ip_store: Arc<dyn CounterStore>,
    pub(super) session_store: Arc<dyn CounterStore>,
    /// Age after which the periodic sweep drops an entry
    pub(super) retention_ms: i64,
    pub(super) cleanup_interval: Duration,
    /// Serializes read-modify-write so concurrent checks cannot undercount
    write_guard: Mutex<()>,
}

impl RateLimiter {
    /// Create a rate limiter backed by in-memory stores
    pub fn new(config: &RateLimitConfig) -> Self {
        Self::with_stores(
            config,
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
        )
    }

    /// Create a rate limiter over caller supplied stores
    pub fn with_stores(
        config: &RateLimitConfig,
        ip_store: Arc<dyn CounterStore>,
        session_store: Arc<dyn CounterStore>,
    ) -> Self {
        Self {
            ip_limit: ScopeLimit {
                max_requests: config.ip_max_requests,
                window_ms: duration_ms(config.ip_window()),
                message: config.ip_message.clone(),
            },
            session_limit: ScopeLimit {
                max_requests: config.session_max_requests,
                window_ms: duration_ms(config.session_window()),
                message: config.session_message.clone(),
            },
            ip_store,
            session_store,
            retention_ms: duration_ms(config.retention()),
            cleanup_interval: config.cleanup_interval(),
            write_guard: Mutex::new(()),
        }
    }

    pub fn limit(&self, scope: RateLimitScope) -> &ScopeLimit {
        match scope {
            RateLimitScope::Ip => &self.ip_limit,
            RateLimitScope::Session => &self.session_limit,
        }
    }

    pub(super) fn store(&self, scope: RateLimitScope) -> &Arc<dyn CounterStore> {
        match scope {
            RateLimitScope::Ip => &self.ip_store,
            RateLimitScope::Session => &self.session_store,
        }
    }

    /// Check and record one request for `identifier`
    pub async fn check(&self, identifier: &str, scope: RateLimitScope) -> RateLimitResult {
        self.check_at(identifier, scope, now_millis()).await
    }

    /// Same as [`check`](Self::check) with an explicit clock
    pub async fn check_at(
        &self,
        identifier: &str,
        scope: RateLimitScope,
        now: i64,
    ) -> RateLimitResult {
        let limit = self.limit(scope);
        let store = self.store(scope);

        // A zero quota blocks everything and never opens a window
        if limit.max_requests == 0 {
            return blocked(limit, now + limit.window_ms);
        }

        let _guard = self.write_guard.lock().await;

        let entry = match store.get(identifier).await {
            Some(entry) if now - entry.window_start <= limit.window_ms => entry,
            _ => {
                store.put(identifier, RateLimitEntry::first(now)).await;
                return RateLimitResult {
                    allowed: true,
                    remaining: limit.max_requests - 1,
                    reset_at: now + limit.window_ms,
                    message: None,
                };
            }
        };

        let reset_at = entry.window_start + limit.window_ms;
        if entry.count >= limit.max_requests {
            debug!(
                "Rate limit hit: scope={} identifier={} count={}",
                scope, identifier, entry.count
            );
            return blocked(limit, reset_at);
        }

        let updated = RateLimitEntry {
            count: entry.count + 1,
            window_start: entry.window_start,
            last_request: now,
        };
        store.put(identifier, updated).await;

        RateLimitResult {
            allowed: true,
            remaining: limit.max_requests.saturating_sub(updated.count),
            reset_at,
            message: None,
        }
    }

    /// IP check first; the session check runs only if the IP check passed
    pub async fn check_combined(&self, ip: &str, session_id: Option<&str>) -> RateLimitResult {
        self.check_combined_at(ip, session_id, now_millis()).await
    }

    pub async fn check_combined_at(
        &self,
        ip: &str,
        session_id: Option<&str>,
        now: i64,
    ) -> RateLimitResult {
        let ip_result = self.check_at(ip, RateLimitScope::Ip, now).await;
        if !ip_result.allowed {
            return ip_result;
        }

        match session_id {
            Some(session) => self.check_at(session, RateLimitScope::Session, now).await,
            None => ip_result,
        }
    }

    /// Current window for `identifier` without recording a request
    pub async fn status(&self, identifier: &str, scope: RateLimitScope) -> RateLimitStatus {
        self.status_at(identifier, scope, now_millis()).await
    }

    pub async fn status_at(
        &self,
        identifier: &str,
        scope: RateLimitScope,
        now: i64,
    ) -> RateLimitStatus {
        let limit = self.limit(scope);
        match self.store(scope).get(identifier).await {
            Some(entry) if now - entry.window_start <= limit.window_ms => RateLimitStatus {
                count: entry.count,
                remaining: limit.max_requests.saturating_sub(entry.count),
                reset_at: entry.window_start + limit.window_ms,
            },
            _ => RateLimitStatus {
                count: 0,
                remaining: limit.max_requests,
                reset_at: now + limit.window_ms,
            },
        }
    }

    /// Forget `identifier` in `scope`
    pub async fn reset(&self, identifier: &str, scope: RateLimitScope) -> bool {
        let _guard = self.write_guard.lock().await;
        self.store(scope).remove(identifier).await
    }
}

fn blocked(limit: &ScopeLimit, reset_at: i64) -> RateLimitResult {
    RateLimitResult {
        allowed: false,
        remaining: 0,
        reset_at,
        message: Some(limit.message.clone()),
    }
}

pub(super) fn duration_ms(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}
