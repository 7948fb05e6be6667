//! Rate limiter types and data structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which identifier space a check applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateLimitScope {
    /// Keyed by client IP, short window
    Ip,
    /// Keyed by client session id, daily window
    Session,
}

impl fmt::Display for RateLimitScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateLimitScope::Ip => write!(f, "ip"),
            RateLimitScope::Session => write!(f, "session"),
        }
    }
}

/// Counter for one identifier inside one fixed window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitEntry {
    pub count: u32,
    /// Epoch millis of the first request in the window
    pub window_start: i64,
    /// Epoch millis of the latest counted request
    pub last_request: i64,
}

impl RateLimitEntry {
    pub(super) fn first(now: i64) -> Self {
        Self {
            count: 1,
            window_start: now,
            last_request: now,
        }
    }
}

/// Result of a rate limit check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitResult {
    /// Whether the request is allowed
    pub allowed: bool,
    /// Requests left in the current window
    pub remaining: u32,
    /// Epoch millis at which the current window ends
    pub reset_at: i64,
    /// Scope-specific message, set only when blocked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Read-only view of an identifier's window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitStatus {
    pub count: u32,
    pub remaining: u32,
    pub reset_at: i64,
}

/// Limit applied to one scope
#[derive(Debug, Clone)]
pub struct ScopeLimit {
    pub max_requests: u32,
    pub window_ms: i64,
    pub message: String,
}

/// Entries removed per scope by a cleanup pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    pub ip: usize,
    pub session: usize,
}

impl CleanupReport {
    pub fn total(&self) -> usize {
        self.ip + self.session
    }
}
