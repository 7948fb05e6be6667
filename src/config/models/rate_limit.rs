//! Rate limiting configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default message when the per-IP window is exhausted
pub const DEFAULT_IP_LIMIT_MESSAGE: &str = "休息一下，思考需要时间。请稍后再试。";
/// Default message when the per-session daily quota is exhausted
pub const DEFAULT_SESSION_LIMIT_MESSAGE: &str =
    "今日灵感额度已用完，明天再来吧！Stay hungry, stay foolish.";

/// Rate limiting configuration for both scopes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Requests allowed per IP within one window
    #[serde(default = "default_ip_max_requests")]
    pub ip_max_requests: u32,
    /// IP window length in seconds
    #[serde(default = "default_ip_window_secs")]
    pub ip_window_secs: u64,
    /// Requests allowed per session within one window
    #[serde(default = "default_session_max_requests")]
    pub session_max_requests: u32,
    /// Session window length in seconds
    #[serde(default = "default_session_window_secs")]
    pub session_window_secs: u64,
    /// Interval of the background sweep in seconds
    #[serde(default = "default_cleanup_interval_secs")]
    pub cleanup_interval_secs: u64,
    /// Entries whose window started longer ago than this are swept
    #[serde(default = "default_retention_secs")]
    pub retention_secs: u64,
    #[serde(default = "default_ip_message")]
    pub ip_message: String,
    #[serde(default = "default_session_message")]
    pub session_message: String,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            ip_max_requests: default_ip_max_requests(),
            ip_window_secs: default_ip_window_secs(),
            session_max_requests: default_session_max_requests(),
            session_window_secs: default_session_window_secs(),
            cleanup_interval_secs: default_cleanup_interval_secs(),
            retention_secs: default_retention_secs(),
            ip_message: default_ip_message(),
            session_message: default_session_message(),
        }
    }
}

impl RateLimitConfig {
    pub fn ip_window(&self) -> Duration {
        Duration::from_secs(self.ip_window_secs)
    }

    pub fn session_window(&self) -> Duration {
        Duration::from_secs(self.session_window_secs)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }

    pub fn retention(&self) -> Duration {
        Duration::from_secs(self.retention_secs)
    }
}

fn default_ip_max_requests() -> u32 {
    5
}

fn default_ip_window_secs() -> u64 {
    60
}

fn default_session_max_requests() -> u32 {
    30
}

fn default_session_window_secs() -> u64 {
    24 * 60 * 60
}

fn default_cleanup_interval_secs() -> u64 {
    60 * 60
}

fn default_retention_secs() -> u64 {
    24 * 60 * 60
}

fn default_ip_message() -> String {
    DEFAULT_IP_LIMIT_MESSAGE.to_string()
}

fn default_session_message() -> String {
    DEFAULT_SESSION_LIMIT_MESSAGE.to_string()
}
