//! Provider router configuration

use super::default_true;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Router configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Retries after the first attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Seconds a failed provider sits out of selection
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,
    /// Allow switching provider between attempts
    #[serde(default = "default_true")]
    pub enable_failover: bool,
    /// Stream chat replies instead of sending them in one chunk
    #[serde(default = "default_true")]
    pub streaming: bool,
    /// Upstream request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Period of the provider health monitor; disabled when unset
    #[serde(default)]
    pub health_check_interval_secs: Option<u64>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            cooldown_secs: default_cooldown_secs(),
            enable_failover: true,
            streaming: true,
            request_timeout_secs: default_request_timeout_secs(),
            health_check_interval_secs: None,
        }
    }
}

impl RouterConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_max_retries() -> u32 {
    2
}

fn default_cooldown_secs() -> u64 {
    5 * 60
}

fn default_request_timeout_secs() -> u64 {
    60
}
