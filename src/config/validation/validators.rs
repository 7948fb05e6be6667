//! Validators for each configuration section

use super::trait_def::Validate;
use crate::config::models::*;
use crate::core::providers::ProviderKind;
use tracing::debug;

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Server host cannot be empty".to_string());
        }
        if self.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.workers == Some(0) {
            return Err("Worker count must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for RateLimitConfig {
    fn validate(&self) -> Result<(), String> {
        if self.ip_window_secs == 0 {
            return Err("IP rate limit window must be greater than 0".to_string());
        }
        if self.session_window_secs == 0 {
            return Err("Session rate limit window must be greater than 0".to_string());
        }
        if self.cleanup_interval_secs == 0 {
            return Err("Rate limit cleanup interval must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for RouterConfig {
    fn validate(&self) -> Result<(), String> {
        if self.cooldown_secs == 0 {
            return Err("Router cooldown must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("Request timeout must be greater than 0".to_string());
        }
        if self.health_check_interval_secs == Some(0) {
            return Err("Health check interval must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for ProvidersConfig {
    fn validate(&self) -> Result<(), String> {
        for kind in ProviderKind::ALL {
            if let Some(url) = &self.get(kind).base_url {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(format!("Base URL for {} must be an http(s) URL: {}", kind, url));
                }
            }
        }
        Ok(())
    }
}

impl Validate for StorageConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating storage configuration");
        if self.data_dir.as_os_str().is_empty() {
            return Err("Data directory cannot be empty".to_string());
        }
        Ok(())
    }
}
