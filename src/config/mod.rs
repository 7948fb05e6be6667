//! Configuration management for the gateway
//!
//! Configuration is read from an optional YAML file and then overlaid with environment
//! variables. Every section has defaults, so an empty file (or no file) is a valid start.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::core::providers::ProviderKind;
use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Environment variable overriding the bind host
pub const ENV_HOST: &str = "GATEWAY_HOST";
/// Environment variable overriding the bind port
pub const ENV_PORT: &str = "GATEWAY_PORT";
/// Environment variable overriding the data directory
pub const ENV_DATA_DIR: &str = "DATA_DIR";
/// Environment variable for the per-IP minute quota
pub const ENV_IP_LIMIT: &str = "RATE_LIMIT_MAX_REQUESTS_PER_MINUTE";
/// Environment variable for the per-session daily quota
pub const ENV_SESSION_LIMIT: &str = "RATE_LIMIT_MAX_REQUESTS_PER_DAY";

/// Main configuration struct for the gateway
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub router: RouterConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_yaml_str(&content)
    }

    /// Parse configuration from a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to an empty map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load from an optional file, then overlay the process environment
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path).await?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Overlay values from an environment lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = non_empty(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = non_empty(ENV_PORT) {
            self.server.port = parse_env(ENV_PORT, &port)?;
        }
        if let Some(dir) = non_empty(ENV_DATA_DIR) {
            self.storage.data_dir = dir.into();
        }
        if let Some(max) = non_empty(ENV_IP_LIMIT) {
            self.rate_limit.ip_max_requests = parse_env(ENV_IP_LIMIT, &max)?;
        }
        if let Some(max) = non_empty(ENV_SESSION_LIMIT) {
            self.rate_limit.session_max_requests = parse_env(ENV_SESSION_LIMIT, &max)?;
        }
        for kind in ProviderKind::ALL {
            if let Some(key) = non_empty(kind.credential_env()) {
                self.providers.get_mut(kind).api_key = Some(key);
            }
        }

        Ok(())
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| GatewayError::Config(format!("Server config error: {}", e)))?;
        self.rate_limit
            .validate()
            .map_err(|e| GatewayError::Config(format!("Rate limit config error: {}", e)))?;
        self.router
            .validate()
            .map_err(|e| GatewayError::Config(format!("Router config error: {}", e)))?;
        self.providers
            .validate()
            .map_err(|e| GatewayError::Config(format!("Provider config error: {}", e)))?;
        self.storage
            .validate()
            .map_err(|e| GatewayError::Config(format!("Storage config error: {}", e)))?;

        Ok(())
    }
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| GatewayError::Config(format!("Invalid value for {}: {:?}", key, value)))
}
