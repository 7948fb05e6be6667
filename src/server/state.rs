//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::providers::{ChatBackend, HttpBackend, ProviderHealthChecker, ProviderRegistry};
use crate::core::rate_limiter::RateLimiter;
use crate::core::router::ProviderRouter;
use crate::core::security::ContentSafetyFilter;
use crate::services::{AnalyticsStore, VisitCounter};
use crate::utils::error::{GatewayError, Result};
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Every field is an `Arc`, so cloning the state per worker is cheap and all workers observe
/// the same counters and provider bookkeeping.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Per-IP and per-session quotas
    pub rate_limiter: Arc<RateLimiter>,
    /// Input screening and redaction
    pub safety: Arc<ContentSafetyFilter>,
    /// Provider selection with failover
    pub router: Arc<ProviderRouter>,
    /// Provider liveness probes
    pub health: Arc<ProviderHealthChecker>,
    /// Site visit statistics
    pub visits: Arc<VisitCounter>,
    /// Front-end usage events
    pub analytics: Arc<AnalyticsStore>,
}

impl AppState {
    /// Build the state with an HTTP backend for the providers configured in `config`
    pub fn new(config: Config) -> Result<Self> {
        let registry = ProviderRegistry::from_config(&config.providers);
        let backend = HttpBackend::new(&registry, config.router.request_timeout()).map_err(|e| {
            GatewayError::config(format!("Failed to build provider HTTP client: {}", e))
        })?;
        Ok(Self::with_backend(config, registry, Arc::new(backend)))
    }

    /// Build the state around an existing backend
    pub fn with_backend(
        config: Config,
        registry: ProviderRegistry,
        backend: Arc<dyn ChatBackend>,
    ) -> Self {
        let registry = Arc::new(registry);
        let router = ProviderRouter::new(registry.clone(), backend.clone(), &config.router);
        let health = ProviderHealthChecker::new(registry, backend);

        Self {
            rate_limiter: Arc::new(RateLimiter::new(&config.rate_limit)),
            safety: Arc::new(ContentSafetyFilter::new()),
            router: Arc::new(router),
            health: Arc::new(health),
            visits: Arc::new(VisitCounter::new(&config.storage.data_dir)),
            analytics: Arc::new(AnalyticsStore::new(&config.storage.data_dir)),
            config: Arc::new(config),
        }
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
