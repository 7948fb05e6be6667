//! Provider health probing

use super::client::ChatBackend;
use super::registry::{Provider, ProviderKind, ProviderRegistry};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Detail error for a provider without credentials
pub const DISABLED_ERROR: &str = "未启用";
/// Detail error for a provider whose probe failed
pub const PROBE_FAILED_ERROR: &str = "连接失败";

/// Summary over all providers
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSummary {
    pub providers: Vec<Provider>,
    pub healthy: BTreeMap<ProviderKind, bool>,
    pub healthy_count: usize,
    /// More than one provider is healthy
    pub has_backup: bool,
}

/// Per-provider probe result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderHealthDetail {
    pub provider: ProviderKind,
    pub name: &'static str,
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Probes every registered provider through a backend
pub struct ProviderHealthChecker {
    registry: Arc<ProviderRegistry>,
    backend: Arc<dyn ChatBackend>,
}

impl ProviderHealthChecker {
    pub fn new(registry: Arc<ProviderRegistry>, backend: Arc<dyn ChatBackend>) -> Self {
        Self { registry, backend }
    }

    async fn probe(&self, provider: &Provider) -> bool {
        match self.backend.probe(provider).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Health probe failed for {}: {}", provider.id, e);
                false
            }
        }
    }

    /// Probe every provider; disabled ones count as unhealthy
    pub async fn check_all(&self) -> HealthSummary {
        let mut healthy = BTreeMap::new();
        for provider in self.registry.list_providers() {
            let ok = provider.enabled && self.probe(provider).await;
            healthy.insert(provider.id, ok);
        }

        let healthy_count = healthy.values().filter(|ok| **ok).count();
        HealthSummary {
            providers: self.registry.list_providers().to_vec(),
            healthy,
            healthy_count,
            has_backup: healthy_count > 1,
        }
    }

    /// Probe every provider and report timing and errors
    pub async fn detailed(&self) -> Vec<ProviderHealthDetail> {
        let mut results = Vec::with_capacity(self.registry.list_providers().len());

        for provider in self.registry.list_providers() {
            if !provider.enabled {
                results.push(ProviderHealthDetail {
                    provider: provider.id,
                    name: provider.display_name,
                    healthy: false,
                    response_time_ms: None,
                    error: Some(DISABLED_ERROR.to_string()),
                });
                continue;
            }

            let started = Instant::now();
            let healthy = self.probe(provider).await;
            let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

            results.push(ProviderHealthDetail {
                provider: provider.id,
                name: provider.display_name,
                healthy,
                response_time_ms: healthy.then_some(elapsed),
                error: (!healthy).then(|| PROBE_FAILED_ERROR.to_string()),
            });
        }

        results
    }

    /// Log a summary every `interval`; logs at error level when nothing is healthy
    pub fn start_monitor(self: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
            loop {
                ticker.tick().await;
                let summary = self.check_all().await;
                if summary.healthy_count == 0 {
                    error!("Provider health check: no AI provider is healthy");
                } else {
                    info!(
                        "Provider health check: {} healthy, backup available: {}, status: {:?}",
                        summary.healthy_count, summary.has_backup, summary.healthy
                    );
                }
            }
        })
    }
}
