//! Health check endpoints

use crate::core::providers::{ProviderHealthDetail, ProviderKind};
use crate::core::types::now_millis;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Serialize;
use std::borrow::Cow;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/health")
            .route("", web::get().to(health_check))
            .route("/providers", web::get().to(provider_health)),
    );
}

/// Liveness with the runtime view of each provider
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: Cow<'static, str>,
    pub version: Cow<'static, str>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub providers: Vec<ProviderStatus>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStatus {
    pub id: ProviderKind,
    pub name: &'static str,
    pub model: &'static str,
    pub enabled: bool,
    pub priority: u8,
    pub failure_count: u32,
    pub in_cooldown: bool,
}

/// Probe results with the derived summary
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderHealthReport {
    pub healthy_count: usize,
    pub has_backup: bool,
    pub providers: Vec<ProviderHealthDetail>,
}

/// Basic health check endpoint
///
/// Does not contact any provider; failure counts come from the router's bookkeeping.
pub async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let router = &state.router;
    let now = now_millis();
    let providers = router
        .registry()
        .list_providers()
        .iter()
        .map(|provider| ProviderStatus {
            id: provider.id,
            name: provider.display_name,
            model: provider.model_id,
            enabled: provider.enabled,
            priority: provider.priority,
            failure_count: router.runtime_state(provider.id).failure_count,
            in_cooldown: router.is_in_cooldown(provider.id, now),
        })
        .collect();

    let status = HealthStatus {
        status: Cow::Borrowed("healthy"),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        timestamp: chrono::Utc::now(),
        providers,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(status)))
}

/// Probe every provider with a minimal completion
pub async fn provider_health(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Provider health probe requested");

    let providers = state.health.detailed().await;
    let healthy_count = providers.iter().filter(|detail| detail.healthy).count();

    Ok(HttpResponse::Ok().json(ApiResponse::success(ProviderHealthReport {
        healthy_count,
        has_backup: healthy_count > 1,
        providers,
    })))
}
