//! Analytics endpoints

use crate::core::types::now_millis;
use crate::server::state::AppState;
use crate::server::utils::client_ip;
use crate::services::AnalyticsEvent;
use crate::services::analytics::anonymize_ip;
use crate::utils::error::{GatewayError, Result};
use actix_web::http::header::USER_AGENT;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::error;
use uuid::Uuid;

/// Message returned when an event carries no name
pub const EVENT_REQUIRED: &str = "event is required";

/// Body of `POST /api/analytics/event`
///
/// Fields stay loosely typed so that a wrong type is rejected with a specific message instead
/// of a generic parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    #[serde(default)]
    pub event: Option<Value>,
    #[serde(default)]
    pub properties: Option<Value>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Reply of `POST /api/analytics/event`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventAccepted {
    pub success: bool,
    pub event_id: String,
}

/// Configure analytics routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/analytics")
            .route("/event", web::post().to(record_event))
            .route("/stats", web::get().to(analytics_stats)),
    );
}

/// `{prefix}_{now}_{9 random hex chars}`
fn random_id(prefix: &str, now: i64) -> String {
    let simple = Uuid::new_v4().simple().to_string();
    format!("{}_{}_{}", prefix, now, &simple[..9])
}

/// Store one front-end event tagged with the caller's masked IP and user agent
pub async fn record_event(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<EventRequest>,
) -> Result<HttpResponse> {
    let EventRequest {
        event,
        properties,
        session_id,
    } = body.into_inner();

    let name = match event {
        Some(Value::String(name)) if !name.is_empty() => name,
        _ => return Err(GatewayError::invalid_request(EVENT_REQUIRED)),
    };

    let now = now_millis();
    let mut properties = match properties {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };
    properties.insert("ip".to_string(), Value::String(anonymize_ip(&client_ip(&req))));
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");
    properties.insert("user_agent".to_string(), Value::String(user_agent.to_string()));

    let record = AnalyticsEvent {
        event: name,
        properties,
        timestamp: now,
        user_id: None,
        session_id: session_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| random_id("session", now)),
    };

    if let Err(e) = state.analytics.record_event_at(record, now).await {
        error!("Failed to record analytics event: {}", e);
        return Err(GatewayError::internal("Failed to process event"));
    }

    Ok(HttpResponse::Ok().json(EventAccepted {
        success: true,
        event_id: random_id("evt", now),
    }))
}

/// Aggregated analytics, all zero when nothing was recorded yet
pub async fn analytics_stats(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.analytics.stats().await))
}
