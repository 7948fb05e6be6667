//! HTTP route modules
//!
//! Everything is mounted under `/api`.

pub mod analytics;
pub mod chat;
pub mod health;
pub mod visit;

use crate::utils::error::GatewayError;
use actix_web::{HttpResponse, web};
use tracing::debug;

/// Message returned for bodies that are not a valid chat request
pub const MALFORMED_MESSAGES: &str = "消息格式不正确";

/// Mount every `/api` route
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let json = web::JsonConfig::default().error_handler(|err, _req| {
        debug!("Rejected request body: {}", err);
        GatewayError::invalid_request(MALFORMED_MESSAGES).into()
    });

    cfg.service(
        web::scope("/api")
            .app_data(json)
            .configure(analytics::configure_routes)
            .configure(chat::configure_routes)
            .configure(health::configure_routes)
            .configure(visit::configure_routes),
    );
}

/// Standard API response structure
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response
    pub fn error<S: Into<String>>(message: S) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Convert the API response to an HTTP response
    ///
    /// Returns HTTP 200 for successful responses and HTTP 500 for error responses
    pub fn to_http_response(&self) -> HttpResponse {
        if self.success {
            HttpResponse::Ok().json(self)
        } else {
            HttpResponse::InternalServerError().json(self)
        }
    }
}
