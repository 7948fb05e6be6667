//! HTTP response handling for errors

use super::types::GatewayError;
use crate::core::security::block_message;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use tracing::error;

/// Message shown when no provider credential is present
pub const SERVICE_UNCONFIGURED_MESSAGE: &str = "AI 服务未配置";
/// Message shown when every provider attempt failed
pub const SERVICE_UNAVAILABLE_MESSAGE: &str = "AI 服务暂时不可用，请稍后再试";
const INTERNAL_MESSAGE: &str = "服务暂时不可用，请稍后再试";

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) | GatewayError::ContentBlocked { .. } => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            GatewayError::NoProviderConfigured => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::AllProvidersExhausted(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (message, reset_at) = match self {
            GatewayError::InvalidRequest(message) => (message.clone(), None),
            GatewayError::RateLimited { message, reset_at } => (message.clone(), Some(*reset_at)),
            GatewayError::ContentBlocked { reason } => (block_message(Some(*reason)).to_string(), None),
            GatewayError::NoProviderConfigured => (SERVICE_UNCONFIGURED_MESSAGE.to_string(), None),
            GatewayError::AllProvidersExhausted(_) => {
                (SERVICE_UNAVAILABLE_MESSAGE.to_string(), None)
            }
            other => {
                error!("Internal error surfaced to client: {}", other);
                (INTERNAL_MESSAGE.to_string(), None)
            }
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.kind().to_string(),
            message,
            reset_at,
        })
    }
}

/// JSON body of every rejected request
#[derive(Debug, Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "resetAt", skip_serializing_if = "Option::is_none", default)]
    pub reset_at: Option<i64>,
}
