//! Helper functions for creating specific error types

use super::types::GatewayError;
use crate::core::security::SafetyReason;

impl GatewayError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn invalid_request<S: Into<String>>(message: S) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn rate_limited<S: Into<String>>(message: S, reset_at: i64) -> Self {
        Self::RateLimited {
            message: message.into(),
            reset_at,
        }
    }

    pub fn content_blocked(reason: SafetyReason) -> Self {
        Self::ContentBlocked { reason }
    }

    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::Server(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Stable machine-readable kind carried in the `error` field of responses
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::InvalidRequest(_) => "invalid_request",
            GatewayError::RateLimited { .. } => "rate_limit_exceeded",
            GatewayError::ContentBlocked { .. } => "content_blocked",
            GatewayError::NoProviderConfigured => "service_unavailable",
            GatewayError::AllProvidersExhausted(_) => "ai_service_error",
            _ => "internal_error",
        }
    }
}
