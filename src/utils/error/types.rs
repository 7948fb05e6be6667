//! Error types for the gateway

use crate::core::security::SafetyReason;
use thiserror::Error;

/// Result type alias for the gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed chat payload
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Caller exhausted its window quota
    #[error("Rate limit exceeded: {message}")]
    RateLimited {
        /// User-facing message for the exhausted scope
        message: String,
        /// Epoch millis at which the window resets
        reset_at: i64,
    },

    /// Input rejected by the safety filter
    #[error("Content blocked: {reason}")]
    ContentBlocked { reason: SafetyReason },

    /// No provider has a credential
    #[error("No AI provider configured")]
    NoProviderConfigured,

    /// Every attempt against the providers failed
    #[error("All AI providers failed: {0}")]
    AllProvidersExhausted(String),

    /// Server startup errors
    #[error("Server error: {0}")]
    Server(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
