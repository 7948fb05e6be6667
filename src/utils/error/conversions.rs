//! Conversions from component errors into `GatewayError`

use super::types::GatewayError;
use crate::core::router::RouterError;

impl From<RouterError> for GatewayError {
    fn from(err: RouterError) -> Self {
        match err {
            RouterError::NoProviderConfigured => GatewayError::NoProviderConfigured,
            RouterError::AllProvidersExhausted { .. } => {
                GatewayError::AllProvidersExhausted(err.to_string())
            }
        }
    }
}
