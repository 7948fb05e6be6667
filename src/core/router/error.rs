//! Router error types

use crate::core::providers::unified_provider::ProviderError;

/// Terminal failures of a routed call
#[derive(Debug, Clone, thiserror::Error)]
pub enum RouterError {
    /// No provider has a credential; never retried
    #[error("No AI provider is configured")]
    NoProviderConfigured,

    /// Every attempt failed; carries the error of the last attempt
    #[error("All AI providers failed after {attempts} attempts: {last}")]
    AllProvidersExhausted { attempts: u32, last: ProviderError },
}
