//! Provider endpoint configuration

use crate::core::providers::ProviderKind;
use serde::{Deserialize, Serialize};

/// Per-provider overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderEndpointConfig {
    /// API credential; the provider is disabled when absent or empty
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Replacement for the built-in API base URL
    #[serde(default)]
    pub base_url: Option<String>,
}

impl ProviderEndpointConfig {
    /// Credential with empty strings treated as absent
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }
}

/// Configuration for the three supported providers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub zhipu: ProviderEndpointConfig,
    #[serde(default)]
    pub deepseek: ProviderEndpointConfig,
    #[serde(default)]
    pub openai: ProviderEndpointConfig,
}

impl ProvidersConfig {
    pub fn get(&self, kind: ProviderKind) -> &ProviderEndpointConfig {
        match kind {
            ProviderKind::Zhipu => &self.zhipu,
            ProviderKind::DeepSeek => &self.deepseek,
            ProviderKind::OpenAi => &self.openai,
        }
    }

    pub fn get_mut(&mut self, kind: ProviderKind) -> &mut ProviderEndpointConfig {
        match kind {
            ProviderKind::Zhipu => &mut self.zhipu,
            ProviderKind::DeepSeek => &mut self.deepseek,
            ProviderKind::OpenAi => &mut self.openai,
        }
    }
}
