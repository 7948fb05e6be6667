//! Static registry of the supported AI providers
//!
//! The set of providers is closed. Each [`ProviderKind`] knows its model, priority and
//! credential variable; a provider is enabled when a non-empty credential is present.

use crate::config::models::provider::ProvidersConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported provider backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Zhipu,
    DeepSeek,
    #[serde(rename = "openai")]
    OpenAi,
}

impl ProviderKind {
    /// All kinds in declaration order
    pub const ALL: [ProviderKind; 3] = [
        ProviderKind::Zhipu,
        ProviderKind::DeepSeek,
        ProviderKind::OpenAi,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ProviderKind::Zhipu => "zhipu",
            ProviderKind::DeepSeek => "deepseek",
            ProviderKind::OpenAi => "openai",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::Zhipu => "智谱 AI (GLM-4.7)",
            ProviderKind::DeepSeek => "DeepSeek-V3",
            ProviderKind::OpenAi => "OpenAI GPT-4o",
        }
    }

    pub fn model(&self) -> &'static str {
        match self {
            ProviderKind::Zhipu => "glm-4-flash",
            ProviderKind::DeepSeek => "deepseek-chat",
            ProviderKind::OpenAi => "gpt-4o",
        }
    }

    /// Lower is preferred
    pub fn priority(&self) -> u8 {
        match self {
            ProviderKind::Zhipu => 1,
            ProviderKind::DeepSeek => 2,
            ProviderKind::OpenAi => 3,
        }
    }

    /// Cost per 1k tokens
    pub fn cost_per_1k(&self) -> f64 {
        match self {
            ProviderKind::Zhipu => 0.1,
            ProviderKind::DeepSeek => 0.001,
            ProviderKind::OpenAi => 2.5,
        }
    }

    pub fn credential_env(&self) -> &'static str {
        match self {
            ProviderKind::Zhipu => "ZHIPU_API_KEY",
            ProviderKind::DeepSeek => "DEEPSEEK_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
        }
    }

    /// Base URL up to, not including, `/chat/completions`
    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Zhipu => "https://open.bigmodel.cn/api/paas/v4",
            ProviderKind::DeepSeek => "https://api.deepseek.com/v1",
            ProviderKind::OpenAi => "https://api.openai.com/v1",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Registry entry for one provider
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: ProviderKind,
    pub display_name: &'static str,
    pub model_id: &'static str,
    pub enabled: bool,
    pub priority: u8,
    pub cost_per_unit: f64,
}

impl Provider {
    pub fn new(kind: ProviderKind, enabled: bool) -> Self {
        Self {
            id: kind,
            display_name: kind.display_name(),
            model_id: kind.model(),
            enabled,
            priority: kind.priority(),
            cost_per_unit: kind.cost_per_1k(),
        }
    }
}

/// How a credential is presented upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// `id.secret` keys are exchanged for a signed token, others sent as bearer
    ZhipuToken,
}

/// Client configuration for one enabled provider
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderEndpoint {
    pub kind: ProviderKind,
    pub base_url: String,
    pub credential: String,
    pub auth: AuthScheme,
}

impl fmt::Debug for ProviderEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderEndpoint")
            .field("kind", &self.kind)
            .field("base_url", &self.base_url)
            .field("credential", &"[REDACTED]")
            .field("auth", &self.auth)
            .finish()
    }
}

impl ProviderEndpoint {
    /// Factory mapping a kind and its configuration to client settings
    pub fn build(kind: ProviderKind, credential: &str, base_url: Option<&str>) -> Self {
        Self {
            kind,
            base_url: base_url
                .unwrap_or(kind.default_base_url())
                .trim_end_matches('/')
                .to_string(),
            credential: credential.to_string(),
            auth: match kind {
                ProviderKind::Zhipu => AuthScheme::ZhipuToken,
                ProviderKind::DeepSeek | ProviderKind::OpenAi => AuthScheme::Bearer,
            },
        }
    }

    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// Immutable list of providers and the endpoints of the enabled ones
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    providers: Vec<Provider>,
    endpoints: Vec<ProviderEndpoint>,
}

impl ProviderRegistry {
    /// Build from configured credentials and base URL overrides
    pub fn from_config(config: &ProvidersConfig) -> Self {
        let mut providers = Vec::with_capacity(ProviderKind::ALL.len());
        let mut endpoints = Vec::new();

        for kind in ProviderKind::ALL {
            let endpoint_config = config.get(kind);
            let credential = endpoint_config.credential();
            providers.push(Provider::new(kind, credential.is_some()));
            if let Some(credential) = credential {
                endpoints.push(ProviderEndpoint::build(
                    kind,
                    credential,
                    endpoint_config.base_url.as_deref(),
                ));
            }
        }

        Self {
            providers,
            endpoints,
        }
    }

    /// Build from `(kind, credential)` pairs with default endpoints
    pub fn from_credentials<'a, I>(credentials: I) -> Self
    where
        I: IntoIterator<Item = (ProviderKind, Option<&'a str>)>,
    {
        let mut config = ProvidersConfig::default();
        for (kind, credential) in credentials {
            config.get_mut(kind).api_key = credential.map(str::to_string);
        }
        Self::from_config(&config)
    }

    /// All providers, enabled or not, in declaration order
    pub fn list_providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn get_provider(&self, kind: ProviderKind) -> Option<&Provider> {
        self.providers.iter().find(|p| p.id == kind)
    }

    /// Enabled providers sorted by priority
    pub fn get_enabled_providers(&self) -> Vec<Provider> {
        let mut enabled: Vec<Provider> =
            self.providers.iter().filter(|p| p.enabled).cloned().collect();
        enabled.sort_by_key(|p| p.priority);
        enabled
    }

    /// Highest priority enabled provider
    pub fn get_default_provider(&self) -> Option<Provider> {
        self.get_enabled_providers().into_iter().next()
    }

    pub fn has_any_provider(&self) -> bool {
        self.providers.iter().any(|p| p.enabled)
    }

    pub fn endpoint(&self, kind: ProviderKind) -> Option<&ProviderEndpoint> {
        self.endpoints.iter().find(|e| e.kind == kind)
    }

    pub fn endpoints(&self) -> &[ProviderEndpoint] {
        &self.endpoints
    }
}
