//! Provider router core structure

use super::state::{ProviderRuntimeState, ProviderStateStore};
use crate::config::models::router::RouterConfig;
use crate::core::providers::{ChatBackend, DeltaStream, ProviderKind, ProviderRegistry};
use crate::core::types::ChatMessage;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Per-call routing options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatOptions {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Tried first when enabled and not cooling down
    pub preferred_provider: Option<ProviderKind>,
    /// When false the first selected provider is used for every attempt
    pub enable_failover: bool,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            max_retries: 2,
            preferred_provider: None,
            enable_failover: true,
        }
    }
}

/// Assembled reply of a routed call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatResult {
    pub content: String,
    pub provider: ProviderKind,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<u32>,
}

/// An opened streaming reply
pub struct StreamingChat {
    pub provider: ProviderKind,
    pub model: String,
    pub stream: DeltaStream,
}

/// Picks a provider per attempt and keeps failure bookkeeping
pub struct ProviderRouter {
    pub(super) registry: Arc<ProviderRegistry>,
    pub(super) backend: Arc<dyn ChatBackend>,
    pub(super) state: ProviderStateStore,
    pub(super) cooldown_ms: i64,
    pub(super) defaults: ChatOptions,
}

impl ProviderRouter {
    /// Create a router with the cooldown and retry defaults from `config`
    pub fn new(
        registry: Arc<ProviderRegistry>,
        backend: Arc<dyn ChatBackend>,
        config: &RouterConfig,
    ) -> Self {
        Self {
            registry,
            backend,
            state: ProviderStateStore::new(),
            cooldown_ms: i64::try_from(config.cooldown().as_millis()).unwrap_or(i64::MAX),
            defaults: ChatOptions {
                max_retries: config.max_retries,
                preferred_provider: None,
                enable_failover: config.enable_failover,
            },
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Options built from configuration, for callers without their own
    pub fn default_options(&self) -> ChatOptions {
        self.defaults.clone()
    }

    pub fn runtime_state(&self, kind: ProviderKind) -> ProviderRuntimeState {
        self.state.get(kind)
    }

    /// Failure count of every registered provider
    pub fn failure_stats(&self) -> BTreeMap<ProviderKind, u32> {
        self.registry
            .list_providers()
            .iter()
            .map(|p| (p.id, self.state.get(p.id).failure_count))
            .collect()
    }

    pub fn reset_all_failures(&self) {
        self.state.reset_all();
    }
}

/// Outgoing list: the system prompt followed by the conversation
pub fn build_messages(system_prompt: &str, messages: &[ChatMessage]) -> Vec<ChatMessage> {
    let mut outgoing = Vec::with_capacity(messages.len() + 1);
    outgoing.push(ChatMessage::system(system_prompt));
    outgoing.extend_from_slice(messages);
    outgoing
}
