//! Configuration and state factories

use persona_gateway::config::Config;
use persona_gateway::core::providers::{ChatBackend, ProviderKind, ProviderRegistry};
use persona_gateway::server::AppState;
use serde_json::{Value, json};
use std::path::Path;
use std::sync::Arc;

/// Default configuration with credentials for `kinds` and data under `data_dir`
pub fn test_config(kinds: &[ProviderKind], data_dir: &Path) -> Config {
    let mut config = Config::default();
    for kind in kinds {
        config.providers.get_mut(*kind).api_key = Some(format!("{}-id.secret", kind.id()));
    }
    config.storage.data_dir = data_dir.to_path_buf();
    config
}

/// Application state serving chats from `backend`
pub fn test_state(config: Config, backend: Arc<dyn ChatBackend>) -> AppState {
    let registry = ProviderRegistry::from_config(&config.providers);
    AppState::with_backend(config, registry, backend)
}

/// Chat request body for a single user message
pub fn chat_body(content: &str) -> Value {
    json!({ "messages": [{ "role": "user", "content": content }] })
}
