//! Router tests module
//!
//! Router scenarios run against a scripted in-memory backend.


use crate::config::models::router::RouterConfig;
use crate::core::providers::{
    ChatBackend, Completion, DeltaStream, Provider, ProviderError, ProviderKind, ProviderRegistry,
};
use crate::core::router::ProviderRouter;
use crate::core::types::ChatMessage;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Outcome of one scripted call
#[derive(Clone)]
pub(super) enum Step {
    Reply(&'static str),
    Fail,
    /// Credential rejected upstream
    Reject,
}

/// Backend that replays a per-provider script and records every call
#[derive(Default)]
pub(super) struct ScriptedBackend {
    scripts: Mutex<HashMap<ProviderKind, VecDeque<Step>>>,
    calls: Mutex<Vec<(ProviderKind, Vec<ChatMessage>)>>,
}

impl ScriptedBackend {
    pub(super) fn new() -> Self {
        Self::default()
    }

    pub(super) fn script(self, kind: ProviderKind, steps: &[Step]) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(kind, steps.iter().cloned().collect());
        self
    }

    pub(super) fn calls(&self) -> Vec<ProviderKind> {
        self.calls.lock().unwrap().iter().map(|(k, _)| *k).collect()
    }

    pub(super) fn last_messages(&self) -> Vec<ChatMessage> {
        self.calls
            .lock()
            .unwrap()
            .last()
            .map(|(_, m)| m.clone())
            .unwrap_or_default()
    }

    fn next(&self, provider: &Provider, messages: &[ChatMessage]) -> Result<&'static str, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((provider.id, messages.to_vec()));
        let step = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(&provider.id)
            .and_then(|steps| steps.pop_front())
            .unwrap_or(Step::Fail);
        match step {
            Step::Reply(text) => Ok(text),
            Step::Fail => Err(ProviderError::api_error(provider.id.id(), 500, "scripted failure")),
            Step::Reject => Err(ProviderError::authentication(provider.id.id(), "invalid key")),
        }
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn complete(
        &self,
        provider: &Provider,
        messages: &[ChatMessage],
    ) -> Result<Completion, ProviderError> {
        let text = self.next(provider, messages)?;
        Ok(Completion {
            content: text.to_string(),
            tokens: Some(text.chars().count() as u32),
        })
    }

    async fn stream(
        &self,
        provider: &Provider,
        messages: &[ChatMessage],
    ) -> Result<DeltaStream, ProviderError> {
        let text = self.next(provider, messages)?;
        let deltas: Vec<Result<String, ProviderError>> = text
            .split_inclusive(' ')
            .map(|part| Ok(part.to_string()))
            .collect();
        Ok(Box::pin(futures::stream::iter(deltas)))
    }

    async fn probe(&self, _provider: &Provider) -> Result<(), ProviderError> {
        Ok(())
    }
}

pub(super) fn registry(kinds: &[ProviderKind]) -> Arc<ProviderRegistry> {
    Arc::new(ProviderRegistry::from_credentials(
        kinds.iter().map(|kind| (*kind, Some("id.secret"))),
    ))
}

pub(super) fn router(kinds: &[ProviderKind], backend: Arc<ScriptedBackend>) -> ProviderRouter {
    ProviderRouter::new(registry(kinds), backend, &RouterConfig::default())
}
