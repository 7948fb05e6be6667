//! Scripted chat backend
//!
//! Replays a per-provider list of outcomes and records every call, so endpoint tests can
//! observe failover and the exact messages sent upstream.

use async_trait::async_trait;
use persona_gateway::core::providers::{
    ChatBackend, Completion, DeltaStream, Provider, ProviderError, ProviderKind,
};
use persona_gateway::core::types::ChatMessage;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Outcome of one scripted call
#[derive(Debug, Clone)]
pub enum Step {
    /// Reply with the text; streams split it on spaces
    Reply(&'static str),
    /// Fail before any output
    Fail,
    /// Stream the text, then fail mid-stream
    BreakAfter(&'static str),
}

#[derive(Default)]
pub struct ScriptedBackend {
    scripts: Mutex<HashMap<ProviderKind, VecDeque<Step>>>,
    fallback: Option<Step>,
    calls: Mutex<Vec<(ProviderKind, Vec<ChatMessage>)>>,
    probe_failures: Vec<ProviderKind>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that answers every call with `text`
    pub fn replying(text: &'static str) -> Self {
        Self {
            fallback: Some(Step::Reply(text)),
            ..Self::default()
        }
    }

    pub fn script(self, kind: ProviderKind, steps: &[Step]) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(kind, steps.iter().cloned().collect());
        self
    }

    pub fn failing_probe(mut self, kind: ProviderKind) -> Self {
        self.probe_failures.push(kind);
        self
    }

    /// Providers called, in order
    pub fn calls(&self) -> Vec<ProviderKind> {
        self.calls.lock().unwrap().iter().map(|(k, _)| *k).collect()
    }

    pub fn last_messages(&self) -> Vec<ChatMessage> {
        self.calls
            .lock()
            .unwrap()
            .last()
            .map(|(_, m)| m.clone())
            .unwrap_or_default()
    }

    fn next(&self, provider: &Provider, messages: &[ChatMessage]) -> Step {
        self.calls
            .lock()
            .unwrap()
            .push((provider.id, messages.to_vec()));
        self.scripts
            .lock()
            .unwrap()
            .get_mut(&provider.id)
            .and_then(|steps| steps.pop_front())
            .or_else(|| self.fallback.clone())
            .unwrap_or(Step::Fail)
    }

    fn failure(provider: &Provider) -> ProviderError {
        ProviderError::api_error(provider.id.id(), 500, "scripted failure")
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn complete(
        &self,
        provider: &Provider,
        messages: &[ChatMessage],
    ) -> Result<Completion, ProviderError> {
        match self.next(provider, messages) {
            Step::Reply(text) | Step::BreakAfter(text) => Ok(Completion {
                content: text.to_string(),
                tokens: None,
            }),
            Step::Fail => Err(Self::failure(provider)),
        }
    }

    async fn stream(
        &self,
        provider: &Provider,
        messages: &[ChatMessage],
    ) -> Result<DeltaStream, ProviderError> {
        let (text, breaks) = match self.next(provider, messages) {
            Step::Reply(text) => (text, false),
            Step::BreakAfter(text) => (text, true),
            Step::Fail => return Err(Self::failure(provider)),
        };

        let mut deltas: Vec<Result<String, ProviderError>> = text
            .split_inclusive(' ')
            .map(|part| Ok(part.to_string()))
            .collect();
        if breaks {
            deltas.push(Err(ProviderError::network(provider.id.id(), "connection reset")));
        }
        Ok(Box::pin(futures::stream::iter(deltas)))
    }

    async fn probe(&self, provider: &Provider) -> Result<(), ProviderError> {
        if self.probe_failures.contains(&provider.id) {
            Err(Self::failure(provider))
        } else {
            Ok(())
        }
    }
}
