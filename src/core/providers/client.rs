//! Chat backends
//!
//! [`ChatBackend`] is the seam between the router and the network. [`HttpBackend`] speaks the
//! OpenAI-compatible `/chat/completions` protocol that all three providers accept.

use super::registry::{AuthScheme, Provider, ProviderEndpoint, ProviderKind, ProviderRegistry};
use super::streaming::{DeltaStream, delta_stream};
use super::unified_provider::ProviderError;
use super::zhipu_token;
use crate::core::types::{ChatMessage, MessageRole, now_millis};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Sampling temperature used for persona replies
pub const CHAT_TEMPERATURE: f32 = 0.8;
/// Token cap for health probes
pub const PROBE_MAX_TOKENS: u32 = 10;

/// A finished, non-streamed reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub content: String,
    pub tokens: Option<u32>,
}

/// Something that can run chat completions against a provider
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Run a completion and wait for the whole reply
    async fn complete(
        &self,
        provider: &Provider,
        messages: &[ChatMessage],
    ) -> Result<Completion, ProviderError>;

    /// Open a streaming completion; errors before the first byte are returned here
    async fn stream(
        &self,
        provider: &Provider,
        messages: &[ChatMessage],
    ) -> Result<DeltaStream, ProviderError>;

    /// Cheap request used to decide whether a provider is reachable
    async fn probe(&self, provider: &Provider) -> Result<(), ProviderError>;
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    stream: bool,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ResponseChoice>,
    #[serde(default)]
    usage: Option<ResponseUsage>,
}

#[derive(Deserialize)]
struct ResponseChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ResponseUsage {
    #[serde(default)]
    total_tokens: Option<u32>,
}

/// reqwest based backend for the configured endpoints
pub struct HttpBackend {
    client: reqwest::Client,
    endpoints: HashMap<ProviderKind, ProviderEndpoint>,
}

impl HttpBackend {
    /// Create a backend for every endpoint the registry enabled
    pub fn new(registry: &ProviderRegistry, timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                ProviderError::configuration(
                    "http",
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            client,
            endpoints: registry
                .endpoints()
                .iter()
                .map(|endpoint| (endpoint.kind, endpoint.clone()))
                .collect(),
        })
    }

    fn endpoint(&self, kind: ProviderKind) -> Result<&ProviderEndpoint, ProviderError> {
        self.endpoints
            .get(&kind)
            .ok_or_else(|| ProviderError::configuration(kind.id(), "Provider is not configured"))
    }

    fn bearer(endpoint: &ProviderEndpoint) -> Result<String, ProviderError> {
        match endpoint.auth {
            AuthScheme::Bearer => Ok(endpoint.credential.clone()),
            AuthScheme::ZhipuToken => zhipu_token::bearer_for(&endpoint.credential, now_millis()),
        }
    }

    async fn post(
        &self,
        provider: &Provider,
        body: &ChatCompletionRequest<'_>,
    ) -> Result<reqwest::Response, ProviderError> {
        let name = provider.id.id();
        let endpoint = self.endpoint(provider.id)?;
        let url = endpoint.chat_completions_url();
        debug!("POST {} model={} stream={}", url, body.model, body.stream);

        let response = self
            .client
            .post(&url)
            .bearer_auth(Self::bearer(endpoint)?)
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(name, e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(match status.as_u16() {
                401 | 403 => ProviderError::authentication(name, error_text),
                code => ProviderError::api_error(name, code, error_text),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn complete(
        &self,
        provider: &Provider,
        messages: &[ChatMessage],
    ) -> Result<Completion, ProviderError> {
        let name = provider.id.id();
        let body = ChatCompletionRequest {
            model: provider.model_id,
            messages,
            temperature: Some(CHAT_TEMPERATURE),
            max_tokens: None,
            stream: false,
        };

        let response: ChatCompletionResponse = self
            .post(provider, &body)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::response_parsing(name, e.to_string()))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::response_parsing(name, "Response has no content"))?;

        Ok(Completion {
            content,
            tokens: response.usage.and_then(|usage| usage.total_tokens),
        })
    }

    async fn stream(
        &self,
        provider: &Provider,
        messages: &[ChatMessage],
    ) -> Result<DeltaStream, ProviderError> {
        let body = ChatCompletionRequest {
            model: provider.model_id,
            messages,
            temperature: Some(CHAT_TEMPERATURE),
            max_tokens: None,
            stream: true,
        };

        let response = self.post(provider, &body).await?;
        Ok(delta_stream(provider.id.id(), response.bytes_stream()))
    }

    async fn probe(&self, provider: &Provider) -> Result<(), ProviderError> {
        let messages = [ChatMessage::new(MessageRole::User, "Hi")];
        let body = ChatCompletionRequest {
            model: provider.model_id,
            messages: &messages,
            temperature: None,
            max_tokens: Some(PROBE_MAX_TOKENS),
            stream: false,
        };

        self.post(provider, &body).await.map(|_| ())
    }
}
