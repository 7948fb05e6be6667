//! Execution with retry and failover

use super::error::RouterError;
use super::router::{ChatOptions, ChatResult, ProviderRouter, StreamingChat, build_messages};
use crate::core::providers::{Provider, ProviderError};
use crate::core::types::{ChatMessage, now_millis};
use std::future::Future;
use tracing::{info, warn};

impl ProviderRouter {
    /// Run `operation` against selected providers until it succeeds or attempts run out
    ///
    /// Every failure is recorded against the provider that was actually attempted. With
    /// failover disabled the provider chosen for the first attempt is reused, and an error
    /// that cannot clear on retry (bad credentials, misconfiguration) ends the loop early.
    pub async fn execute<T, F, Fut>(
        &self,
        options: &ChatOptions,
        operation: F,
    ) -> Result<(T, Provider), RouterError>
    where
        F: Fn(Provider) -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let max_attempts = options.max_retries.saturating_add(1);
        let mut pinned: Option<Provider> = None;
        let mut last_error: Option<ProviderError> = None;
        let mut attempts = 0;

        for attempt in 1..=max_attempts {
            attempts = attempt;
            let provider = match &pinned {
                Some(provider) => provider.clone(),
                None => self.select_provider_at(options.preferred_provider, now_millis())?,
            };
            if !options.enable_failover {
                pinned = Some(provider.clone());
            }

            match operation(provider.clone()).await {
                Ok(value) => {
                    self.state.record_success(provider.id);
                    info!(
                        "Provider {} succeeded on attempt {}/{}",
                        provider.id, attempt, max_attempts
                    );
                    return Ok((value, provider));
                }
                Err(err) => {
                    self.state.record_failure(provider.id, now_millis());
                    warn!(
                        "Provider {} failed on attempt {}/{}: {}",
                        provider.id, attempt, max_attempts, err
                    );
                    let stuck = pinned.is_some() && !err.is_retryable();
                    last_error = Some(err);
                    if stuck {
                        warn!("Provider {} cannot recover and failover is disabled", provider.id);
                        break;
                    }
                }
            }
        }

        match last_error {
            Some(last) => Err(RouterError::AllProvidersExhausted { attempts, last }),
            None => Err(RouterError::NoProviderConfigured),
        }
    }

    /// Routed non-streaming completion
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        system_prompt: &str,
        options: &ChatOptions,
    ) -> Result<ChatResult, RouterError> {
        let outgoing = build_messages(system_prompt, messages);
        let outgoing = &outgoing;
        let backend = &self.backend;

        let (completion, provider) = self
            .execute(options, |provider| async move {
                backend.complete(&provider, outgoing).await
            })
            .await?;

        Ok(ChatResult {
            content: completion.content,
            provider: provider.id,
            model: provider.model_id.to_string(),
            tokens: completion.tokens,
        })
    }

    /// Routed streaming completion; only opening the stream is retried
    pub async fn chat_stream(
        &self,
        messages: &[ChatMessage],
        system_prompt: &str,
        options: &ChatOptions,
    ) -> Result<StreamingChat, RouterError> {
        let outgoing = build_messages(system_prompt, messages);
        let outgoing = &outgoing;
        let backend = &self.backend;

        let (stream, provider) = self
            .execute(options, |provider| async move {
                backend.stream(&provider, outgoing).await
            })
            .await?;

        Ok(StreamingChat {
            provider: provider.id,
            model: provider.model_id.to_string(),
            stream,
        })
    }
}
