//! Provider selection logic

use super::error::RouterError;
use super::router::ProviderRouter;
use crate::core::providers::{Provider, ProviderKind};
use crate::core::types::now_millis;

impl ProviderRouter {
    pub fn is_in_cooldown(&self, kind: ProviderKind, now: i64) -> bool {
        self.state.get(kind).is_in_cooldown(now, self.cooldown_ms)
    }

    /// Select a provider for one attempt
    pub fn select_provider(
        &self,
        preferred: Option<ProviderKind>,
    ) -> Result<Provider, RouterError> {
        self.select_provider_at(preferred, now_millis())
    }

    /// Select a provider as of `now`
    ///
    /// # Flow
    ///
    /// 1. An enabled preferred provider outside cooldown wins
    /// 2. Sort enabled providers by (failure count, priority)
    /// 3. Take the first outside cooldown
    /// 4. If all are cooling down, take the first anyway
    pub fn select_provider_at(
        &self,
        preferred: Option<ProviderKind>,
        now: i64,
    ) -> Result<Provider, RouterError> {
        let mut enabled = self.registry.get_enabled_providers();
        if enabled.is_empty() {
            return Err(RouterError::NoProviderConfigured);
        }

        if let Some(kind) = preferred {
            if let Some(provider) = enabled.iter().find(|p| p.id == kind) {
                if !self.is_in_cooldown(kind, now) {
                    return Ok(provider.clone());
                }
            }
        }

        // Stable sort keeps declaration order for full ties
        enabled.sort_by_key(|p| (self.state.get(p.id).failure_count, p.priority));

        let index = enabled
            .iter()
            .position(|p| !self.is_in_cooldown(p.id, now))
            .unwrap_or(0);
        Ok(enabled.swap_remove(index))
    }
}
