//! Per-provider runtime state
//!
//! Failure bookkeeping lives here and nowhere else; the router reads and writes it only
//! through [`ProviderStateStore`].

use crate::core::providers::ProviderKind;
use dashmap::DashMap;
use serde::Serialize;

/// Failure tracking for one provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRuntimeState {
    pub failure_count: u32,
    /// Epoch millis of the most recent failure
    pub last_failure_at: Option<i64>,
}

impl ProviderRuntimeState {
    /// In cooldown while less than `cooldown_ms` has passed since the last failure
    pub fn is_in_cooldown(&self, now: i64, cooldown_ms: i64) -> bool {
        self.last_failure_at
            .is_some_and(|failed_at| now - failed_at < cooldown_ms)
    }
}

/// Concurrent map of runtime state keyed by provider
#[derive(Debug, Default)]
pub struct ProviderStateStore {
    states: DashMap<ProviderKind, ProviderRuntimeState>,
}

impl ProviderStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a provider's state; untouched providers read as default
    pub fn get(&self, kind: ProviderKind) -> ProviderRuntimeState {
        self.states.get(&kind).map(|s| *s).unwrap_or_default()
    }

    pub fn record_failure(&self, kind: ProviderKind, now: i64) {
        let mut state = self.states.entry(kind).or_default();
        state.failure_count = state.failure_count.saturating_add(1);
        state.last_failure_at = Some(now);
    }

    /// Clears the failure count; the cooldown timestamp is left as is
    pub fn record_success(&self, kind: ProviderKind) {
        if let Some(mut state) = self.states.get_mut(&kind) {
            state.failure_count = 0;
        }
    }

    pub fn reset_all(&self) {
        self.states.clear();
    }
}
