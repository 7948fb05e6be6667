//! Counter storage behind the rate limiter

use super::types::RateLimitEntry;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Storage for per-identifier rate limit entries
///
/// Implementations only need to be consistent for single-key operations; the limiter
/// serializes its read-modify-write sequences itself.
#[async_trait]
pub trait CounterStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<RateLimitEntry>;

    async fn put(&self, key: &str, entry: RateLimitEntry);

    /// Returns whether an entry was present
    async fn remove(&self, key: &str) -> bool;

    /// Drops every entry for which `keep` is false and returns how many were dropped
    async fn retain(
        &self,
        keep: &(dyn for<'e> Fn(&'e RateLimitEntry) -> bool + Send + Sync),
    ) -> usize;

    async fn len(&self) -> usize;
}

/// In-process store; state is lost on restart
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, RateLimitEntry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CounterStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<RateLimitEntry> {
        self.entries.read().await.get(key).copied()
    }

    async fn put(&self, key: &str, entry: RateLimitEntry) {
        let mut entries = self.entries.write().await;
        // Avoid String allocation if key already exists
        if let Some(existing) = entries.get_mut(key) {
            *existing = entry;
        } else {
            entries.insert(key.to_string(), entry);
        }
    }

    async fn remove(&self, key: &str) -> bool {
        self.entries.write().await.remove(key).is_some()
    }

    async fn retain(
        &self,
        keep: &(dyn for<'e> Fn(&'e RateLimitEntry) -> bool + Send + Sync),
    ) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| keep(&*entry));
        before - entries.len()
    }

    async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
