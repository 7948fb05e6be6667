//! Provider router
//!
//! Selects an AI provider per attempt using priority, failure counts and a cooldown window,
//! retries failed attempts, and keeps per-provider failure bookkeeping.

pub mod error;
pub mod execute_impl;
pub mod router;
pub mod selection;
pub mod state;

#[cfg(test)]
mod tests;

pub use error::RouterError;
pub use router::{ChatOptions, ChatResult, ProviderRouter, StreamingChat, build_messages};
pub use state::{ProviderRuntimeState, ProviderStateStore};
