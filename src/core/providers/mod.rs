//! AI provider integration
//!
//! A closed registry of providers, an OpenAI-compatible HTTP backend with streaming support,
//! and health probing.

pub mod client;
pub mod health;
pub mod registry;
pub mod streaming;
pub mod unified_provider;
pub mod zhipu_token;

pub use client::{CHAT_TEMPERATURE, ChatBackend, Completion, HttpBackend};
pub use health::{HealthSummary, ProviderHealthChecker, ProviderHealthDetail};
pub use registry::{AuthScheme, Provider, ProviderEndpoint, ProviderKind, ProviderRegistry};
pub use streaming::{ChatSseParser, DeltaStream, delta_stream};
pub use unified_provider::ProviderError;
