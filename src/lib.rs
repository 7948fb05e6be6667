//! # persona-gateway
//!
//! Chat backend for a persona tribute site.
//!
//! - **Provider routing**: Zhipu, DeepSeek and OpenAI behind one router with priority
//!   ordering, failure cooldown and retry with failover
//! - **Rate limiting**: fixed windows per client IP and per session
//! - **Content safety**: sensitive-word and advertising screening with link redaction
//! - **Persona**: fixed system prompt with brand and preset additions
//! - **Streaming**: replies relayed to the browser as server-sent events
//!
//! ## Gateway Mode
//!
//! ```rust,no_run
//! use persona_gateway::{Config, server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(None).await?;
//!     server::run_server(config).await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod services;
pub mod utils;

pub use config::Config;
pub use utils::error::{GatewayError, Result};

pub use core::persona::{build_system_prompt, extract_quote};
pub use core::providers::{ChatBackend, ProviderKind, ProviderRegistry};
pub use core::rate_limiter::RateLimiter;
pub use core::router::{ChatOptions, ProviderRouter};
pub use core::security::ContentSafetyFilter;
pub use core::types::{ChatMessage, MessageRole};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
