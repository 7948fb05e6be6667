//! Core functionality for the gateway
//!
//! Provider access and routing, rate limiting, content safety and the chat persona.

pub mod persona;
pub mod providers;
pub mod rate_limiter;
pub mod router;
pub mod security;
pub mod types;
