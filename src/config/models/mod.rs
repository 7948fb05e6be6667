//! Configuration data models
//!
//! This module defines all configuration structures used throughout the gateway.

pub mod provider;
pub mod rate_limit;
pub mod router;
pub mod server;
pub mod storage;

pub use provider::*;
pub use rate_limit::*;
pub use router::*;
pub use server::*;
pub use storage::*;

/// Default bind host
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

/// Default true value
pub fn default_true() -> bool {
    true
}
