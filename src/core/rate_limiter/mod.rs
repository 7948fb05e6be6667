//! Rate limiting implementation
//!
//! Fixed-window counters keyed by client IP and by session id. Entries live in a
//! [`CounterStore`] and are swept periodically.

mod limiter;
mod store;
mod types;
mod utils;


pub use limiter::RateLimiter;
pub use store::{CounterStore, MemoryStore};
pub use types::{
    CleanupReport, RateLimitEntry, RateLimitResult, RateLimitScope, RateLimitStatus, ScopeLimit,
};
