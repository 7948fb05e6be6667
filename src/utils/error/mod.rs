//! Error handling for the gateway
//!
//! Every failure that reaches an HTTP client goes through `GatewayError`, which renders the
//! stable `{error, message, resetAt?}` body.

mod conversions;
mod helpers;
mod response;
mod types;

pub use response::{ErrorResponse, SERVICE_UNAVAILABLE_MESSAGE, SERVICE_UNCONFIGURED_MESSAGE};
pub use types::{GatewayError, Result};
