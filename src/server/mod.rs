//! HTTP server implementation
//!
//! This module provides the HTTP server, its shared state and the `/api` routes.

pub mod builder;
pub mod routes;
pub mod server;
pub mod state;
pub mod types;
mod utils;

pub use builder::{ServerBuilder, run_server};
pub use server::HttpServer;
pub use state::AppState;
pub use utils::{UNKNOWN_IP, client_ip};
