//! Integration tests for persona-gateway
//!
//! These tests drive the crate through its public API.

pub mod analytics_endpoint_tests;
pub mod config_tests;
pub mod error_handling_tests;
pub mod health_endpoint_tests;
pub mod http_backend_tests;
pub mod visit_endpoint_tests;
