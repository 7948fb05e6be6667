//! Common test utilities for persona-gateway

pub mod backend;
pub mod fixtures;

pub use backend::{ScriptedBackend, Step};
pub use fixtures::{chat_body, test_config, test_state};
pub use sse::{sse_content, sse_data_lines};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
