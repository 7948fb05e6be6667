//! Configuration validation

mod trait_def;
mod validators;

pub use trait_def::Validate;
