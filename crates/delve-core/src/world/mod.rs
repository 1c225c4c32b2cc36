//! World configuration
//!
//! Contains generation options and the error types shared across the crate.

pub mod errors;
pub mod options;

pub use errors::{GenerationError, NavError, OptionsError};
pub use options::GenerationOptions;
