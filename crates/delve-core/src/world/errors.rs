//! Error types for generation, navigation queries and options loading
//!
//! Expected negative outcomes during corridor routing (an unresolvable chunk,
//! an already-connected pair of rooms) are not errors and never show up here.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use thiserror::Error;

/// Errors reported by the generation entry point
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("map {width}x{height} is too small: both sides must be at least {min}")]
    MapTooSmall { width: i32, height: i32, min: i32 },

    #[error("invalid generation options: {0}")]
    InvalidOptions(#[from] OptionsError),

    #[error("navigation failure: {0}")]
    Navigation(#[from] NavError),
}

/// Errors from navigation graph queries
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavError {
    /// The cell was never registered in the graph
    #[error("location ({x}, {y}) is not in the navigation graph")]
    LocationNotFound { x: i32, y: i32 },
}

/// Options parsing and validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("invalid value '{value}' for option '{name}'")]
    InvalidValue { name: String, value: String },

    #[error("missing value for option '{0}'")]
    MissingValue(String),
}
