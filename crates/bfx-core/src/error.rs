//! # Error Types
//!
//! Top-level error for the BlockFinaX crates. Domain crates define their
//! own narrower enums and convert into this one at crate boundaries.

use thiserror::Error;

/// Top-level error type for BlockFinaX.
#[derive(Error, Debug)]
pub enum BfxError {
    /// A value failed validation (identifier, timestamp, status code).
    #[error("validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
