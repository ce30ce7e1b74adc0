//! Error types for rs-facebed.
//!
//! This module defines the error types returned by extraction operations.
//! Every entry point either produces a complete post or one of these.

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No embedded JSON block matched the fingerprint for the wanted shape.
    #[error("cannot find {0} json block")]
    BlockNotFound(&'static str),

    /// Every root-node strategy came up empty.
    #[error("cannot process post: no root node strategy matched")]
    StrategyExhausted,

    /// A required field is absent or has the wrong type once a node is located.
    #[error("missing field: {0}")]
    FieldMissing(String),

    /// A key lookup found no object containing the key.
    #[error("no object with key `{0}`")]
    EmptyResult(String),

    /// A fingerprinted block is not valid JSON.
    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Options failed validation.
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

impl Error {
    /// Shorthand for a [`Error::FieldMissing`] naming a dotted path.
    pub(crate) fn missing(path: impl Into<String>) -> Self {
        Self::FieldMissing(path.into())
    }
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
