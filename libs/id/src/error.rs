//! Error types for identifier parsing and validation.

use thiserror::Error;

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The identifier string is empty.
    #[error("identifier cannot be empty")]
    Empty,

    /// The identifier is not a 32-hex-digit UUID string.
    #[error("invalid identifier format: {message}")]
    InvalidFormat { message: String },

    /// The identifier bytes are not exactly 16 bytes long.
    #[error("invalid identifier length: expected 16 bytes, got {0}")]
    InvalidLength(usize),
}

impl IdError {
    /// Returns true if this error indicates the input was empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, IdError::Empty)
    }
}

/// A failed identifier validation.
///
/// When several checks fail their messages are joined with commas.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
