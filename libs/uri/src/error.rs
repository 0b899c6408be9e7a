//! Error types for address construction and validation.

use thiserror::Error;

/// Errors raised while constructing address components.
///
/// Decoding wire data never produces these; codecs return an empty value instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UriError {
    /// A numeric field does not fit its wire width.
    #[error("{field} out of range: {value} (max {max})")]
    OutOfRange {
        field: &'static str,
        value: u32,
        max: u32,
    },

    /// IP address bytes are neither 4 nor 16 bytes long.
    #[error("invalid IP address length: {0} bytes")]
    InvalidIpLength(usize),

    /// Authority id is empty or longer than 255 bytes.
    #[error("invalid authority id length: {0} bytes (expected 1-255)")]
    InvalidIdLength(usize),
}

impl UriError {
    /// Returns true if this error is a numeric range violation.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, UriError::OutOfRange { .. })
    }

    /// Returns true if this error concerns the authority payload.
    pub fn is_authority_error(&self) -> bool {
        matches!(
            self,
            UriError::InvalidIpLength(_) | UriError::InvalidIdLength(_)
        )
    }
}

/// A failed validation, carrying the human-readable reason.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    /// Creates a validation failure with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Checks that `value` fits in `max`, naming `field` in the error otherwise.
pub(crate) fn check_range(field: &'static str, value: u32, max: u32) -> Result<u32, UriError> {
    if value > max {
        return Err(UriError::OutOfRange { field, value, max });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_range_accepts_max() {
        assert_eq!(check_range("entity id", 65535, 65535), Ok(65535));
    }

    #[test]
    fn test_check_range_rejects_overflow() {
        let err = check_range("version", 256, 255).unwrap_err();
        assert!(err.is_out_of_range());
        assert_eq!(err.to_string(), "version out of range: 256 (max 255)");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("Uri is empty.");
        assert_eq!(err.message(), "Uri is empty.");
        assert_eq!(err.to_string(), "Uri is empty.");
    }
}
