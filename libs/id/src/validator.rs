//! Structural validation of identifiers.
//!
//! Each scheme checks version, variant, and time independently; all failures
//! are reported together as one comma-joined message.

use uuid::Variant;

use crate::error::ValidationError;
use crate::identifier::Identifier;
use crate::utils::{get_time, get_variant, get_version, is_uprotocol, is_uuidv6, Version};

/// Result of validating an identifier.
pub type ValidationResult = Result<(), ValidationError>;

/// Per-scheme identifier validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierValidator {
    /// RFC time-ordered identifiers.
    TimeOrdered,
    /// Custom monotonic identifiers.
    UProtocol,
    /// Anything else; always fails.
    Invalid,
}

impl IdentifierValidator {
    /// Picks the validator matching the scheme of `id`.
    pub fn for_id(id: &Identifier) -> Self {
        if is_uuidv6(id) {
            IdentifierValidator::TimeOrdered
        } else if is_uprotocol(id) {
            IdentifierValidator::UProtocol
        } else {
            IdentifierValidator::Invalid
        }
    }

    /// Runs every check and joins the failures.
    pub fn validate(&self, id: &Identifier) -> ValidationResult {
        let failures: Vec<String> = [
            self.validate_version(id),
            self.validate_variant(id),
            self.validate_time(id),
        ]
        .into_iter()
        .filter_map(|result| result.err())
        .map(|e| e.message().to_string())
        .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(failures.join(",")))
        }
    }

    pub fn validate_version(&self, id: &Identifier) -> ValidationResult {
        let version = get_version(id);
        match self {
            IdentifierValidator::TimeOrdered if version == Version::TimeOrdered => Ok(()),
            IdentifierValidator::TimeOrdered => Err(ValidationError::new("Invalid UUIDv6 Version")),
            IdentifierValidator::UProtocol if version == Version::UProtocol => Ok(()),
            IdentifierValidator::UProtocol => Err(ValidationError::new("Invalid UUIDv8 Version")),
            IdentifierValidator::Invalid => Err(ValidationError::new("Invalid UUID Version")),
        }
    }

    pub fn validate_variant(&self, id: &Identifier) -> ValidationResult {
        match self {
            IdentifierValidator::TimeOrdered if get_variant(id) != Variant::RFC4122 => {
                Err(ValidationError::new("Invalid UUIDv6 Variant"))
            }
            _ => Ok(()),
        }
    }

    pub fn validate_time(&self, id: &Identifier) -> ValidationResult {
        match get_time(id) {
            Some(time) if time > 0 => Ok(()),
            _ => Err(ValidationError::new("Invalid UUID Time")),
        }
    }
}

/// Validates `id` with the validator for its scheme.
pub fn validate(id: &Identifier) -> ValidationResult {
    IdentifierValidator::for_id(id).validate(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{IdentifierFactory, MonotonicFactory, TimeOrderedFactory};

    #[test]
    fn test_valid_uprotocol() {
        let id = MonotonicFactory::new().create_now();
        assert_eq!(IdentifierValidator::for_id(&id), IdentifierValidator::UProtocol);
        assert!(validate(&id).is_ok());
    }

    #[test]
    fn test_valid_uuidv6() {
        let id = TimeOrderedFactory::new().create_now();
        assert_eq!(IdentifierValidator::for_id(&id), IdentifierValidator::TimeOrdered);
        assert!(validate(&id).is_ok());
    }

    #[test]
    fn test_nil_aggregates_failures() {
        let err = validate(&Identifier::NIL).unwrap_err();
        assert_eq!(err.message(), "Invalid UUID Version,Invalid UUID Time");
    }

    #[test]
    fn test_random_uuid_is_invalid() {
        let id: Identifier = uuid::Uuid::new_v4().into();
        assert_eq!(IdentifierValidator::for_id(&id), IdentifierValidator::Invalid);
        assert!(validate(&id).is_err());
    }

    #[test]
    fn test_uprotocol_zero_time_fails_time_check() {
        let id = Identifier::new(8 << 12, 0x8000_0000_0000_0000);
        let err = validate(&id).unwrap_err();
        assert_eq!(err.message(), "Invalid UUID Time");
    }

    #[test]
    fn test_v6_validator_reports_each_failure() {
        let v8 = MonotonicFactory::new().create_now();
        let err = IdentifierValidator::TimeOrdered.validate(&v8).unwrap_err();
        assert_eq!(err.message(), "Invalid UUIDv6 Version");

        let wrong_variant = Identifier::new(0x1EC9_414C_232A_6B00, 0);
        let err = IdentifierValidator::TimeOrdered
            .validate(&wrong_variant)
            .unwrap_err();
        assert_eq!(err.message(), "Invalid UUIDv6 Variant");
    }

    #[test]
    fn test_v8_validator_rejects_v6() {
        let v6 = TimeOrderedFactory::new().create_now();
        let err = IdentifierValidator::UProtocol.validate(&v6).unwrap_err();
        assert_eq!(err.message(), "Invalid UUIDv8 Version");
    }
}
