//! Classification and validation of addresses.
//!
//! Every codec consults these predicates to decide whether an address can be
//! written in its form. Validation never panics; it returns a
//! [`ValidationError`] carrying the reason.

use std::net::IpAddr;

use crate::authority::AuthorityNumber;
use crate::error::ValidationError;
use crate::uri::Uri;

const EMPTY_URI: &str = "Uri is empty.";
const MISSING_AUTHORITY: &str = "Uri is remote missing uAuthority.";
const MISSING_ENTITY_NAME: &str = "Uri is missing uSoftware Entity name.";
const INVALID_RPC_METHOD: &str =
    "Invalid RPC method uri. Uri should be the method to be called, or method from response.";
const INVALID_RPC_RESPONSE: &str = "Invalid RPC response type.";

/// Result of validating an address.
pub type ValidationResult = Result<(), ValidationError>;

/// Address classification and validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct UriValidator;

impl UriValidator {
    /// Checks the basic shape every usable address needs.
    pub fn validate(uri: &Uri) -> ValidationResult {
        if Self::is_empty(uri) {
            return Err(ValidationError::new(EMPTY_URI));
        }
        if !uri.authority.is_local() && !uri.authority.is_remote() {
            return Err(ValidationError::new(MISSING_AUTHORITY));
        }
        if uri.entity.name().trim().is_empty() {
            return Err(ValidationError::new(MISSING_ENTITY_NAME));
        }
        Ok(())
    }

    /// Validates `uri` and requires it to address an RPC method.
    pub fn validate_rpc_method(uri: &Uri) -> ValidationResult {
        Self::validate(uri)?;
        if !Self::is_rpc_method(uri) {
            return Err(ValidationError::new(INVALID_RPC_METHOD));
        }
        Ok(())
    }

    /// Validates `uri` and requires it to address an RPC reply channel.
    pub fn validate_rpc_response(uri: &Uri) -> ValidationResult {
        Self::validate(uri)?;
        if !Self::is_rpc_response(uri) {
            return Err(ValidationError::new(INVALID_RPC_RESPONSE));
        }
        Ok(())
    }

    /// True if every component is unset.
    pub fn is_empty(uri: &Uri) -> bool {
        uri.authority.is_local() && uri.entity.is_empty() && uri.resource.is_empty()
    }

    pub fn is_local(uri: &Uri) -> bool {
        uri.authority.is_local()
    }

    pub fn is_remote(uri: &Uri) -> bool {
        uri.authority.is_remote()
    }

    /// True if `uri` has every name the long form needs.
    ///
    /// An empty entity is allowed only under a named authority: a local path
    /// with no entity name would read back as a remote one.
    pub fn is_long_form(uri: &Uri) -> bool {
        let entity_ok =
            uri.entity.is_long_form() || (uri.entity.is_empty() && uri.authority.has_name());
        !Self::is_empty(uri)
            && uri.authority.is_long_form()
            && entity_ok
            && uri.resource.is_long_form()
    }

    /// True if `uri` has every number the micro form needs.
    pub fn is_micro_form(uri: &Uri) -> bool {
        !Self::is_empty(uri)
            && uri.entity.is_micro_form()
            && uri.resource.is_micro_form()
            && uri.authority.is_micro_form()
    }

    /// True if `uri` can be written in the short form and read back unchanged.
    ///
    /// Id authorities are written as text, so the id must be valid UTF-8,
    /// free of `/`, and must not itself read as an IP address.
    pub fn is_short_form(uri: &Uri) -> bool {
        if !Self::is_micro_form(uri) {
            return false;
        }
        match uri.authority.number() {
            Some(AuthorityNumber::Id(id)) => std::str::from_utf8(id).is_ok_and(|s| {
                !s.trim().is_empty() && !s.contains('/') && s.parse::<IpAddr>().is_err()
            }),
            _ => true,
        }
    }

    /// True if `uri` is usable in both long and micro form.
    pub fn is_resolved(uri: &Uri) -> bool {
        Self::is_long_form(uri) && Self::is_micro_form(uri)
    }

    /// True if `uri` addresses an RPC method.
    pub fn is_rpc_method(uri: &Uri) -> bool {
        !Self::is_empty(uri) && uri.resource.is_rpc_method()
    }

    /// True if `uri` addresses an RPC reply channel.
    pub fn is_rpc_response(uri: &Uri) -> bool {
        !Self::is_empty(uri) && uri.resource.is_rpc_response()
    }
}
