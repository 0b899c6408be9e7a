//! # uproto-id
//!
//! Time-ordered 128-bit message identifiers for correlation, ordering, and expiry.
//!
//! ## Schemes
//!
//! - **uProtocol (version 8)**: `epoch_ms << 16 | 8 << 12 | counter` in the high
//!   half; the low half is random, fixed per factory. Identifiers from one
//!   factory share their low half and sort by creation time.
//! - **Time-ordered (version 6)**: RFC 9562 UUIDv6.
//!
//! ## Usage
//!
//! ```
//! use uproto_id::{get_time, is_expired, uprotocol_factory, validate, IdentifierFactory};
//!
//! let id = uprotocol_factory().create_now();
//! assert!(validate(&id).is_ok());
//! assert!(get_time(&id).is_some());
//! assert!(!is_expired(&id, 60_000));
//! ```
//!
//! ## Errors
//!
//! Strict parsing returns [`IdError`]. The lossy readers
//! ([`Identifier::from_str_lossy`], [`Identifier::from_bytes`]) return
//! [`Identifier::NIL`] instead.

mod error;
mod factory;
mod identifier;
mod utils;
mod validator;

pub use error::{IdError, ValidationError};
pub use factory::{
    time_ordered_factory, uprotocol_factory, IdentifierFactory, MonotonicFactory, Scheme,
    TimeOrderedFactory, MAX_COUNT,
};
pub use identifier::Identifier;
pub use utils::*;
pub use validator::{validate, IdentifierValidator, ValidationResult};

/// Re-export uuid for consumers that need raw UUID operations
pub use uuid::{Uuid, Variant};
