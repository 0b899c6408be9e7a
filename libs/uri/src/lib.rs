//! # uproto-uri
//!
//! Addressing for publish/subscribe and RPC messaging.
//!
//! ## Address Model
//!
//! A [`Uri`] names a resource of a software entity deployed at an authority:
//!
//! - [`Authority`]: local, or remote by name, IP address, id, or name plus number
//! - [`Entity`]: the service, by name and/or 16-bit id, with an optional version
//! - [`Resource`]: a topic, an RPC method, or the RPC reply channel
//!
//! ## Wire Forms
//!
//! Each address may be written in up to three forms:
//!
//! - long: `//vcu.my_car_vin/body.access/1/door.front_left#Door`
//! - micro: 8 to 264 bytes, see [`MicroUriCodec`]
//! - short: `//192.168.1.100/29999/254/19999`
//!
//! Which forms are available is decided by [`UriValidator`]. An address that
//! is usable in both long and micro form is *resolved*.
//!
//! ## Errors
//!
//! Building components with out-of-range numbers fails with [`UriError`].
//! Decoding never fails: malformed input decodes to `Uri::default()`, so a
//! single [`Uri::is_empty`] check covers every decoding problem.

mod authority;
pub mod codec;
mod entity;
mod error;
mod resource;
mod uri;
mod validator;

pub use authority::{AddressType, Authority, AuthorityNumber, MAX_AUTHORITY_ID_LEN};
pub use codec::{resolve, LongUriCodec, MicroUriCodec, ShortUriCodec, UriCodec};
pub use entity::Entity;
pub use error::{UriError, ValidationError};
pub use resource::{Resource, MIN_TOPIC_ID, RPC_RESOURCE_NAME, RPC_RESPONSE_INSTANCE};
pub use uri::Uri;
pub use validator::{UriValidator, ValidationResult};
