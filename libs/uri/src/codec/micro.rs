//! Compact binary form.
//!
//! All multi-byte fields are big-endian.
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |  UP_VERSION   |     TYPE      |          RESOURCE_ID          |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |           ENTITY_ID           |  ENTITY_MAJOR |    UNUSED     |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |  ID_LEN (id)  |  AUTHORITY (4, 16, or ID_LEN bytes; none if local) ...
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! A major version of 0 is written when the entity has none, and read back
//! as "no version".

use std::net::IpAddr;

use tracing::debug;

use super::UriCodec;
use crate::authority::{ip_from_bytes, AddressType, Authority, AuthorityNumber};
use crate::entity::Entity;
use crate::resource::Resource;
use crate::uri::Uri;

/// Format version carried in byte 0.
pub const MICRO_FORMAT_VERSION: u8 = 0x01;

/// Length of a micro-form address with a local authority.
pub const LOCAL_MICRO_URI_LENGTH: usize = 8;

/// Offset of the id length byte for id-based authorities.
const ID_LEN_OFFSET: usize = 8;

/// Codec for the micro (binary) form.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroUriCodec;

impl UriCodec for MicroUriCodec {
    type Encoded = [u8];

    fn serialize(&self, uri: &Uri) -> Vec<u8> {
        if uri.is_empty() || !uri.is_micro_form() {
            return Vec::new();
        }
        let (Some(entity_id), Some(resource_id)) = (uri.entity.id(), uri.resource.id()) else {
            return Vec::new();
        };
        let Some(address_type) = uri.authority.address_type() else {
            return Vec::new();
        };

        let mut out = Vec::with_capacity(LOCAL_MICRO_URI_LENGTH + 16);
        out.push(MICRO_FORMAT_VERSION);
        out.push(address_type.value());
        out.extend_from_slice(&resource_id.to_be_bytes());
        out.extend_from_slice(&entity_id.to_be_bytes());
        out.push(uri.entity.version_major().unwrap_or(0));
        out.push(0);

        match uri.authority.number() {
            None => {}
            Some(AuthorityNumber::Ip(IpAddr::V4(ip))) => out.extend_from_slice(&ip.octets()),
            Some(AuthorityNumber::Ip(IpAddr::V6(ip))) => out.extend_from_slice(&ip.octets()),
            Some(AuthorityNumber::Id(id)) => {
                let Ok(len) = u8::try_from(id.len()) else {
                    debug!(len = id.len(), "authority id too long for micro uri");
                    return Vec::new();
                };
                if len == 0 {
                    return Vec::new();
                }
                out.push(len);
                out.extend_from_slice(id);
            }
        }

        out
    }

    fn deserialize(&self, encoded: &[u8]) -> Uri {
        if encoded.len() < LOCAL_MICRO_URI_LENGTH {
            debug!(len = encoded.len(), "micro uri too short");
            return Uri::default();
        }
        if encoded[0] != MICRO_FORMAT_VERSION {
            debug!(version = encoded[0], "unsupported micro uri version");
            return Uri::default();
        }
        let address_type = match AddressType::try_from(encoded[1]) {
            Ok(address_type) => address_type,
            Err(value) => {
                debug!(address_type = value, "unknown micro uri address type");
                return Uri::default();
            }
        };

        let expected_len = match address_type.micro_len() {
            Some(len) => len,
            None => match encoded.get(ID_LEN_OFFSET) {
                Some(&id_len) => ID_LEN_OFFSET + 1 + usize::from(id_len),
                None => return Uri::default(),
            },
        };
        if encoded.len() != expected_len {
            debug!(
                len = encoded.len(),
                expected = expected_len,
                ?address_type,
                "micro uri length mismatch"
            );
            return Uri::default();
        }

        let resource_id = u16::from_be_bytes([encoded[2], encoded[3]]);
        let entity_id = u16::from_be_bytes([encoded[4], encoded[5]]);
        let version = encoded[6];

        let authority = match address_type {
            AddressType::Local => Ok(Authority::local()),
            AddressType::Ipv4 | AddressType::Ipv6 => {
                ip_from_bytes(&encoded[LOCAL_MICRO_URI_LENGTH..]).map(Authority::from_ip)
            }
            AddressType::Id => Authority::from_id(&encoded[ID_LEN_OFFSET + 1..]),
        };
        let authority = match authority {
            Ok(authority) => authority,
            Err(e) => {
                debug!(error = %e, "invalid micro uri authority");
                return Uri::default();
            }
        };

        let mut entity = Entity::default();
        entity.set_id(Some(entity_id));
        if version != 0 {
            entity = match entity.with_version_major(u32::from(version)) {
                Ok(entity) => entity,
                Err(_) => return Uri::default(),
            };
        }

        Uri::new(authority, entity, Resource::for_id(resource_id))
    }
}
