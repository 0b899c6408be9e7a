//! Compact numeric string form for addresses whose ids are already known.
//!
//! ```text
//! [scheme:]["//" authority] "/" entity_id "/" [version] "/" resource_id
//! ```
//!
//! The authority is written as an IP address or as the id bytes read as
//! UTF-8 text.

use std::net::IpAddr;

use tracing::debug;

use super::{split_segments, strip_scheme, trim_trailing_slashes, UriCodec};
use crate::authority::{Authority, AuthorityNumber};
use crate::entity::Entity;
use crate::resource::Resource;
use crate::uri::Uri;

/// Codec for the short (numeric string) form.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortUriCodec;

impl UriCodec for ShortUriCodec {
    type Encoded = str;

    fn serialize(&self, uri: &Uri) -> String {
        if uri.is_empty() {
            return String::new();
        }

        let mut out = String::new();
        match uri.authority.number() {
            Some(AuthorityNumber::Ip(ip)) => {
                out.push_str("//");
                out.push_str(&ip.to_string());
            }
            Some(AuthorityNumber::Id(id)) => match std::str::from_utf8(id) {
                Ok(text) => {
                    out.push_str("//");
                    out.push_str(text);
                }
                Err(_) => {
                    debug!("authority id is not valid UTF-8, cannot write short uri");
                    return String::new();
                }
            },
            None if uri.authority.is_local() => {}
            None => return String::new(),
        }

        out.push('/');
        if let Some(id) = uri.entity.id() {
            out.push_str(&id.to_string());
        }
        out.push('/');
        if let Some(version) = uri.entity.version_major() {
            out.push_str(&version.to_string());
        }
        out.push('/');
        if let Some(id) = uri.resource.id() {
            out.push_str(&id.to_string());
        }

        trim_trailing_slashes(out)
    }

    fn deserialize(&self, encoded: &str) -> Uri {
        if encoded.trim().is_empty() {
            return Uri::default();
        }

        let path = strip_scheme(encoded);
        let is_local = !path.starts_with("//");
        let segments = split_segments(&path);
        if segments.len() < 2 {
            return Uri::default();
        }

        let (authority, parts) = if is_local {
            (Authority::local(), &segments[1..])
        } else {
            let Some(token) = segments.get(2).filter(|s| !s.trim().is_empty()) else {
                return Uri::default();
            };
            let Some(authority) = parse_authority(token) else {
                return Uri::default();
            };
            if segments.len() == 3 {
                return Uri::new(authority, Entity::default(), Resource::default());
            }
            (authority, &segments[3..])
        };

        match parse_numbers(parts) {
            Some((entity, resource)) => Uri::new(authority, entity, resource),
            None => {
                debug!(input = encoded, "invalid numeric field in short uri");
                Uri::default()
            }
        }
    }
}

/// Reads an IP address, falling back to an opaque id.
fn parse_authority(token: &str) -> Option<Authority> {
    let unbracketed = token
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .unwrap_or(token);
    if let Ok(ip) = unbracketed.parse::<IpAddr>() {
        return Some(Authority::from_ip(ip));
    }
    Authority::from_id(token.as_bytes()).ok()
}

fn parse_numbers(parts: &[&str]) -> Option<(Entity, Resource)> {
    let mut entity = Entity::default();
    if let Some(id) = parts.first().filter(|s| !s.trim().is_empty()) {
        entity = entity.with_id(id.parse().ok()?).ok()?;
    }
    if let Some(version) = parts.get(1).filter(|s| !s.is_empty()) {
        entity = entity.with_version_major(version.parse().ok()?).ok()?;
    }
    let resource = match parts.get(2) {
        Some(id) => Resource::from_id(id.parse().ok()?).ok()?,
        None => Resource::default(),
    };
    Some((entity, resource))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn serialize(uri: &Uri) -> String {
        ShortUriCodec.serialize(uri)
    }

    fn deserialize(s: &str) -> Uri {
        ShortUriCodec.deserialize(s)
    }

    fn numbered(authority: Authority) -> Uri {
        Uri::new(
            authority,
            Entity::numbered(29999).unwrap().with_version_major(254).unwrap(),
            Resource::from_id(19999).unwrap(),
        )
    }

    #[test]
    fn test_serialize_local() {
        assert_eq!(serialize(&numbered(Authority::local())), "/29999/254/19999");
    }

    #[test]
    fn test_serialize_ipv4() {
        let uri = numbered(Authority::from_ip("192.168.1.100".parse().unwrap()));
        assert_eq!(serialize(&uri), "//192.168.1.100/29999/254/19999");
        assert_eq!(deserialize("//192.168.1.100/29999/254/19999"), uri);
    }

    #[test]
    fn test_serialize_ipv6() {
        let uri = numbered(Authority::from_ip("2001:db8::1".parse().unwrap()));
        let text = serialize(&uri);
        assert_eq!(text, "//2001:db8::1/29999/254/19999");
        assert_eq!(deserialize(&text), uri);
        assert_eq!(deserialize("//[2001:db8::1]/29999/254/19999"), uri);
    }

    #[test]
    fn test_serialize_id() {
        let uri = numbered(Authority::from_id(b"myvin".to_vec()).unwrap());
        assert_eq!(serialize(&uri), "//myvin/29999/254/19999");
        assert_eq!(deserialize("//myvin/29999/254/19999"), uri);
    }

    #[test]
    fn test_serialize_without_version() {
        let uri = Uri::new(
            Authority::local(),
            Entity::numbered(5).unwrap(),
            Resource::from_id(0x8000).unwrap(),
        );
        assert_eq!(serialize(&uri), "/5//32768");
        assert_eq!(deserialize("/5//32768"), uri);
    }

    #[test]
    fn test_serialize_unsupported_authority() {
        assert_eq!(serialize(&numbered(Authority::named("vcu"))), "");
        assert_eq!(
            serialize(&numbered(Authority::from_id(vec![0xff, 0xfe]).unwrap())),
            ""
        );
        assert_eq!(serialize(&Uri::default()), "");
    }

    #[test]
    fn test_deserialize_with_scheme() {
        assert_eq!(
            deserialize("up://192.168.1.100/29999/254/19999"),
            numbered(Authority::from_ip("192.168.1.100".parse().unwrap()))
        );
    }

    #[test]
    fn test_deserialize_rpc_response_id() {
        let uri = deserialize("/5/1/0");
        assert_eq!(uri.resource, Resource::rpc_response());
    }

    #[test]
    fn test_deserialize_authority_only() {
        let uri = deserialize("//10.0.0.1");
        assert_eq!(uri.authority.ip(), Some("10.0.0.1".parse().unwrap()));
        assert!(uri.entity.is_empty());
    }

    #[rstest]
    #[case("")]
    #[case("/")]
    #[case("5")]
    #[case("///5/1/2")]
    #[case("/abc/1/2")]
    #[case("/5/x/2")]
    #[case("/5/1/two")]
    #[case("/70000/1/2")]
    #[case("/5/256/2")]
    #[case("/5/1/65536")]
    fn test_deserialize_invalid_is_empty(#[case] input: &str) {
        assert_eq!(deserialize(input), Uri::default());
    }

    fn short_form_uri() -> impl Strategy<Value = Uri> {
        let authority = prop_oneof![
            Just(Authority::local()),
            any::<[u8; 4]>().prop_map(|b| Authority::from_ip_bytes(&b).unwrap()),
            any::<[u8; 16]>().prop_map(|b| Authority::from_ip_bytes(&b).unwrap()),
            "[a-z][a-z0-9_]{0,15}".prop_map(|id| Authority::from_id(id.into_bytes()).unwrap()),
        ];
        (
            authority,
            any::<u16>(),
            proptest::option::of(any::<u8>()),
            any::<u16>(),
        )
            .prop_map(|(authority, entity_id, version, resource_id)| {
                let mut entity = Entity::numbered(u32::from(entity_id)).unwrap();
                if let Some(v) = version {
                    entity = entity.with_version_major(u32::from(v)).unwrap();
                }
                Uri::new(authority, entity, Resource::from_id(u32::from(resource_id)).unwrap())
            })
    }

    proptest! {
        #[test]
        fn prop_short_form_roundtrip(uri in short_form_uri()) {
            prop_assume!(crate::UriValidator::is_short_form(&uri));
            prop_assert_eq!(deserialize(&serialize(&uri)), uri);
        }
    }
}
