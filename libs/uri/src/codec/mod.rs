//! Wire codecs for [`Uri`].
//!
//! Three interconvertible forms are supported:
//!
//! - [`LongUriCodec`]: human-readable, `//vcu.vin/body.access/1/door.front_left#Door`
//! - [`MicroUriCodec`]: compact binary, 8 to 264 bytes
//! - [`ShortUriCodec`]: numeric text, `//192.168.1.100/29999/254/19999`
//!
//! Decoding is all-or-nothing: input that cannot be decoded yields
//! `Uri::default()`, and addresses that cannot be encoded yield an empty
//! string or byte vector.

mod long;
mod micro;
mod short;

pub use long::LongUriCodec;
pub use micro::{MicroUriCodec, LOCAL_MICRO_URI_LENGTH, MICRO_FORMAT_VERSION};
pub use short::ShortUriCodec;

use crate::uri::Uri;

/// A wire representation of [`Uri`].
pub trait UriCodec {
    /// The borrowed form of the encoded representation (`str` or `[u8]`).
    type Encoded: ?Sized + ToOwned;

    /// Encodes `uri`, returning an empty value if it cannot be represented.
    fn serialize(&self, uri: &Uri) -> <Self::Encoded as ToOwned>::Owned;

    /// Decodes `encoded`, returning `Uri::default()` on any failure.
    fn deserialize(&self, encoded: &Self::Encoded) -> Uri;
}

/// Merges a long-form and a micro-form encoding of the same address.
///
/// Names come from the long form, numbers from the micro form. Returns
/// `None` unless the merged address is resolved; two empty inputs give the
/// empty address.
pub fn resolve(long: &str, micro: &[u8]) -> Option<Uri> {
    if long.is_empty() && micro.is_empty() {
        return Some(Uri::default());
    }

    let long_uri = LongUriCodec.deserialize(long);
    let micro_uri = MicroUriCodec.deserialize(micro);

    let mut authority = micro_uri.authority;
    if let Some(name) = long_uri.authority.name() {
        authority = authority.with_name(name);
    }
    let mut entity = long_uri.entity;
    entity.set_id(micro_uri.entity.id());
    let mut resource = long_uri.resource;
    resource.set_id(micro_uri.resource.id());

    let uri = Uri::new(authority, entity, resource);
    if uri.is_resolved() {
        Some(uri)
    } else {
        tracing::debug!(long, micro_len = micro.len(), "long and micro forms do not resolve");
        None
    }
}

/// Removes a leading `scheme:` prefix; without one, normalises `\` to `/`.
///
/// Only a syntactically valid scheme is stripped, so the colons of an IPv6
/// authority are left alone.
pub(crate) fn strip_scheme(input: &str) -> String {
    if let Some((scheme, rest)) = input.split_once(':') {
        if is_scheme(scheme) {
            return rest.to_string();
        }
    }
    input.replace('\\', "/")
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Splits on `/`, dropping trailing empty segments but keeping leading ones.
pub(crate) fn split_segments(path: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = path.split('/').collect();
    while segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }
    segments
}

/// Removes every trailing `/`.
pub(crate) fn trim_trailing_slashes(mut out: String) -> String {
    let trimmed_len = out.trim_end_matches('/').len();
    out.truncate(trimmed_len);
    out
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::authority::Authority;
    use crate::entity::Entity;
    use crate::resource::Resource;

    #[rstest]
    #[case("up:/body.access/1", "/body.access/1")]
    #[case("custom+v1:/body.access", "/body.access")]
    #[case("//[::1]/1/2/3", "//[::1]/1/2/3")]
    #[case("//2001:db8::1/1/2/3", "//2001:db8::1/1/2/3")]
    #[case("\\body.access\\1", "/body.access/1")]
    fn test_strip_scheme(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_scheme(input), expected);
    }

    #[test]
    fn test_split_segments() {
        assert_eq!(split_segments("/hartley//rpc.raise"), vec!["", "hartley", "", "rpc.raise"]);
        assert_eq!(split_segments("//vcu/body///"), vec!["", "", "vcu", "body"]);
        assert!(split_segments("/").is_empty());
        assert!(split_segments("").is_empty());
    }

    #[test]
    fn test_trim_trailing_slashes() {
        assert_eq!(trim_trailing_slashes("/hartley//".to_string()), "/hartley");
        assert_eq!(trim_trailing_slashes("//".to_string()), "");
    }

    #[test]
    fn test_resolve_merges_both_forms() {
        let micro_uri = Uri::new(
            Authority::from_ip("10.0.3.3".parse().unwrap()),
            Entity::numbered(29999).unwrap().with_version_major(1).unwrap(),
            Resource::from_id(0x8001).unwrap(),
        );
        let micro = MicroUriCodec.serialize(&micro_uri);
        let resolved = resolve("//vcu.vin/body.access/1/door.front_left#Door", &micro).unwrap();

        assert_eq!(resolved.authority.name(), Some("vcu.vin"));
        assert_eq!(resolved.authority.ip(), Some("10.0.3.3".parse().unwrap()));
        assert_eq!(resolved.entity.name(), "body.access");
        assert_eq!(resolved.entity.id(), Some(29999));
        assert_eq!(resolved.resource.instance(), Some("front_left"));
        assert_eq!(resolved.resource.id(), Some(0x8001));
        assert!(resolved.is_resolved());
    }

    #[test]
    fn test_resolve_empty_inputs() {
        assert_eq!(resolve("", &[]), Some(Uri::default()));
    }

    #[test]
    fn test_resolve_unresolvable() {
        assert_eq!(resolve("/body.access/1/door", &[]), None);
        assert_eq!(resolve("", &[1, 0, 0, 5, 0, 7, 1, 0]), None);
    }
}
