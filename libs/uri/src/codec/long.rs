//! Human-readable string form.
//!
//! ```text
//! [scheme:]["//" authority] "/" entity "/" [version] ["/" resource ["." instance] ["#" message]]
//! ```

use tracing::debug;

use super::{split_segments, strip_scheme, trim_trailing_slashes, UriCodec};
use crate::authority::Authority;
use crate::entity::Entity;
use crate::resource::{Resource, RPC_RESOURCE_NAME, RPC_RESPONSE_INSTANCE};
use crate::uri::Uri;

/// Codec for the long (string) form.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongUriCodec;

impl UriCodec for LongUriCodec {
    type Encoded = str;

    fn serialize(&self, uri: &Uri) -> String {
        if uri.is_empty() {
            return String::new();
        }

        let mut out = String::new();
        if uri.authority.is_remote() {
            if let Some(name) = uri.authority.name().filter(|n| !n.trim().is_empty()) {
                out.push_str("//");
                out.push_str(name);
            }
        }

        out.push('/');
        out.push_str(uri.entity.name());
        out.push('/');
        if let Some(version) = uri.entity.version_major() {
            out.push_str(&version.to_string());
        }

        let resource = &uri.resource;
        if !resource.is_empty() {
            out.push('/');
            out.push_str(resource.name());
            if let Some(instance) = resource.instance() {
                out.push('.');
                out.push_str(instance);
            }
            if let Some(message) = resource.message() {
                out.push('#');
                out.push_str(message);
            }
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
            let Some(name) = segments.get(2).filter(|s| !s.trim().is_empty()) else {
                return Uri::default();
            };
            let authority = Authority::named(*name);
            if segments.len() == 3 {
                return Uri::new(authority, Entity::default(), Resource::default());
            }
            (authority, &segments[3..])
        };

        let mut entity = Entity::named(parts[0]);
        if let Some(version) = parts.get(1).filter(|v| !v.is_empty()) {
            let parsed = version
                .parse::<u32>()
                .ok()
                .and_then(|v| entity.clone().with_version_major(v).ok());
            match parsed {
                Some(with_version) => entity = with_version,
                None => {
                    debug!(version = %version, "invalid entity version in long uri");
                    return Uri::default();
                }
            }
        }

        let resource = parts
            .get(2)
            .map(|token| parse_resource(token))
            .unwrap_or_default();

        Uri::new(authority, entity, resource)
    }
}

/// Parses `name["." instance]["#" message]`.
fn parse_resource(token: &str) -> Resource {
    let (head, message) = match token.split_once('#') {
        Some((head, message)) => (head, Some(message).filter(|m| !m.is_empty())),
        None => (token, None),
    };
    let (name, instance) = match head.split_once('.') {
        Some((name, instance)) => (name, Some(instance).filter(|i| !i.is_empty())),
        None => (head, None),
    };

    let mut resource = Resource::named(name);
    if let Some(instance) = instance {
        resource = resource.with_instance(instance);
    }
    if let Some(message) = message {
        resource = resource.with_message(message);
    }
    if implies_response_id(name, instance) {
        resource.set_id(Some(0));
    }
    resource
}

/// Text resources that look like the RPC reply channel are read with id 0.
fn implies_response_id(name: &str, instance: Option<&str>) -> bool {
    name.contains(RPC_RESOURCE_NAME) && instance.is_some_and(|i| i.contains(RPC_RESPONSE_INSTANCE))
}
