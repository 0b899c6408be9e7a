//! The composite address.

use serde::{Deserialize, Serialize};

use crate::authority::Authority;
use crate::codec::{LongUriCodec, UriCodec};
use crate::entity::Entity;
use crate::resource::Resource;
use crate::validator::UriValidator;

/// An address made of an authority, an entity, and a resource.
///
/// The default value is the empty address, which every codec returns for
/// input it cannot decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Uri {
    #[serde(default)]
    pub authority: Authority,
    #[serde(default)]
    pub entity: Entity,
    #[serde(default)]
    pub resource: Resource,
}

impl Uri {
    pub fn new(authority: Authority, entity: Entity, resource: Resource) -> Self {
        Self {
            authority,
            entity,
            resource,
        }
    }

    /// A local address with no resource.
    pub fn local(entity: Entity) -> Self {
        Self::new(Authority::local(), entity, Resource::default())
    }

    /// The RPC reply address of `entity` at `authority`.
    pub fn rpc_response(authority: Authority, entity: Entity) -> Self {
        Self::new(authority, entity, Resource::rpc_response())
    }

    pub fn is_empty(&self) -> bool {
        UriValidator::is_empty(self)
    }

    pub fn is_local(&self) -> bool {
        UriValidator::is_local(self)
    }

    pub fn is_remote(&self) -> bool {
        UriValidator::is_remote(self)
    }

    pub fn is_long_form(&self) -> bool {
        UriValidator::is_long_form(self)
    }

    pub fn is_micro_form(&self) -> bool {
        UriValidator::is_micro_form(self)
    }

    pub fn is_resolved(&self) -> bool {
        UriValidator::is_resolved(self)
    }
}

impl std::fmt::Display for Uri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&LongUriCodec.serialize(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(Uri::default().is_empty());
        assert!(!Uri::default().is_long_form());
        assert!(!Uri::default().is_micro_form());
    }

    #[test]
    fn test_display_uses_long_form() {
        let uri = Uri::new(
            Authority::local(),
            Entity::named("hartley"),
            Resource::rpc_request("raise"),
        );
        assert_eq!(uri.to_string(), "/hartley//rpc.raise");
    }

    #[test]
    fn test_rpc_response_constructor() {
        let uri = Uri::rpc_response(Authority::local(), Entity::named("hartley"));
        assert_eq!(uri.resource, Resource::rpc_response());
        assert!(uri.is_local());
    }

    #[test]
    fn test_json_roundtrip() {
        let uri = Uri::new(
            Authority::resolved_ip("vcu", "10.0.3.3".parse().unwrap()),
            Entity::named("body.access").with_id(5).unwrap(),
            Resource::named("door").with_instance("front_left"),
        );
        let json = serde_json::to_string(&uri).unwrap();
        let parsed: Uri = serde_json::from_str(&json).unwrap();
        assert_eq!(uri, parsed);
    }
}
