//! The resource (topic, method, or reply channel) component of an address.

use serde::{Deserialize, Serialize};

use crate::error::{check_range, UriError};

/// Reserved resource name for RPC methods and their replies.
pub const RPC_RESOURCE_NAME: &str = "rpc";

/// Instance name of the canonical RPC response resource.
pub const RPC_RESPONSE_INSTANCE: &str = "response";

/// Lowest resource id that denotes a topic rather than an RPC method.
pub const MIN_TOPIC_ID: u16 = 0x8000;

/// A capability exposed by an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default)]
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    instance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<u16>,
}

impl Resource {
    /// A resource known by name only.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builds the resource a numeric id stands for.
    ///
    /// Id 0 is the RPC response, ids below [`MIN_TOPIC_ID`] are RPC methods,
    /// anything else is a bare topic.
    pub fn from_id(id: u32) -> Result<Self, UriError> {
        let id = check_range("resource id", id, u16::MAX as u32)? as u16;
        Ok(Self::for_id(id))
    }

    /// An RPC method addressed by name.
    pub fn rpc_request(method: impl Into<String>) -> Self {
        Self::named(RPC_RESOURCE_NAME).with_instance(method)
    }

    /// An RPC method addressed by name and id.
    pub fn rpc_request_with_id(method: impl Into<String>, id: u32) -> Result<Self, UriError> {
        Self::rpc_request(method).with_id(id)
    }

    /// The canonical RPC response resource.
    pub fn rpc_response() -> Self {
        Self {
            name: RPC_RESOURCE_NAME.to_string(),
            instance: Some(RPC_RESPONSE_INSTANCE.to_string()),
            message: None,
            id: Some(0),
        }
    }

    #[must_use]
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the numeric id (0-65535).
    pub fn with_id(mut self, id: u32) -> Result<Self, UriError> {
        self.id = Some(check_range("resource id", id, u16::MAX as u32)? as u16);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instance(&self) -> Option<&str> {
        self.instance.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn id(&self) -> Option<u16> {
        self.id
    }

    /// True if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True if the resource is absent or has a non-blank name.
    pub fn is_long_form(&self) -> bool {
        self.is_empty() || !self.name.trim().is_empty()
    }

    /// True if the resource has a numeric id.
    pub fn is_micro_form(&self) -> bool {
        self.id.is_some()
    }

    /// True if this resource names an RPC method.
    pub fn is_rpc_method(&self) -> bool {
        self.name == RPC_RESOURCE_NAME
            && (self.instance.as_deref().is_some_and(|i| !i.trim().is_empty())
                || self.id.is_some_and(|id| id < MIN_TOPIC_ID))
    }

    /// True if this resource is the canonical RPC reply channel.
    pub fn is_rpc_response(&self) -> bool {
        self.is_rpc_method()
            && self.instance.as_deref() == Some(RPC_RESPONSE_INSTANCE)
            && self.id == Some(0)
    }

    pub(crate) fn for_id(id: u16) -> Self {
        match id {
            0 => Self::rpc_response(),
            id if id < MIN_TOPIC_ID => Self {
                name: RPC_RESOURCE_NAME.to_string(),
                id: Some(id),
                ..Self::default()
            },
            id => Self {
                id: Some(id),
                ..Self::default()
            },
        }
    }

    pub(crate) fn set_id(&mut self, id: Option<u16>) {
        self.id = id;
    }
}
