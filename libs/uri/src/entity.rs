//! The software entity (service or application) component of an address.

use serde::{Deserialize, Serialize};

use crate::error::{check_range, UriError};

/// A service or application, identified by name, numeric id, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    #[serde(default)]
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version_major: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version_minor: Option<u8>,
}

impl Entity {
    /// An entity known by name only.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// An entity known by numeric id only.
    pub fn numbered(id: u32) -> Result<Self, UriError> {
        Self::default().with_id(id)
    }

    /// Sets the numeric id (0-65535).
    pub fn with_id(mut self, id: u32) -> Result<Self, UriError> {
        self.id = Some(check_range("entity id", id, u16::MAX as u32)? as u16);
        Ok(self)
    }

    /// Sets the major version (0-255).
    pub fn with_version_major(mut self, version: u32) -> Result<Self, UriError> {
        let version = check_range("entity major version", version, u8::MAX as u32)?;
        self.version_major = Some(version as u8);
        Ok(self)
    }

    /// Sets the minor version (0-255).
    pub fn with_version_minor(mut self, version: u32) -> Result<Self, UriError> {
        let version = check_range("entity minor version", version, u8::MAX as u32)?;
        self.version_minor = Some(version as u8);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> Option<u16> {
        self.id
    }

    pub fn version_major(&self) -> Option<u8> {
        self.version_major
    }

    pub fn version_minor(&self) -> Option<u8> {
        self.version_minor
    }

    /// True if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True if the entity has a non-blank name.
    pub fn is_long_form(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// True if the entity has a numeric id.
    pub fn is_micro_form(&self) -> bool {
        self.id.is_some()
    }

    /// True if the entity is usable in both forms.
    pub fn is_resolved(&self) -> bool {
        self.is_long_form() && self.is_micro_form()
    }

    pub(crate) fn set_id(&mut self, id: Option<u16>) {
        self.id = id;
    }
}
