//! The deployment-location component of an address.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use serde::{Deserialize, Serialize};

use crate::error::UriError;

/// Maximum length of an opaque authority id, bounded by the micro-form length byte.
pub const MAX_AUTHORITY_ID_LEN: usize = 255;

/// Authority address type as written in byte 1 of the micro form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum AddressType {
    Local = 0,
    Ipv4 = 1,
    Ipv6 = 2,
    Id = 3,
}

impl AddressType {
    /// Returns the wire value of this address type.
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Returns the exact micro-form length for this type, or `None` for id-based
    /// authorities whose length depends on the id.
    pub const fn micro_len(self) -> Option<usize> {
        match self {
            AddressType::Local => Some(8),
            AddressType::Ipv4 => Some(12),
            AddressType::Ipv6 => Some(24),
            AddressType::Id => None,
        }
    }
}

impl TryFrom<u8> for AddressType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AddressType::Local),
            1 => Ok(AddressType::Ipv4),
            2 => Ok(AddressType::Ipv6),
            3 => Ok(AddressType::Id),
            other => Err(other),
        }
    }
}

/// The numeric half of a remote authority.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorityNumber {
    /// A raw IPv4 or IPv6 address.
    Ip(IpAddr),
    /// An opaque id of 1-255 bytes.
    Id(Vec<u8>),
}

/// Where an entity is deployed.
///
/// An authority with neither a name nor a number is local. A remote authority
/// may carry a name, a number, or both (a resolved authority).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Authority {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    number: Option<AuthorityNumber>,
}

impl Authority {
    /// The local authority.
    pub fn local() -> Self {
        Self::default()
    }

    /// A remote authority identified by a dot-separated name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            number: None,
        }
    }

    /// A remote authority identified by an IP address.
    pub fn from_ip(ip: IpAddr) -> Self {
        Self {
            name: None,
            number: Some(AuthorityNumber::Ip(ip)),
        }
    }

    /// A remote authority from raw IP bytes (4 or 16 bytes).
    pub fn from_ip_bytes(bytes: &[u8]) -> Result<Self, UriError> {
        Ok(Self::from_ip(ip_from_bytes(bytes)?))
    }

    /// A remote authority identified by an opaque id of 1-255 bytes.
    pub fn from_id(id: impl Into<Vec<u8>>) -> Result<Self, UriError> {
        let id = id.into();
        if id.is_empty() || id.len() > MAX_AUTHORITY_ID_LEN {
            return Err(UriError::InvalidIdLength(id.len()));
        }
        Ok(Self {
            name: None,
            number: Some(AuthorityNumber::Id(id)),
        })
    }

    /// A remote authority carrying both a name and an IP address.
    pub fn resolved_ip(name: impl Into<String>, ip: IpAddr) -> Self {
        Self::from_ip(ip).with_name(name)
    }

    /// A remote authority carrying both a name and an opaque id.
    pub fn resolved_id(name: impl Into<String>, id: impl Into<Vec<u8>>) -> Result<Self, UriError> {
        Ok(Self::from_id(id)?.with_name(name))
    }

    /// Returns a copy of this authority with the given name attached.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the authority name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the numeric half, if any.
    pub fn number(&self) -> Option<&AuthorityNumber> {
        self.number.as_ref()
    }

    /// Returns the IP address, if this authority is IP-based.
    pub fn ip(&self) -> Option<IpAddr> {
        match &self.number {
            Some(AuthorityNumber::Ip(ip)) => Some(*ip),
            _ => None,
        }
    }

    /// Returns the opaque id, if this authority is id-based.
    pub fn id(&self) -> Option<&[u8]> {
        match &self.number {
            Some(AuthorityNumber::Id(id)) => Some(id),
            _ => None,
        }
    }

    /// True if neither name nor number is set.
    pub fn is_local(&self) -> bool {
        self.name.is_none() && self.number.is_none()
    }

    /// True if the authority identifies a remote deployment.
    ///
    /// A blank name alone does not count.
    pub fn is_remote(&self) -> bool {
        self.has_name() || self.number.is_some()
    }

    /// True if the authority is usable in the long (string) form.
    pub fn is_long_form(&self) -> bool {
        self.is_local() || self.has_name()
    }

    /// True if the authority is usable in the micro (binary) form.
    pub fn is_micro_form(&self) -> bool {
        self.is_local() || self.number.is_some()
    }

    /// Returns the micro-form address type, or `None` for name-only authorities.
    pub fn address_type(&self) -> Option<AddressType> {
        match &self.number {
            None if self.name.is_none() => Some(AddressType::Local),
            None => None,
            Some(AuthorityNumber::Ip(IpAddr::V4(_))) => Some(AddressType::Ipv4),
            Some(AuthorityNumber::Ip(IpAddr::V6(_))) => Some(AddressType::Ipv6),
            Some(AuthorityNumber::Id(_)) => Some(AddressType::Id),
        }
    }

    /// True if the authority carries a non-blank name.
    pub fn has_name(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.trim().is_empty())
    }
}

/// Builds an IP address from 4 or 16 raw bytes.
pub(crate) fn ip_from_bytes(bytes: &[u8]) -> Result<IpAddr, UriError> {
    if let Ok(octets) = <[u8; 4]>::try_from(bytes) {
        return Ok(IpAddr::V4(Ipv4Addr::from(octets)));
    }
    if let Ok(octets) = <[u8; 16]>::try_from(bytes) {
        return Ok(IpAddr::V6(Ipv6Addr::from(octets)));
    }
    Err(UriError::InvalidIpLength(bytes.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_authority() {
        let authority = Authority::local();
        assert!(authority.is_local());
        assert!(!authority.is_remote());
        assert!(authority.is_long_form());
        assert!(authority.is_micro_form());
        assert_eq!(authority.address_type(), Some(AddressType::Local));
    }

    #[test]
    fn test_named_authority() {
        let authority = Authority::named("vcu.my_car_vin");
        assert!(authority.is_remote());
        assert!(authority.is_long_form());
        assert!(!authority.is_micro_form());
        assert_eq!(authority.address_type(), None);
    }

    #[test]
    fn test_blank_name_is_neither_local_nor_remote() {
        let authority = Authority::named("  ");
        assert!(!authority.is_local());
        assert!(!authority.is_remote());
    }

    #[test]
    fn test_ip_bytes() {
        let v4 = Authority::from_ip_bytes(&[192, 168, 1, 100]).unwrap();
        assert_eq!(v4.address_type(), Some(AddressType::Ipv4));
        assert_eq!(v4.ip(), Some("192.168.1.100".parse().unwrap()));

        let v6 = Authority::from_ip_bytes(&[0u8; 16]).unwrap();
        assert_eq!(v6.address_type(), Some(AddressType::Ipv6));

        let err = Authority::from_ip_bytes(&[1, 2, 3]).unwrap_err();
        assert_eq!(err, UriError::InvalidIpLength(3));
    }

    #[test]
    fn test_id_length_bounds() {
        assert!(Authority::from_id(vec![1u8; 255]).is_ok());
        assert_eq!(
            Authority::from_id(Vec::new()).unwrap_err(),
            UriError::InvalidIdLength(0)
        );
        assert!(Authority::from_id(vec![1u8; 256])
            .unwrap_err()
            .is_authority_error());
    }

    #[test]
    fn test_resolved_authority_is_both_forms() {
        let authority = Authority::resolved_ip("vcu", "10.0.0.1".parse().unwrap());
        assert!(authority.is_long_form());
        assert!(authority.is_micro_form());
        assert_eq!(authority.name(), Some("vcu"));
    }

    #[test]
    fn test_address_type_from_u8() {
        assert_eq!(AddressType::try_from(3), Ok(AddressType::Id));
        assert_eq!(AddressType::try_from(9), Err(9));
        assert_eq!(AddressType::Ipv6.micro_len(), Some(24));
        assert_eq!(AddressType::Id.micro_len(), None);
    }
}
