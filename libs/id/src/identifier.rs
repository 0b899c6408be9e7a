//! The 128-bit identifier value type.

use uuid::Uuid;

use crate::error::IdError;

/// A 128-bit identifier held as two big-endian halves.
///
/// Ordering compares `high` first, so identifiers from the same factory sort
/// by creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier {
    high: u64,
    low: u64,
}

impl Identifier {
    /// The all-zero identifier, returned by lossy decoders on bad input.
    pub const NIL: Self = Self { high: 0, low: 0 };

    /// Creates an identifier from its two halves.
    #[must_use]
    pub const fn new(high: u64, low: u64) -> Self {
        Self { high, low }
    }

    /// Returns the most significant 64 bits.
    #[must_use]
    pub const fn high(&self) -> u64 {
        self.high
    }

    /// Returns the least significant 64 bits.
    #[must_use]
    pub const fn low(&self) -> u64 {
        self.low
    }

    #[must_use]
    pub const fn is_nil(&self) -> bool {
        self.high == 0 && self.low == 0
    }

    /// Returns the identifier as a [`Uuid`].
    #[must_use]
    pub const fn to_uuid(&self) -> Uuid {
        Uuid::from_u64_pair(self.high, self.low)
    }

    /// Returns the 16-byte big-endian form: `high` then `low`.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 16] {
        *self.to_uuid().as_bytes()
    }

    /// Reads the 16-byte form, failing on any other length.
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self, IdError> {
        let bytes: [u8; 16] = bytes
            .try_into()
            .map_err(|_| IdError::InvalidLength(bytes.len()))?;
        Ok(Uuid::from_bytes(bytes).into())
    }

    /// Reads the 16-byte form, returning [`Identifier::NIL`] on any other length.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::try_from_bytes(bytes).unwrap_or(Self::NIL)
    }

    /// Parses the hyphenated textual form.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        if s.is_empty() {
            return Err(IdError::Empty);
        }
        Uuid::try_parse(s)
            .map(Self::from)
            .map_err(|e| IdError::InvalidFormat {
                message: e.to_string(),
            })
    }

    /// Parses the textual form, returning [`Identifier::NIL`] on bad input.
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::NIL)
    }
}

impl From<Uuid> for Identifier {
    fn from(uuid: Uuid) -> Self {
        let (high, low) = uuid.as_u64_pair();
        Self { high, low }
    }
}

impl From<Identifier> for Uuid {
    fn from(id: Identifier) -> Self {
        id.to_uuid()
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_uuid().hyphenated())
    }
}

impl std::str::FromStr for Identifier {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for Identifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Identifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "0191e4c0-b1a3-8001-9d6e-3c4a2f5b7e10";

    #[test]
    fn test_parse_and_display() {
        let id: Identifier = SAMPLE.parse().unwrap();
        assert_eq!(id.high(), 0x0191_e4c0_b1a3_8001);
        assert_eq!(id.low(), 0x9d6e_3c4a_2f5b_7e10);
        assert_eq!(id.to_string(), SAMPLE);
    }

    #[test]
    fn test_parse_empty() {
        assert!(Identifier::parse("").unwrap_err().is_empty());
    }

    #[test]
    fn test_parse_invalid() {
        let result = Identifier::parse("not-a-uuid");
        assert!(matches!(result, Err(IdError::InvalidFormat { .. })));
        assert_eq!(Identifier::from_str_lossy("not-a-uuid"), Identifier::NIL);
    }

    #[test]
    fn test_bytes_are_big_endian_high_then_low() {
        let id = Identifier::new(0x0102_0304_0506_0708, 0x090a_0b0c_0d0e_0f10);
        let bytes = id.to_bytes();
        assert_eq!(bytes[0], 0x01);
        assert_eq!(bytes[7], 0x08);
        assert_eq!(bytes[8], 0x09);
        assert_eq!(bytes[15], 0x10);
        assert_eq!(Identifier::from_bytes(&bytes), id);
    }

    #[test]
    fn test_from_bytes_wrong_length() {
        assert_eq!(Identifier::from_bytes(&[1, 2, 3]), Identifier::NIL);
        assert_eq!(
            Identifier::try_from_bytes(&[0u8; 17]).unwrap_err(),
            IdError::InvalidLength(17)
        );
    }

    #[test]
    fn test_ordering_by_high_then_low() {
        let a = Identifier::new(1, u64::MAX);
        let b = Identifier::new(2, 0);
        let c = Identifier::new(2, 1);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_json_roundtrip() {
        let id: Identifier = SAMPLE.parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{SAMPLE}\""));
        let parsed: Identifier = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_nil() {
        assert!(Identifier::NIL.is_nil());
        assert!(Identifier::default().is_nil());
    }
}
