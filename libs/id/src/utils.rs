//! Inspection of identifiers: version, variant, creation time, and expiry.
//!
//! Time values are milliseconds since the Unix epoch. Functions that return
//! `Option` use `None` for "unknown or expired" and never return a negative
//! duration.

use chrono::Utc;
use uuid::Variant;

use crate::identifier::Identifier;

/// Offset between the Gregorian epoch (1582-10-15) and the Unix epoch, in 100 ns ticks.
const GREGORIAN_OFFSET_TICKS: i64 = 0x01B2_1DD2_1381_4000;

/// 100 ns ticks per millisecond.
const TICKS_PER_MILLI: i64 = 10_000;

/// Identifier version, read from bits 12-15 of the high half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
    /// RFC time-ordered (6).
    TimeOrdered,
    /// Custom monotonic (8).
    UProtocol,
    /// Any other nibble.
    Unknown(u8),
}

impl Version {
    pub const fn from_nibble(nibble: u8) -> Self {
        match nibble {
            6 => Version::TimeOrdered,
            8 => Version::UProtocol,
            other => Version::Unknown(other),
        }
    }

    pub const fn value(self) -> u8 {
        match self {
            Version::TimeOrdered => 6,
            Version::UProtocol => 8,
            Version::Unknown(v) => v,
        }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Version::TimeOrdered => write!(f, "time-ordered (6)"),
            Version::UProtocol => write!(f, "uprotocol (8)"),
            Version::Unknown(v) => write!(f, "unknown ({v})"),
        }
    }
}

pub fn get_version(id: &Identifier) -> Version {
    Version::from_nibble(((id.high() >> 12) & 0xF) as u8)
}

pub fn get_variant(id: &Identifier) -> Variant {
    id.to_uuid().get_variant()
}

/// True for custom monotonic identifiers.
pub fn is_uprotocol(id: &Identifier) -> bool {
    get_version(id) == Version::UProtocol
}

/// True for RFC time-ordered identifiers with the RFC variant.
pub fn is_uuidv6(id: &Identifier) -> bool {
    get_version(id) == Version::TimeOrdered && get_variant(id) == Variant::RFC4122
}

/// True for identifiers of either supported scheme.
pub fn is_uuid(id: &Identifier) -> bool {
    is_uprotocol(id) || is_uuidv6(id)
}

/// Returns the creation time in epoch milliseconds, or `None` for unknown versions.
pub fn get_time(id: &Identifier) -> Option<i64> {
    match get_version(id) {
        Version::UProtocol => Some((id.high() >> 16) as i64),
        Version::TimeOrdered => {
            let high = id.high();
            let ticks = ((high >> 16) << 12) | (high & 0xFFF);
            Some((ticks as i64 - GREGORIAN_OFFSET_TICKS).div_euclid(TICKS_PER_MILLI))
        }
        Version::Unknown(_) => None,
    }
}

/// Milliseconds since creation, or `None` if the creation time is unknown or
/// in the future.
pub fn get_elapsed_time(id: &Identifier) -> Option<i64> {
    get_elapsed_time_at(id, now_millis())
}

pub fn get_elapsed_time_at(id: &Identifier, now_ms: i64) -> Option<i64> {
    let created = get_time(id).filter(|t| *t >= 0)?;
    (now_ms >= created).then(|| now_ms - created)
}

/// Milliseconds left before `ttl` runs out, or `None` once expired, when
/// `ttl <= 0`, or when the creation time is unknown.
pub fn get_remaining_time(id: &Identifier, ttl: i64) -> Option<i64> {
    get_remaining_time_at(id, ttl, now_millis())
}

pub fn get_remaining_time_at(id: &Identifier, ttl: i64, now_ms: i64) -> Option<i64> {
    if ttl <= 0 {
        return None;
    }
    get_elapsed_time_at(id, now_ms)
        .map(|elapsed| ttl - elapsed)
        .filter(|remaining| *remaining > 0)
}

/// True if `ttl` is positive and no time remains.
pub fn is_expired(id: &Identifier, ttl: i64) -> bool {
    is_expired_at(id, ttl, now_millis())
}

pub fn is_expired_at(id: &Identifier, ttl: i64, now_ms: i64) -> bool {
    ttl > 0 && get_remaining_time_at(id, ttl, now_ms).is_none()
}

/// A record carrying an identifier and an optional time-to-live.
pub trait Expiring {
    fn id(&self) -> Identifier;

    /// Time-to-live in milliseconds; `None` means no expiry.
    fn ttl(&self) -> Option<i64>;
}

/// The minimal [`Expiring`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedId {
    pub id: Identifier,
    pub ttl: Option<i64>,
}

impl Expiring for TimedId {
    fn id(&self) -> Identifier {
        self.id
    }

    fn ttl(&self) -> Option<i64> {
        self.ttl
    }
}

/// [`get_remaining_time`] for a record with an embedded ttl.
pub fn remaining_time_of(record: &impl Expiring) -> Option<i64> {
    get_remaining_time(&record.id(), record.ttl().unwrap_or(0))
}

/// [`is_expired`] for a record with an embedded ttl.
pub fn is_expired_of(record: &impl Expiring) -> bool {
    is_expired(&record.id(), record.ttl().unwrap_or(0))
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
