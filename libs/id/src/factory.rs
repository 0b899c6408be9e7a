//! Identifier generation.
//!
//! Two schemes are supported:
//!
//! - [`MonotonicFactory`] (version 8): `high = epoch_ms << 16 | 8 << 12 | counter`,
//!   `low` fixed per factory
//! - [`TimeOrderedFactory`] (version 6): RFC 9562 time-ordered UUIDs
//!
//! ## Monotonic layout
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                         unix_ts_ms                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |           unix_ts_ms          |  ver  |        counter        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                         rand_b                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             rand_b                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! The counter counts identifiers created within one millisecond. It stops at
//! [`MAX_COUNT`]: further identifiers in the same millisecond repeat the last
//! value instead of borrowing from the next millisecond.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use tracing::trace;
use uuid::{Context, Timestamp, Uuid};

use crate::identifier::Identifier;

/// Largest value of the 12-bit per-millisecond counter.
pub const MAX_COUNT: u64 = 0xFFF;

/// Version nibble of monotonic identifiers, in place.
const UPROTOCOL_VERSION_BITS: u64 = 8 << 12;

/// Milliseconds that fit above the version and counter bits.
const EPOCH_MS_MASK: u64 = (1 << 48) - 1;

/// Variant bits `10` for the low half.
const VARIANT_MASK: u64 = 0x3FFF_FFFF_FFFF_FFFF;
const VARIANT_BITS: u64 = 0x8000_0000_0000_0000;

/// Produces identifiers.
pub trait IdentifierFactory: Send + Sync {
    /// Creates an identifier for `instant`, or for the current time if `None`.
    fn create(&self, instant: Option<DateTime<Utc>>) -> Identifier;

    /// Creates an identifier for the current time.
    fn create_now(&self) -> Identifier {
        self.create(None)
    }
}

/// Identifier scheme selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scheme {
    /// Custom monotonic scheme (version 8).
    #[default]
    UProtocol,
    /// RFC time-ordered scheme (version 6).
    TimeOrdered,
}

impl Scheme {
    /// Returns the process-wide factory for this scheme.
    pub fn factory(self) -> &'static dyn IdentifierFactory {
        match self {
            Scheme::UProtocol => uprotocol_factory(),
            Scheme::TimeOrdered => time_ordered_factory(),
        }
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scheme::UProtocol => write!(f, "uprotocol"),
            Scheme::TimeOrdered => write!(f, "v6"),
        }
    }
}

impl std::str::FromStr for Scheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uprotocol" | "v8" => Ok(Scheme::UProtocol),
            "v6" | "time-ordered" => Ok(Scheme::TimeOrdered),
            other => Err(format!("unknown identifier scheme: {other}")),
        }
    }
}

/// Returns the process-wide monotonic factory.
pub fn uprotocol_factory() -> &'static MonotonicFactory {
    static FACTORY: OnceLock<MonotonicFactory> = OnceLock::new();
    FACTORY.get_or_init(MonotonicFactory::new)
}

/// Returns the process-wide time-ordered factory.
pub fn time_ordered_factory() -> &'static TimeOrderedFactory {
    static FACTORY: OnceLock<TimeOrderedFactory> = OnceLock::new();
    FACTORY.get_or_init(TimeOrderedFactory::new)
}

/// Generator for the custom monotonic scheme.
///
/// `last_msb` is updated with a compare-and-swap loop, so concurrent callers
/// never observe a counter step twice.
#[derive(Debug)]
pub struct MonotonicFactory {
    /// Last high half handed out; 0 until the first call.
    last_msb: AtomicU64,
    fixed_lsb: u64,
}

impl MonotonicFactory {
    /// Creates a factory with a random low half.
    pub fn new() -> Self {
        Self::with_lsb(rand::random())
    }

    /// Creates a factory with the given low half; variant bits are forced.
    pub fn with_lsb(lsb: u64) -> Self {
        Self {
            last_msb: AtomicU64::new(0),
            fixed_lsb: (lsb & VARIANT_MASK) | VARIANT_BITS,
        }
    }

    /// Returns the low half shared by every identifier from this factory.
    pub fn lsb(&self) -> u64 {
        self.fixed_lsb
    }
}

impl Default for MonotonicFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentifierFactory for MonotonicFactory {
    fn create(&self, instant: Option<DateTime<Utc>>) -> Identifier {
        let epoch_ms = epoch_millis(instant);
        let mut current = self.last_msb.load(Ordering::Acquire);
        loop {
            let next = next_msb(current, epoch_ms);
            match self
                .last_msb
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return Identifier::new(next, self.fixed_lsb),
                Err(actual) => current = actual,
            }
        }
    }
}

fn epoch_millis(instant: Option<DateTime<Utc>>) -> u64 {
    let ms = instant.unwrap_or_else(Utc::now).timestamp_millis().max(0);
    (ms as u64) & EPOCH_MS_MASK
}

fn next_msb(last: u64, epoch_ms: u64) -> u64 {
    if last != 0 && epoch_ms == last >> 16 {
        if last & MAX_COUNT < MAX_COUNT {
            return last + 1;
        }
        trace!(epoch_ms, "identifier counter saturated");
        return last;
    }
    (epoch_ms << 16) | UPROTOCOL_VERSION_BITS
}

/// Generator for RFC time-ordered (version 6) identifiers.
pub struct TimeOrderedFactory {
    context: Context,
    node_id: [u8; 6],
}

impl TimeOrderedFactory {
    /// Creates a factory with a random clock sequence and node id.
    pub fn new() -> Self {
        Self {
            context: Context::new(rand::random()),
            node_id: rand::random(),
        }
    }
}

impl std::fmt::Debug for TimeOrderedFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeOrderedFactory")
            .field("node_id", &self.node_id)
            .finish_non_exhaustive()
    }
}

impl Default for TimeOrderedFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentifierFactory for TimeOrderedFactory {
    fn create(&self, instant: Option<DateTime<Utc>>) -> Identifier {
        let instant = instant.unwrap_or_else(Utc::now);
        let seconds = instant.timestamp().max(0) as u64;
        let nanos = if instant.timestamp() < 0 {
            0
        } else {
            instant.timestamp_subsec_nanos()
        };
        let ts = Timestamp::from_unix(&self.context, seconds, nanos);
        Uuid::new_v6(ts, &self.node_id).into()
    }
}
