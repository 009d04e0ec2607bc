//! Record identifier - opaque 64-bit id assigned when a user is stored
//!
//! Layout (snowflake style):
//! - Bits 62-22: Milliseconds since the directory epoch
//! - Bits 21-12: Worker ID (0-1023)
//! - Bits 11-0:  Per-millisecond sequence (0-4095)
//!
//! Ids travel as decimal strings in JSON and URLs. Anything that is not a
//! positive decimal integer is rejected as malformed.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Identifier of a stored user record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(i64);

impl RecordId {
    /// Directory epoch: 2024-01-01 00:00:00 UTC (milliseconds)
    pub const EPOCH: i64 = 1_704_067_200_000;

    /// Wrap a raw value read back from storage
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Milliseconds since the Unix epoch at which the id was minted
    #[inline]
    pub fn timestamp(&self) -> i64 {
        (self.0 >> 22) + Self::EPOCH
    }

    /// Worker that minted the id
    #[inline]
    pub fn worker_id(&self) -> u16 {
        ((self.0 >> 12) & 0x3FF) as u16
    }

    /// Parse the external (decimal string) form.
    ///
    /// Signs, whitespace, leading zeros and zero itself are all malformed:
    /// the generator never produces them, so accepting them would only make
    /// two spellings refer to one record.
    pub fn parse(s: &str) -> Result<Self, RecordIdParseError> {
        let well_formed = !s.is_empty()
            && s.bytes().all(|b| b.is_ascii_digit())
            && !s.starts_with('0');
        if !well_formed {
            return Err(RecordIdParseError::InvalidFormat);
        }

        s.parse::<i64>()
            .map(RecordId)
            .map_err(|_| RecordIdParseError::OutOfRange)
    }
}

/// Error when parsing a record id from its external form
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RecordIdParseError {
    #[error("invalid record id format")]
    InvalidFormat,

    #[error("record id out of range")]
    OutOfRange,
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<RecordId> for i64 {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl std::str::FromStr for RecordId {
    type Err = RecordIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordId::parse(s)
    }
}

// Serialize as string for JSON (JavaScript number safety)
impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        RecordId::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Clock state shared by every id a generator mints
#[derive(Debug)]
struct GeneratorState {
    last_timestamp: i64,
    sequence: i64,
}

/// Thread-safe record id generator
///
/// Produces strictly increasing ids, up to 4096 per millisecond per worker.
/// Ids sort in creation order, which the listing relies on as a tie-breaker.
#[derive(Debug)]
pub struct IdGenerator {
    worker_id: u16,
    state: Mutex<GeneratorState>,
}

impl IdGenerator {
    /// Largest accepted worker id
    pub const MAX_WORKER_ID: u16 = 1023;

    /// Create a generator for the given worker.
    ///
    /// Worker ids above [`Self::MAX_WORKER_ID`] are masked into range.
    pub fn new(worker_id: u16) -> Self {
        Self {
            worker_id: worker_id & Self::MAX_WORKER_ID,
            state: Mutex::new(GeneratorState {
                last_timestamp: 0,
                sequence: 0,
            }),
        }
    }

    /// Mint the next id
    pub fn generate(&self) -> RecordId {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let mut timestamp = current_millis().max(state.last_timestamp);

        if timestamp == state.last_timestamp {
            state.sequence = (state.sequence + 1) & 0xFFF;
            if state.sequence == 0 {
                // Sequence exhausted for this millisecond, borrow the next one
                timestamp += 1;
            }
        } else {
            state.sequence = 0;
        }
        state.last_timestamp = timestamp;

        RecordId::new(
            ((timestamp - RecordId::EPOCH) << 22)
                | (i64::from(self.worker_id) << 12)
                | state.sequence,
        )
    }

    /// Get the worker ID of this generator
    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

fn current_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(RecordId::EPOCH)
}
