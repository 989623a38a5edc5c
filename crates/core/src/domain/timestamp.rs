// File modification timestamp

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;

/// Platform- and filesystem-dependent modification time.
///
/// Zero is reserved for "could not be determined" and cannot be stored here;
/// a probe that fails returns `None` instead. Two readings are comparable only
/// when taken on the same machine and filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(NonZeroU64);

impl Timestamp {
    /// Wrap a raw clock reading; zero yields `None`
    pub const fn new(raw: u64) -> Option<Self> {
        match NonZeroU64::new(raw) {
            Some(value) => Some(Timestamp(value)),
            None => None,
        }
    }

    pub const fn get(self) -> u64 {
        self.0.get()
    }

    /// Flatten an optional reading to the legacy encoding where 0 means unknown
    pub fn raw_or_zero(reading: Option<Timestamp>) -> u64 {
        reading.map_or(0, Timestamp::get)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
