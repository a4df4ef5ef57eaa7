use std::fmt;

use crate::error::ClockError;

/// Opaque label identifying a process, used for display and log correlation only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ProcessId(String);

impl ProcessId {
    pub fn new(label: impl Into<String>) -> Self {
        ProcessId(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProcessId {
    fn from(label: &str) -> Self {
        ProcessId(label.to_string())
    }
}

impl From<String> for ProcessId {
    fn from(label: String) -> Self {
        ProcessId(label)
    }
}

/// A Lamport timestamp.
///
/// The counter is 64 bits wide. Advancing past `u64::MAX` is refused with
/// [`ClockError::Overflow`] instead of saturating, since a saturated clock would
/// stop increasing.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);
    pub const MAX: Timestamp = Timestamp(u64::MAX);

    pub const fn new(value: u64) -> Self {
        Timestamp(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the next timestamp, or `Overflow` if `self` is already `u64::MAX`.
    pub fn increment(self) -> Result<Timestamp, ClockError> {
        self.0.checked_add(1).map(Timestamp).ok_or(ClockError::Overflow)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Timestamp {
    fn from(value: u64) -> Self {
        Timestamp(value)
    }
}

impl From<Timestamp> for u64 {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

// Signed inputs (including unsuffixed integer literals, which default to `i32`)
// are accepted and validated at runtime.
macro_rules! timestamp_try_from_signed {
    ($($int:ty),*) => {
        $(
            impl TryFrom<$int> for Timestamp {
                type Error = ClockError;

                fn try_from(value: $int) -> Result<Self, Self::Error> {
                    u64::try_from(value).map(Timestamp).map_err(|_| {
                        ClockError::InvalidArgument(format!("timestamp must be non-negative, got {}", value))
                    })
                }
            }
        )*
    };
}

timestamp_try_from_signed!(i8, i16, i32, i64, isize);

/// The envelope carried from a send to its matching receive.
///
/// Only `timestamp` takes part in the clock rules; `source` and `target` are
/// routing labels for whoever delivers the message.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub source: ProcessId,
    pub target: ProcessId,
    pub timestamp: Timestamp,
}
