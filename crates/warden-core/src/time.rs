//! Block time
//!
//! The engine never reads a wall clock. Every time-dependent decision uses
//! the timestamp of the block being executed, supplied by the host.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Milliseconds since the Unix epoch
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Create a timestamp from milliseconds since the epoch
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Create a timestamp from whole seconds since the epoch
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs.saturating_mul(1000))
    }

    /// Milliseconds since the epoch
    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /// This timestamp moved forward by `duration`, saturating at the end of time
    pub fn saturating_add(&self, duration: Duration) -> Self {
        let ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        Self(self.0.saturating_add(ms))
    }

    /// True when `self` is strictly before `other`
    pub fn is_before(&self, other: Timestamp) -> bool {
        self.0 < other.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Header of the block currently being executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Block height
    pub height: u64,
    /// Block timestamp
    pub time: Timestamp,
}

impl BlockHeader {
    /// Create a header
    pub fn new(height: u64, time: Timestamp) -> Self {
        Self { height, time }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strictly_before() {
        let t = Timestamp::from_secs(10);
        assert!(Timestamp::from_secs(9).is_before(t));
        assert!(!t.is_before(t));
        assert!(!Timestamp::from_secs(11).is_before(t));
    }

    #[test]
    fn add_saturates() {
        let t = Timestamp(u64::MAX - 1);
        assert_eq!(t.saturating_add(Duration::from_secs(1)), Timestamp(u64::MAX));
        assert_eq!(
            Timestamp::from_secs(1).saturating_add(Duration::from_millis(500)),
            Timestamp(1500)
        );
    }
}
