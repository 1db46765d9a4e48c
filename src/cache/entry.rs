//! Cache Entry Module
//!
//! Defines the unit of storage: a value paired with an expiration marker.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Serialize, Serializer};

// == Expiration ==
/// Expiration marker for a cache entry.
///
/// Set once at write time and immutable until the entry is overwritten or
/// deleted. There is no sliding TTL: reads never renew an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiration {
    /// The entry never expires.
    Never,
    /// The entry is dead once the given Unix-epoch millisecond timestamp
    /// has been reached.
    At(u64),
}

impl Expiration {
    // == Liveness ==
    /// Checks liveness against the given timestamp.
    ///
    /// `Never` is always alive; `At(t)` is alive iff `t > now`. Once the
    /// deadline is reached the entry is immediately dead.
    pub fn alive_at(&self, now: u64) -> bool {
        match self {
            Expiration::Never => true,
            Expiration::At(deadline) => *deadline > now,
        }
    }
}

// `size` measures the JSON encoding of the store, where a missing deadline
// encodes as `false` and a deadline as the raw millisecond number.
impl Serialize for Expiration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Expiration::Never => serializer.serialize_bool(false),
            Expiration::At(deadline) => serializer.serialize_u64(*deadline),
        }
    }
}

// == Cache Entry ==
/// A single stored record: the payload plus its expiration marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry<V> {
    /// The stored value
    pub value: V,
    /// Expiration marker, fixed at write time
    #[serde(rename = "exp")]
    pub expires: Expiration,
}

impl<V> Entry<V> {
    // == Constructor ==
    pub fn new(value: V, expires: Expiration) -> Self {
        Self { value, expires }
    }

    // == Is Alive ==
    /// Checks whether the entry is alive right now.
    pub fn is_alive(&self) -> bool {
        self.expires.alive_at(now_ms())
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, or None if the entry never
    /// expires. A dead entry reports `Some(0)`.
    pub fn ttl_remaining_ms(&self) -> Option<u64> {
        match self.expires {
            Expiration::Never => None,
            Expiration::At(deadline) => Some(deadline.saturating_sub(now_ms())),
        }
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_is_always_alive() {
        assert!(Expiration::Never.alive_at(0));
        assert!(Expiration::Never.alive_at(u64::MAX));
    }

    #[test]
    fn test_deadline_boundary() {
        let exp = Expiration::At(1_000);

        assert!(exp.alive_at(999));
        // Dead exactly at the deadline
        assert!(!exp.alive_at(1_000));
        assert!(!exp.alive_at(1_001));
    }

    #[test]
    fn test_entry_no_expiration() {
        let entry = Entry::new("test_value", Expiration::Never);

        assert!(entry.is_alive());
        assert!(entry.ttl_remaining_ms().is_none());
    }

    #[test]
    fn test_entry_with_future_deadline() {
        let entry = Entry::new("test_value", Expiration::At(now_ms() + 10_000));

        assert!(entry.is_alive());
        let remaining = entry.ttl_remaining_ms().unwrap();
        assert!(remaining <= 10_000);
        assert!(remaining >= 9_000);
    }

    #[test]
    fn test_entry_past_deadline() {
        let entry = Entry::new("test_value", Expiration::At(now_ms().saturating_sub(1)));

        assert!(!entry.is_alive());
        assert_eq!(entry.ttl_remaining_ms(), Some(0));
    }

    #[test]
    fn test_entry_json_shape_never() {
        let entry = Entry::new(1, Expiration::Never);
        let json = serde_json::to_string(&entry).unwrap();

        assert_eq!(json, r#"{"value":1,"exp":false}"#);
    }

    #[test]
    fn test_entry_json_shape_deadline() {
        let entry = Entry::new("v", Expiration::At(1_234));
        let json = serde_json::to_string(&entry).unwrap();

        assert_eq!(json, r#"{"value":"v","exp":1234}"#);
    }
}
