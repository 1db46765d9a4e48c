//! Cache Statistics Module
//!
//! Snapshot of cache performance counters plus current footprint.

use serde::Serialize;

// == Cache Stats ==
/// A point-in-time statistics snapshot.
///
/// `hits` and `misses` accumulate since construction or the last counter
/// reset; `count` and `size` are computed fresh at snapshot time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key absent or expired)
    pub misses: u64,
    /// Current number of entries, dead entries included
    pub count: usize,
    /// Approximate byte footprint of the serialized store
    pub size: usize,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = CacheStats::default();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.size, 0);
    }

    #[test]
    fn test_hit_rate_no_reads() {
        let stats = CacheStats::default();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_all_hits() {
        let stats = CacheStats {
            hits: 3,
            ..Default::default()
        };
        assert_eq!(stats.hit_rate(), 1.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let stats = CacheStats {
            hits: 1,
            misses: 1,
            ..Default::default()
        };
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn test_stats_serialize() {
        let stats = CacheStats {
            hits: 2,
            misses: 1,
            count: 4,
            size: 96,
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(json, r#"{"hits":2,"misses":1,"count":4,"size":96}"#);
    }
}
