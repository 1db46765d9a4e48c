//! Configuration Module
//!
//! Construction options for the cache, loadable from environment variables.

use std::env;

/// Cache construction options.
///
/// Both knobs are disabled by default and immutable once the cache is
/// built. Zero or negative values are treated as disabled rather than
/// rejected.
#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
    /// Default TTL in milliseconds applied to writes that omit an explicit
    /// TTL; None disables the default
    pub expires: Option<u64>,
    /// Periodic sweep interval in milliseconds; None means no sweep task
    /// is started
    pub clean_interval: Option<u64>,
}

impl CacheConfig {
    /// Creates a config with both options disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default TTL in milliseconds. Zero disables it.
    pub fn with_expires(mut self, expires_ms: u64) -> Self {
        self.expires = Some(expires_ms).filter(|ms| *ms > 0);
        self
    }

    /// Sets the sweep interval in milliseconds. Zero disables the sweep.
    pub fn with_clean_interval(mut self, interval_ms: u64) -> Self {
        self.clean_interval = Some(interval_ms).filter(|ms| *ms > 0);
        self
    }

    /// Creates a config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_EXPIRES` - Default TTL in milliseconds
    /// - `CACHE_CLEAN_INTERVAL` - Sweep interval in milliseconds
    ///
    /// A missing, non-numeric, zero, or negative value leaves the
    /// corresponding option disabled.
    pub fn from_env() -> Self {
        Self {
            expires: read_positive_ms("CACHE_EXPIRES"),
            clean_interval: read_positive_ms("CACHE_CLEAN_INTERVAL"),
        }
    }
}

fn read_positive_ms(var: &str) -> Option<u64> {
    env::var(var)
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .filter(|ms| *ms > 0)
        .map(|ms| ms as u64)
}
