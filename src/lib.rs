//! vcache - an in-process key/value cache
//!
//! Provides optional per-entry TTL expiration, hit/miss statistics, and
//! typed lifecycle event notifications. Expiration is reactive: dead entries
//! are removed when a read touches them, when a cleanup sweep runs, or when
//! the store is purged - never proactively against a memory budget.
//!
//! # Example
//! ```
//! use vcache::Cache;
//!
//! let cache = Cache::new();
//! cache.set("user:1", "alice", Some(60_000));
//!
//! assert_eq!(cache.get(&"user:1"), Some("alice"));
//! assert!(cache.has(&"user:1"));
//!
//! let stats = cache.stats();
//! assert_eq!(stats.hits, 1);
//! ```

pub mod cache;
pub mod config;
mod tasks;

pub use cache::{Cache, CacheEvent, CacheStats, Entry, Expiration};
pub use config::CacheConfig;
