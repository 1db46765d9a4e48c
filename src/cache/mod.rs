//! Cache Module
//!
//! The cache engine: entry model, statistics, events, and the engine itself.

mod entry;
mod events;
mod stats;
mod store;


// Re-export public types
pub use entry::{now_ms, Entry, Expiration};
pub use events::{CacheEvent, EventHandler};
pub use stats::CacheStats;
pub use store::Cache;

// Shared with the sweep task only
pub(crate) use store::Store;
