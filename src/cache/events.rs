//! Cache Events Module
//!
//! Typed lifecycle notifications emitted by the cache engine. Observers
//! register a callback via [`Cache::subscribe`](crate::cache::Cache::subscribe)
//! and receive every event synchronously on the calling thread.

use crate::cache::CacheStats;

// == Cache Event ==
/// A lifecycle occurrence inside the cache.
///
/// Delivery is synchronous and best-effort: events are not buffered or
/// persisted, and handlers run only after the operation's state changes are
/// complete. A handler must therefore not assume an entry it observes is
/// still present in the store.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheEvent<K, V> {
    /// Every read emits this first, before the hit/miss outcome is resolved.
    /// `value` is `None` when the key is absent; on the expired path it still
    /// carries the stale payload.
    Get { key: K, value: Option<V> },
    /// A read found a live entry.
    Hit { key: K, value: V },
    /// A read found nothing usable (absent or expired).
    Miss { key: K },
    /// A write stored a value.
    Set { key: K, value: V },
    /// A bulk purge ran; `true` iff entries were actually cleared.
    Purge(bool),
    /// The hit/miss counters were reset; carries the zeroed snapshot.
    PurgeStats(CacheStats),
}

// == Event Handler ==
/// Boxed observer callback. Handlers run inline during the emitting
/// operation, so they should be short and must not call back into the cache.
pub type EventHandler<K, V> = Box<dyn Fn(&CacheEvent<K, V>) + Send + Sync>;
