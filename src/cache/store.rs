//! Cache Engine Module
//!
//! The core key/value engine: TTL resolution, reactive expiration, hit/miss
//! accounting, and lifecycle event emission.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::cache::{now_ms, CacheEvent, CacheStats, Entry, EventHandler, Expiration};
use crate::config::CacheConfig;
use crate::tasks::spawn_sweep_task;

// == Store ==
/// Raw entry table plus hit/miss counters.
///
/// Lives behind the cache's single lock and is shared only with the
/// background sweep task.
pub(crate) struct Store<K, V> {
    entries: HashMap<K, Entry<V>>,
    hits: u64,
    misses: u64,
}

impl<K, V> Store<K, V> {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }
}

impl<K, V> Store<K, V>
where
    K: Eq + Hash,
{
    // == Cleanup ==
    /// Removes every dead entry and returns the number removed. Entries
    /// without an expiration are never touched.
    pub(crate) fn cleanup(&mut self) -> usize {
        let now = now_ms();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires.alive_at(now));
        before - self.entries.len()
    }
}

impl<K, V> Store<K, V>
where
    K: Serialize,
    V: Serialize,
{
    // == Size Approximation ==
    /// Approximate byte footprint: the length of the JSON encoding of the
    /// full entry list. Serialization overhead is included on purpose; this
    /// is a footprint estimate, not an exact memory measurement.
    fn approx_size(&self) -> usize {
        let entries: Vec<(&K, &Entry<V>)> = self.entries.iter().collect();
        serde_json::to_vec(&entries)
            .map(|encoded| encoded.len())
            .unwrap_or(0)
    }

    // == Stats Snapshot ==
    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            count: self.entries.len(),
            size: self.approx_size(),
        }
    }
}

// == Cache ==
/// In-process key/value cache with optional per-entry TTL expiration.
///
/// Expiration is reactive: a dead entry is physically removed only when a
/// `get` touches it, a [`cleanup`](Cache::cleanup) sweep runs, or the whole
/// store is purged. `has` and the enumeration methods report or expose dead
/// entries without removing them.
///
/// All operations run under a single internal lock and no operation returns
/// a typed error: absence and expiration both collapse to `None`, failed
/// deletes to `false`. Use [`get_expire`](Cache::get_expire) or
/// [`has`](Cache::has) to distinguish "never set" from "expired".
pub struct Cache<K, V> {
    store: Arc<Mutex<Store<K, V>>>,
    /// Default TTL in milliseconds for writes that omit an explicit TTL.
    /// Fixed at construction.
    default_ttl: Option<u64>,
    subscribers: RwLock<Vec<EventHandler<K, V>>>,
    /// Handle of the periodic sweep task, if one was started.
    sweep: Mutex<Option<JoinHandle<()>>>,
}

impl<K, V> Cache<K, V> {
    // == Constructor ==
    /// Creates an empty cache with no default TTL and no sweep task.
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(Store::new())),
            default_ttl: None,
            subscribers: RwLock::new(Vec::new()),
            sweep: Mutex::new(None),
        }
    }

    // == Subscribe ==
    /// Registers an observer for every subsequent [`CacheEvent`].
    ///
    /// Handlers run synchronously on the thread performing the operation,
    /// after the operation's state changes are complete. They must not call
    /// back into the cache.
    pub fn subscribe(&self, handler: impl Fn(&CacheEvent<K, V>) + Send + Sync + 'static) {
        self.subscribers.write().push(Box::new(handler));
    }

    // == Stop Cleanup ==
    /// Cancels the periodic sweep task if one is active.
    ///
    /// Returns true if a task was cancelled; a second call is a no-op
    /// returning false.
    pub fn stop_cleanup(&self) -> bool {
        match self.sweep.lock().take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    // == Emit ==
    /// Delivers events to every subscriber, in order. Called with the store
    /// lock released so a slow or panicking handler cannot corrupt state.
    fn emit(&self, events: &[CacheEvent<K, V>]) {
        let subscribers = self.subscribers.read();
        if subscribers.is_empty() {
            return;
        }
        for event in events {
            for handler in subscribers.iter() {
                handler(event);
            }
        }
    }
}

impl<K, V> Default for Cache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for Cache<K, V> {
    /// A discarded cache leaves no sweep task behind.
    fn drop(&mut self) {
        self.stop_cleanup();
    }
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone + Serialize + Send + 'static,
    V: Clone + Serialize + Send + 'static,
{
    // == Configured Constructor ==
    /// Creates a cache from a [`CacheConfig`].
    ///
    /// Applies the configured default TTL and, if `clean_interval` is set,
    /// immediately starts the periodic sweep task. Starting the sweep
    /// requires a running Tokio runtime.
    pub fn with_config(config: CacheConfig) -> Self {
        let store = Arc::new(Mutex::new(Store::new()));
        let sweep = config
            .clean_interval
            .map(|interval_ms| spawn_sweep_task(Arc::clone(&store), interval_ms));

        Self {
            store,
            default_ttl: config.expires,
            subscribers: RwLock::new(Vec::new()),
            sweep: Mutex::new(sweep),
        }
    }
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone + Serialize,
    V: Clone + Serialize,
{
    // == Get ==
    /// Looks up a key, removing it if it turns out to be expired.
    ///
    /// Emits `Get` first (with the raw value, stale or not), then either
    /// `Hit` (live entry, hit counter bumped) or `Miss` (absent or expired,
    /// miss counter bumped). Absence and expiration are indistinguishable
    /// in the return value.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut events = Vec::with_capacity(2);
        let result = {
            let mut store = self.store.lock();
            let found = store
                .entries
                .get(key)
                .map(|entry| (entry.value.clone(), entry.expires));

            events.push(CacheEvent::Get {
                key: key.clone(),
                value: found.as_ref().map(|(value, _)| value.clone()),
            });

            match found {
                Some((value, expires)) if expires.alive_at(now_ms()) => {
                    store.hits += 1;
                    events.push(CacheEvent::Hit {
                        key: key.clone(),
                        value: value.clone(),
                    });
                    Some(value)
                }
                Some(_) => {
                    // Expired: reactive removal on read
                    store.entries.remove(key);
                    store.misses += 1;
                    events.push(CacheEvent::Miss { key: key.clone() });
                    None
                }
                None => {
                    store.misses += 1;
                    events.push(CacheEvent::Miss { key: key.clone() });
                    None
                }
            }
        };
        self.emit(&events);
        result
    }

    // == Set ==
    /// Stores a key/value pair, unconditionally overwriting any existing
    /// entry for that key.
    ///
    /// TTL resolution order: a positive explicit `ttl_ms`, else the
    /// configured default TTL, else no expiration. An explicit TTL of zero
    /// counts as unset. Emits `Set` and always returns true.
    pub fn set(&self, key: K, value: V, ttl_ms: Option<u64>) -> bool {
        let expires = match ttl_ms.filter(|ttl| *ttl > 0).or(self.default_ttl) {
            Some(ttl) => Expiration::At(now_ms() + ttl),
            None => Expiration::Never,
        };

        {
            let mut store = self.store.lock();
            store
                .entries
                .insert(key.clone(), Entry::new(value.clone(), expires));
        }

        self.emit(&[CacheEvent::Set { key, value }]);
        true
    }

    // == Delete ==
    /// Removes a key regardless of liveness; returns whether a removal
    /// occurred. Emits no event.
    pub fn del(&self, key: &K) -> bool {
        self.store.lock().entries.remove(key).is_some()
    }

    // == Has ==
    /// Returns true iff the key is present and alive. Read-only: no counter
    /// updates, and a dead entry it discovers stays in the store.
    pub fn has(&self, key: &K) -> bool {
        self.store
            .lock()
            .entries
            .get(key)
            .is_some_and(|entry| entry.is_alive())
    }

    // == Get Expire ==
    /// Returns the raw stored expiration marker for a present key (alive or
    /// not), or None if the key is absent. Liveness is not evaluated.
    pub fn get_expire(&self, key: &K) -> Option<Expiration> {
        self.store.lock().entries.get(key).map(|entry| entry.expires)
    }

    // == Count ==
    /// Current number of entries. Dead entries count until something
    /// removes them.
    pub fn count(&self) -> usize {
        self.store.lock().entries.len()
    }

    // == Get All ==
    /// Snapshot of the whole store, raw records included.
    pub fn get_all(&self) -> HashMap<K, Entry<V>> {
        self.store.lock().entries.clone()
    }

    // == Keys ==
    /// Snapshot of all keys at call time, dead entries included.
    pub fn keys(&self) -> Vec<K> {
        self.store.lock().entries.keys().cloned().collect()
    }

    // == Values ==
    /// Snapshot of all stored records (payload plus expiration marker) at
    /// call time, dead entries included.
    pub fn values(&self) -> Vec<Entry<V>> {
        self.store.lock().entries.values().cloned().collect()
    }

    // == Entries ==
    /// Snapshot of all key/record pairs at call time, dead entries included.
    pub fn entries(&self) -> Vec<(K, Entry<V>)> {
        self.store
            .lock()
            .entries
            .iter()
            .map(|(key, entry)| (key.clone(), entry.clone()))
            .collect()
    }

    // == Purge ==
    /// Unconditionally clears every entry regardless of liveness.
    ///
    /// On an already empty store, emits `Purge(false)` and returns false
    /// without modifying state; otherwise clears, emits `Purge` with the
    /// post-clear emptiness check, and returns it.
    pub fn purge(&self) -> bool {
        let cleared = {
            let mut store = self.store.lock();
            if store.entries.is_empty() {
                false
            } else {
                store.entries.clear();
                store.entries.is_empty()
            }
        };
        self.emit(&[CacheEvent::Purge(cleared)]);
        cleared
    }

    // == Cleanup ==
    /// Removes every dead entry and returns the count removed. This is the
    /// only bulk expiration mechanism besides removal-on-read.
    pub fn cleanup(&self) -> usize {
        self.store.lock().cleanup()
    }

    // == Size ==
    /// Approximate byte footprint of the stored entries (length of their
    /// canonical JSON encoding). An empty cache reports 2, for `[]`.
    pub fn size(&self) -> usize {
        self.store.lock().approx_size()
    }

    // == Stats ==
    /// Statistics snapshot: cumulative hits/misses plus fresh count/size.
    pub fn stats(&self) -> CacheStats {
        self.store.lock().stats()
    }

    // == Purge Stats ==
    /// Zeroes the hit/miss counters, emits `PurgeStats` with the fresh
    /// snapshot, and returns it.
    pub fn purge_stats(&self) -> CacheStats {
        let stats = {
            let mut store = self.store.lock();
            store.hits = 0;
            store.misses = 0;
            store.stats()
        };
        self.emit(&[CacheEvent::PurgeStats(stats.clone())]);
        stats
    }

    // == Async Facade ==
    // Completed-immediately futures over the synchronous core, for hosts
    // that want a uniform async surface. None of these suspend.

    /// Async wrapper over [`Cache::get`]; completes immediately.
    pub async fn get_async(&self, key: &K) -> Option<V> {
        self.get(key)
    }

    /// Async wrapper over [`Cache::set`]; completes immediately.
    pub async fn set_async(&self, key: K, value: V, ttl_ms: Option<u64>) -> bool {
        self.set(key, value, ttl_ms)
    }

    /// Async wrapper over [`Cache::del`]; completes immediately.
    pub async fn del_async(&self, key: &K) -> bool {
        self.del(key)
    }

    /// Async wrapper over [`Cache::size`]; completes immediately.
    pub async fn size_async(&self) -> usize {
        self.size()
    }

    /// Async wrapper over [`Cache::stats`]; completes immediately.
    pub async fn stats_async(&self) -> CacheStats {
        self.stats()
    }
}
