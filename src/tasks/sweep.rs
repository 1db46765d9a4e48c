//! Periodic Sweep Task
//!
//! Background task that invokes the cleanup sweep on a fixed interval,
//! removing dead entries that no read has touched.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::Store;

/// Spawns the periodic sweep over the shared store.
///
/// The task loops forever, sleeping for `interval_ms` between sweeps. Each
/// sweep acquires the same lock as foreground operations, so a sweep and a
/// caller-issued operation never observe the store mid-mutation. The
/// returned handle is held by the owning cache and aborted by
/// `stop_cleanup` or on drop.
pub(crate) fn spawn_sweep_task<K, V>(
    store: Arc<Mutex<Store<K, V>>>,
    interval_ms: u64,
) -> JoinHandle<()>
where
    K: Eq + Hash + Send + 'static,
    V: Send + 'static,
{
    let interval = Duration::from_millis(interval_ms);

    tokio::spawn(async move {
        info!("starting sweep task with interval of {} ms", interval_ms);

        loop {
            tokio::time::sleep(interval).await;

            let removed = store.lock().cleanup();

            if removed > 0 {
                info!("sweep removed {} expired entries", removed);
            } else {
                debug!("sweep found no expired entries");
            }
        }
    })
}
