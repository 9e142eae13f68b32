//! Live data manager - one process-wide sampler shared by every viewer.
//!
//! Watches are ref-counted per channel, so any number of concurrently
//! mounted views observe the same synthetic values instead of each rolling
//! their own. Each refresh replaces a channel's value map wholesale behind
//! an `Arc`, never mutating it in place; readers holding the previous map
//! simply keep the older snapshot.

use crate::core::{ChannelStore, StoreEvent};
use crate::telemetry::mock::sample_fields;
use log::{debug, info, trace, warn};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock, Weak};
use std::time::Duration;
use tankmon_types::ChannelId;

/// Per-channel watch bookkeeping behind the manager lock
struct WatchState {
    /// Latest sample map, replaced wholesale on every refresh
    values: Arc<HashMap<String, f64>>,
    /// Number of views currently displaying this channel
    ref_count: usize,
}

/// Ref-counted sampler for all watched channels.
///
/// Subscribes to the registry so the watch state of a deleted channel is
/// dropped immediately instead of lingering until the next tick.
pub struct LiveDataManager {
    store: Arc<ChannelStore>,
    watches: RwLock<HashMap<ChannelId, WatchState>>,
    subscription: Mutex<Option<String>>,
}

impl LiveDataManager {
    pub fn new(store: Arc<ChannelStore>) -> Arc<Self> {
        let manager = Arc::new(Self {
            store: Arc::clone(&store),
            watches: RwLock::new(HashMap::new()),
            subscription: Mutex::new(None),
        });

        // Weak reference so the registry subscription never keeps the
        // manager alive on its own
        let weak: Weak<LiveDataManager> = Arc::downgrade(&manager);
        let subscription = store.subscribe(move |event| {
            if let StoreEvent::Deleted(id) = event {
                if let Some(manager) = weak.upgrade() {
                    manager.drop_channel(*id);
                }
            }
        });
        if let Ok(mut slot) = manager.subscription.lock() {
            *slot = Some(subscription);
        }
        manager
    }

    /// Start (or join) watching a channel. The first watcher triggers an
    /// immediate initial sample so a freshly opened view is never empty.
    /// Returns false when the channel does not exist.
    pub fn watch(&self, id: ChannelId) -> bool {
        let Some(channel) = self.store.get(id) else {
            warn!("Ignoring watch for unknown channel {}", id);
            return false;
        };

        let first_watcher = {
            let Ok(mut watches) = self.watches.write() else {
                return false;
            };
            match watches.get_mut(&id) {
                Some(state) => {
                    state.ref_count += 1;
                    false
                }
                None => {
                    watches.insert(
                        id,
                        WatchState {
                            values: Arc::new(sample_fields(&channel.fields)),
                            ref_count: 1,
                        },
                    );
                    true
                }
            }
        };

        if first_watcher {
            info!("Started sampling channel {} '{}'", id, channel.name);
        } else {
            debug!("Joined existing watch on channel {}", id);
        }
        true
    }

    /// Stop one view's watch. The last release drops the channel's values;
    /// releasing an unwatched channel is a no-op.
    pub fn release(&self, id: ChannelId) {
        let Ok(mut watches) = self.watches.write() else {
            return;
        };
        if let Some(state) = watches.get_mut(&id) {
            state.ref_count = state.ref_count.saturating_sub(1);
            if state.ref_count == 0 {
                watches.remove(&id);
                info!("Stopped sampling channel {}", id);
            }
        }
    }

    /// Latest value map for a watched channel (cheap `Arc` clone)
    pub fn values(&self, id: ChannelId) -> Option<Arc<HashMap<String, f64>>> {
        let watches = self.watches.read().ok()?;
        watches.get(&id).map(|state| Arc::clone(&state.values))
    }

    /// Channels currently being sampled
    pub fn watched(&self) -> Vec<ChannelId> {
        self.watches
            .read()
            .map(|watches| watches.keys().copied().collect())
            .unwrap_or_default()
    }

    /// One immediate resample of a single channel, outside the regular
    /// cadence. Does not disturb the periodic loop.
    pub fn refresh_now(&self, id: ChannelId) {
        debug!("Manual refresh for channel {}", id);
        self.resample(id);
    }

    /// Resample every watched channel. Watches whose channel vanished from
    /// the registry are discarded.
    pub fn tick(&self) {
        let watched = self.watched();
        trace!("Refresh tick over {} watched channels", watched.len());
        for id in watched {
            self.resample(id);
        }
    }

    /// Periodic refresh loop; runs until the task is dropped
    pub async fn run(self: Arc<Self>, period: Duration) {
        let mut interval = tokio::time::interval(period);
        // A delayed tick fires once and the cadence continues; missed
        // samples are lost, never queued
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            self.tick();
        }
    }

    fn resample(&self, id: ChannelId) {
        // Read the schema before taking the watch lock; never hold both
        let channel = self.store.get(id);

        let Ok(mut watches) = self.watches.write() else {
            return;
        };
        match channel {
            Some(channel) => {
                if let Some(state) = watches.get_mut(&id) {
                    state.values = Arc::new(sample_fields(&channel.fields));
                }
            }
            None => {
                if watches.remove(&id).is_some() {
                    debug!("Dropped watch for vanished channel {}", id);
                }
            }
        }
    }

    fn drop_channel(&self, id: ChannelId) {
        if let Ok(mut watches) = self.watches.write() {
            if watches.remove(&id).is_some() {
                info!("Channel {} deleted, sampling stopped", id);
            }
        }
    }
}

impl Drop for LiveDataManager {
    fn drop(&mut self) {
        if let Ok(mut slot) = self.subscription.lock() {
            if let Some(subscription) = slot.take() {
                self.store.unsubscribe(&subscription);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tankmon_types::FieldSpec;

    fn seeded_store() -> (Arc<ChannelStore>, ChannelId) {
        let store = Arc::new(ChannelStore::new());
        let channel = store
            .create(
                "Tank_003",
                vec![
                    FieldSpec::numeric("temperature", 23.5),
                    FieldSpec::text("status", "ok"),
                ],
                Vec::new(),
            )
            .unwrap();
        (store, channel.id)
    }

    #[test]
    fn test_first_watch_samples_immediately() {
        let (store, id) = seeded_store();
        let manager = LiveDataManager::new(store);

        assert!(manager.values(id).is_none());
        assert!(manager.watch(id));

        let values = manager.values(id).unwrap();
        assert_eq!(values.len(), 1);
        assert!(values.contains_key("temperature"));
    }

    #[test]
    fn test_watch_unknown_channel_refused() {
        let (store, _) = seeded_store();
        let manager = LiveDataManager::new(store);

        assert!(!manager.watch(ChannelId(99)));
        assert!(manager.watched().is_empty());
    }

    #[test]
    fn test_concurrent_watchers_share_one_sample() {
        let (store, id) = seeded_store();
        let manager = LiveDataManager::new(store);

        manager.watch(id);
        manager.watch(id);

        let first_view = manager.values(id).unwrap();
        let second_view = manager.values(id).unwrap();
        assert!(Arc::ptr_eq(&first_view, &second_view));

        // One release keeps the shared watch alive
        manager.release(id);
        assert!(manager.values(id).is_some());
        manager.release(id);
        assert!(manager.values(id).is_none());
    }

    #[test]
    fn test_release_without_watch_is_noop() {
        let (store, id) = seeded_store();
        let manager = LiveDataManager::new(store);

        manager.release(id);
        assert!(manager.watched().is_empty());
    }

    #[test]
    fn test_refresh_replaces_map_wholesale() {
        let (store, id) = seeded_store();
        let manager = LiveDataManager::new(store);
        manager.watch(id);

        let before = manager.values(id).unwrap();
        manager.refresh_now(id);
        let after = manager.values(id).unwrap();

        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(after.len(), before.len());
    }

    #[test]
    fn test_delete_drops_watch_state() {
        let (store, id) = seeded_store();
        let manager = LiveDataManager::new(Arc::clone(&store));
        manager.watch(id);

        store.delete(id);

        assert!(manager.values(id).is_none());
        assert!(manager.watched().is_empty());
    }

    #[test]
    fn test_tick_resamples_all_watched_channels() {
        let (store, first) = seeded_store();
        let second = store
            .create("Tank_004", vec![FieldSpec::numeric("level", 85.3)], Vec::new())
            .unwrap()
            .id;
        let manager = LiveDataManager::new(store);
        manager.watch(first);
        manager.watch(second);

        let before_first = manager.values(first).unwrap();
        let before_second = manager.values(second).unwrap();
        manager.tick();

        assert!(!Arc::ptr_eq(&before_first, &manager.values(first).unwrap()));
        assert!(!Arc::ptr_eq(&before_second, &manager.values(second).unwrap()));
    }

    #[test]
    fn test_manager_drop_unsubscribes_from_store() {
        let (store, _) = seeded_store();
        let manager = LiveDataManager::new(Arc::clone(&store));
        assert_eq!(store.subscriber_count(), 1);

        drop(manager);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_run_loop_keeps_values_fresh() {
        let (store, id) = seeded_store();
        let manager = LiveDataManager::new(store);
        manager.watch(id);

        let before = manager.values(id).unwrap();
        let task = tokio::spawn(Arc::clone(&manager).run(Duration::from_millis(10)));
        tokio::time::sleep(Duration::from_millis(50)).await;
        task.abort();

        let after = manager.values(id).unwrap();
        assert!(!Arc::ptr_eq(&before, &after));
    }
}
