//! Channel registry - the single source of truth for registered channels.
//!
//! Channels live in an id-indexed map with a separate insertion-order index,
//! so lookups are O(1) while listing stays stable. Every mutation goes
//! through a command method here, and registered subscribers are notified
//! after the mutation commits.

use crate::core::constants::API_KEY_SUFFIX_LEN;
use crate::core::error::{Result, StoreError};
use chrono::Local;
use log::{debug, info};
use rand::Rng;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use tankmon_types::{Channel, ChannelId, ChannelPatch, FieldSpec};
use uuid::Uuid;

/// Event delivered to subscribers after a registry mutation commits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    Created(ChannelId),
    Updated(ChannelId),
    Deleted(ChannelId),
}

impl StoreEvent {
    /// Channel the event refers to
    pub fn channel_id(&self) -> ChannelId {
        match self {
            StoreEvent::Created(id) | StoreEvent::Updated(id) | StoreEvent::Deleted(id) => *id,
        }
    }
}

type SubscriberFn = Arc<dyn Fn(&StoreEvent) + Send + Sync>;

/// Channel map plus iteration-order bookkeeping behind the registry lock
struct StoreInner {
    channels: HashMap<ChannelId, Channel>,
    /// Ids in insertion order, for stable listing
    order: Vec<ChannelId>,
    /// Next id to hand out; ids are never reused within a process
    next_id: i64,
}

/// Thread-safe channel registry.
///
/// Subscriber callbacks run after the mutation commits, with no registry
/// lock held, so a callback may read the registry, mutate it, or manage
/// subscriptions without deadlocking.
pub struct ChannelStore {
    inner: RwLock<StoreInner>,
    /// Callbacks keyed by uuid so they can be removed again
    subscribers: Mutex<HashMap<String, SubscriberFn>>,
}

/// Access token in the `key_{name}_{suffix}` shape handed to ingesting devices
fn generate_api_key(name: &str) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..API_KEY_SUFFIX_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("key_{}_{}", name.to_lowercase(), suffix)
}

impl ChannelStore {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                channels: HashMap::new(),
                order: Vec::new(),
                next_id: 1,
            }),
            subscribers: Mutex::new(HashMap::new()),
        }
    }

    /// Create a registry preloaded with the given channels.
    /// The id counter starts past the highest seeded id.
    pub fn with_seed(channels: Vec<Channel>) -> Self {
        let next_id = channels.iter().map(|c| c.id.0).max().unwrap_or(0) + 1;
        let order: Vec<ChannelId> = channels.iter().map(|c| c.id).collect();
        let channels: HashMap<ChannelId, Channel> =
            channels.into_iter().map(|c| (c.id, c)).collect();
        info!("Seeded registry with {} channels", channels.len());
        Self {
            inner: RwLock::new(StoreInner {
                channels,
                order,
                next_id,
            }),
            subscribers: Mutex::new(HashMap::new()),
        }
    }

    /// Register a new channel.
    ///
    /// The name is trimmed and must not be empty; fields with blank names are
    /// dropped and at least one field must survive. On success the channel
    /// gets the next id, a generated api key, a `last_update` stamp, no
    /// widgets, and a slot at the end of the listing order.
    pub fn create(
        &self,
        name: &str,
        fields: Vec<FieldSpec>,
        assigned_users: Vec<String>,
    ) -> Result<Channel> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyChannelName);
        }
        let fields: Vec<FieldSpec> = fields
            .into_iter()
            .filter(|f| !f.name.trim().is_empty())
            .collect();
        if fields.is_empty() {
            return Err(StoreError::NoFields);
        }

        let channel = {
            let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
            let id = ChannelId(inner.next_id);
            inner.next_id += 1;
            let channel = Channel {
                id,
                name: name.to_string(),
                fields,
                widgets: Vec::new(),
                api_key: generate_api_key(name),
                last_update: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                assigned_users,
            };
            inner.channels.insert(id, channel.clone());
            inner.order.push(id);
            channel
        };

        info!("Created channel {} '{}'", channel.id, channel.name);
        self.notify(&StoreEvent::Created(channel.id));
        Ok(channel)
    }

    /// Shallow-merge a partial record into an existing channel
    pub fn update(&self, id: ChannelId, patch: ChannelPatch) -> Result<()> {
        {
            let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
            let channel = inner
                .channels
                .get_mut(&id)
                .ok_or(StoreError::ChannelNotFound(id))?;
            patch.apply(channel);
        }
        debug!("Updated channel {}", id);
        self.notify(&StoreEvent::Updated(id));
        Ok(())
    }

    /// Remove a channel. Returns false when the id is unknown; repeated
    /// deletes are silent no-ops.
    pub fn delete(&self, id: ChannelId) -> bool {
        let removed = {
            let mut inner = match self.inner.write() {
                Ok(inner) => inner,
                Err(_) => return false,
            };
            let removed = inner.channels.remove(&id).is_some();
            if removed {
                inner.order.retain(|existing| *existing != id);
            }
            removed
        };

        if removed {
            info!("Deleted channel {}", id);
            self.notify(&StoreEvent::Deleted(id));
        }
        removed
    }

    pub fn get(&self, id: ChannelId) -> Option<Channel> {
        let inner = self.inner.read().ok()?;
        inner.channels.get(&id).cloned()
    }

    /// All channels in insertion order
    pub fn list(&self) -> Vec<Channel> {
        self.inner
            .read()
            .map(|inner| {
                inner
                    .order
                    .iter()
                    .filter_map(|id| inner.channels.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Channels the given user is assigned to, in insertion order.
    /// The member view is this filter; there is no separate data set.
    pub fn list_for_user(&self, email: &str) -> Vec<Channel> {
        self.list()
            .into_iter()
            .filter(|c| c.is_assigned(email))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.channels.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Register a callback for registry events.
    /// Returns a subscription ID that can be used to unsubscribe later.
    ///
    /// # Important
    /// Callers MUST call `unsubscribe` when the callback is no longer needed
    /// (e.g., when a view is torn down) to prevent memory leaks.
    pub fn subscribe<F>(&self, callback: F) -> String
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        let id = Uuid::new_v4().to_string();
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.insert(id.clone(), Arc::new(callback));
        }
        debug!("Added registry subscriber {}", id);
        id
    }

    /// Remove a previously registered callback by its ID.
    /// Returns true if a callback was removed, false if the ID was not found.
    pub fn unsubscribe(&self, subscription_id: &str) -> bool {
        self.subscribers
            .lock()
            .map(|mut subscribers| subscribers.remove(subscription_id).is_some())
            .unwrap_or(false)
    }

    /// Number of registered subscribers (for debugging)
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }

    fn notify(&self, event: &StoreEvent) {
        // Clone the handles and release the guard before invoking anything,
        // so a callback may subscribe, unsubscribe or mutate the registry
        let callbacks: Vec<SubscriberFn> = match self.subscribers.lock() {
            Ok(subscribers) => subscribers.values().cloned().collect(),
            Err(_) => return,
        };
        for callback in callbacks {
            callback(event);
        }
    }
}

impl Default for ChannelStore {
    fn default() -> Self {
        Self::new()
    }
}
