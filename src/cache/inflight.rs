//! Per-key coalescing of concurrent computations.
//!
//! The first caller for a key installs a shared pending future; callers arriving while it
//! is pending await the same future instead of starting their own. The entry removes
//! itself from the map when the computation settles.
//!
//! Every caller holds a waiter registration for as long as it awaits. When the last
//! waiter goes away before the computation settles, the entry is removed and the
//! computation is dropped with it, so the next caller for that key starts fresh.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;

type Pending<V> = Shared<BoxFuture<'static, V>>;

/// Outcome of [`InFlight::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coalesced<V> {
    pub value: V,
    /// `true` if this caller awaited a computation started by another caller.
    pub joined: bool,
}

struct Entry<V>
where
    V: Clone,
{
    pending: Pending<V>,
    waiters: usize,
    generation: u64,
}

struct Registry<K, V>
where
    V: Clone,
{
    entries: HashMap<K, Entry<V>>,
    next_generation: u64,
}

impl<K, V> Registry<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Removes the entry for `key` only if it is still the computation `generation`.
    fn remove_if_current(&mut self, key: &K, generation: u64) -> Option<Entry<V>> {
        match self.entries.get(key) {
            Some(entry) if entry.generation == generation => self.entries.remove(key),
            _ => None,
        }
    }
}

/// Registration of one caller awaiting a pending computation.
struct Waiter<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    registry: Arc<Mutex<Registry<K, V>>>,
    key: K,
    generation: u64,
}

impl<K, V> Drop for Waiter<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn drop(&mut self) {
        let abandoned = {
            let mut registry = self.registry.lock();
            let last = match registry.entries.get_mut(&self.key) {
                Some(entry) if entry.generation == self.generation => {
                    entry.waiters = entry.waiters.saturating_sub(1);
                    entry.waiters == 0
                }
                _ => false,
            };
            if last {
                registry.remove_if_current(&self.key, self.generation)
            } else {
                None
            }
        };
        // Dropped outside the lock; this cancels the computation.
        drop(abandoned);
    }
}

/// Map of keys to their in-progress computation.
pub struct InFlight<K, V>
where
    V: Clone,
{
    registry: Arc<Mutex<Registry<K, V>>>,
}

impl<K, V> InFlight<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                entries: HashMap::new(),
                next_generation: 0,
            })),
        }
    }

    /// Awaits the pending computation for `key`, or starts one from `start`.
    ///
    /// `start` is only invoked when no computation for `key` is pending. Dropping the
    /// returned future withdraws this caller; the computation is cancelled once no
    /// caller is left awaiting it.
    pub async fn run<F, Fut>(&self, key: K, start: F) -> Coalesced<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V> + Send + 'static,
    {
        let (pending, _waiter, joined) = self.register(key, start);

        Coalesced {
            value: pending.await,
            joined,
        }
    }

    fn register<F, Fut>(&self, key: K, start: F) -> (Pending<V>, Waiter<K, V>, bool)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V> + Send + 'static,
    {
        let mut registry = self.registry.lock();

        if let Some(entry) = registry.entries.get_mut(&key) {
            entry.waiters += 1;
            let pending = entry.pending.clone();
            let generation = entry.generation;
            return (pending, self.waiter(key, generation), true);
        }

        let generation = registry.next_generation;
        registry.next_generation = generation.wrapping_add(1);

        let work = start();
        let settled = Arc::clone(&self.registry);
        let settled_key = key.clone();
        let pending = async move {
            let value = work.await;
            let finished = settled.lock().remove_if_current(&settled_key, generation);
            drop(finished);
            value
        }
        .boxed()
        .shared();

        registry.entries.insert(
            key.clone(),
            Entry {
                pending: pending.clone(),
                waiters: 1,
                generation,
            },
        );
        (pending, self.waiter(key, generation), false)
    }

    fn waiter(&self, key: K, generation: u64) -> Waiter<K, V> {
        Waiter {
            registry: Arc::clone(&self.registry),
            key,
            generation,
        }
    }

    /// Number of keys with a pending computation.
    pub fn len(&self) -> usize {
        self.registry.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.lock().entries.is_empty()
    }

    /// Returns `true` if a computation for `key` is pending.
    pub fn contains(&self, key: &K) -> bool {
        self.registry.lock().entries.contains_key(key)
    }

    /// Number of callers awaiting the computation for `key`.
    pub fn waiters(&self, key: &K) -> usize {
        self.registry
            .lock()
            .entries
            .get(key)
            .map_or(0, |entry| entry.waiters)
    }
}

impl<K, V> Default for InFlight<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> std::fmt::Debug for InFlight<K, V>
where
    V: Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InFlight")
            .field("pending", &self.registry.lock().entries.len())
            .finish()
    }
}
