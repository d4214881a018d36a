//! In-memory score store.
//!
//! Backed by a bounded [`moka`] cache keyed by [`PairKey`]. Capacity eviction only drops
//! entries that will be recomputed on the next request.

use async_trait::async_trait;
use moka::sync::Cache;

use super::error::StoreResult;
use super::store::ScoreStore;
use crate::constants::DEFAULT_CACHE_CAPACITY;
use crate::model::{PairKey, ScoreRecord};

/// Bounded in-process [`ScoreStore`].
pub struct MemoryScoreStore {
    entries: Cache<PairKey, ScoreRecord>,
}

impl MemoryScoreStore {
    /// Creates a store with the default capacity.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Creates a store with a max entry capacity.
    #[inline]
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            entries: Cache::builder().max_capacity(capacity).build(),
        }
    }

    /// Returns the record for `key`, if any.
    #[inline]
    pub fn get(&self, key: &PairKey) -> Option<ScoreRecord> {
        self.entries.get(key)
    }

    /// Inserts or replaces a record.
    #[inline]
    pub fn insert(&self, record: ScoreRecord) {
        self.entries.insert(record.key(), record);
    }

    /// Removes the record for `key`.
    #[inline]
    pub fn remove(&self, key: &PairKey) -> Option<ScoreRecord> {
        self.entries.remove(key)
    }

    /// Returns the number of stored records.
    ///
    /// Counts are eventually consistent; call [`run_pending_tasks`](Self::run_pending_tasks)
    /// first when an exact figure is needed.
    #[inline]
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Returns `true` if the store is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.entry_count() == 0
    }

    /// Returns `true` if a record exists for `key`.
    #[inline]
    pub fn contains(&self, key: &PairKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Clears all entries.
    #[inline]
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }

    /// Runs any pending maintenance tasks in the underlying cache.
    #[inline]
    pub fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks();
    }
}

impl Default for MemoryScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryScoreStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryScoreStore")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

#[async_trait]
impl ScoreStore for MemoryScoreStore {
    async fn lookup(&self, key: &PairKey) -> StoreResult<Option<ScoreRecord>> {
        Ok(self.get(key))
    }

    async fn upsert(&self, record: ScoreRecord) -> StoreResult<()> {
        self.insert(record);
        Ok(())
    }
}
