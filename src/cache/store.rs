use async_trait::async_trait;

use super::error::StoreResult;
use crate::model::{PairKey, ScoreRecord};

#[async_trait]
/// Keyed persistence for [`ScoreRecord`]s.
///
/// The store applies no freshness filtering; callers judge the returned timestamp.
/// Implementations must tolerate concurrent calls without caller-side locking.
pub trait ScoreStore: Send + Sync {
    /// Returns the record for `key`, if any.
    async fn lookup(&self, key: &PairKey) -> StoreResult<Option<ScoreRecord>>;

    /// Inserts or replaces the record for `record.key()`.
    async fn upsert(&self, record: ScoreRecord) -> StoreResult<()>;
}
