use chrono::{DateTime, TimeDelta, Utc};

use super::types::CacheState;
use crate::model::ScoreRecord;

/// Decides whether a stored record may be served without recomputation.
///
/// A record is fresh iff `now - computed_at <= window`. Records stamped in the future
/// (clock skew between writers) count as fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessPolicy {
    window: TimeDelta,
}

impl FreshnessPolicy {
    pub fn new(window: TimeDelta) -> Self {
        Self { window }
    }

    pub fn window(&self) -> TimeDelta {
        self.window
    }

    pub fn is_fresh_at(&self, record: &ScoreRecord, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(record.computed_at) <= self.window
    }

    pub fn classify(&self, record: Option<&ScoreRecord>, now: DateTime<Utc>) -> CacheState {
        match record {
            None => CacheState::Absent,
            Some(record) if self.is_fresh_at(record, now) => CacheState::Fresh,
            Some(_) => CacheState::Stale,
        }
    }
}
