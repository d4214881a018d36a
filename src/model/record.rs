use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::offer::OfferId;
use super::subject::SubjectId;

/// Composite cache key of a (subject, offer) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairKey {
    pub subject_id: SubjectId,
    pub offer_id: OfferId,
}

impl PairKey {
    pub fn new(subject_id: SubjectId, offer_id: OfferId) -> Self {
        Self {
            subject_id,
            offer_id,
        }
    }
}

impl std::fmt::Display for PairKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.subject_id, self.offer_id)
    }
}

/// Which of the two scoring providers produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderRole {
    Primary,
    Fallback,
}

impl ProviderRole {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderRole::Primary => "primary",
            ProviderRole::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for ProviderRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cached compatibility result for one pair. At most one record exists per [`PairKey`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub subject_id: SubjectId,
    pub offer_id: OfferId,
    /// Compatibility score in `0..=100`.
    pub percent: u8,
    /// Requirements the subject satisfies.
    pub matched: Vec<String>,
    /// Requirements the subject lacks.
    pub missing: Vec<String>,
    pub rationale: String,
    pub scored_by: ProviderRole,
    /// Time of the last computation; drives freshness.
    pub computed_at: DateTime<Utc>,
}

impl ScoreRecord {
    #[inline]
    pub fn key(&self) -> PairKey {
        PairKey::new(self.subject_id, self.offer_id)
    }
}
