use serde::Serialize;

use crate::cache::MatchStatus;
use crate::model::{Offer, ScoreRecord, Subject};

/// A score for one pair and where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPair {
    pub record: ScoreRecord,
    pub status: MatchStatus,
}

impl ScoredPair {
    #[inline]
    pub fn percent(&self) -> u8 {
        self.record.percent
    }
}

/// One entry of a subject's offer ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedOffer {
    pub offer: Offer,
    pub record: ScoreRecord,
    pub status: MatchStatus,
}

/// One entry of an offer's candidate ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSubject {
    pub subject: Subject,
    pub record: ScoreRecord,
    pub status: MatchStatus,
}
