use thiserror::Error;

use crate::cache::StoreError;
use crate::model::{OfferId, SubjectId};
use crate::repository::RepositoryError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Matching engine errors.
///
/// `Clone` because one result may be handed to several callers coalesced on the same pair.
pub enum MatchError {
    #[error("subject not found: {id}")]
    SubjectNotFound { id: SubjectId },

    #[error("offer not found: {id}")]
    OfferNotFound { id: OfferId },

    /// Both providers failed for a pair; nothing was cached.
    #[error("scoring unavailable: {reason}")]
    ScoringUnavailable { reason: String },

    /// The primary provider returned output violating the scoring contract.
    #[error("scoring provider returned malformed output: {reason}")]
    ScoringMalformed { reason: String },

    #[error("record repository unavailable: {reason}")]
    RepositoryUnavailable { reason: String },

    #[error("score store unavailable: {reason}")]
    StoreUnavailable { reason: String },
}

impl MatchError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            MatchError::SubjectNotFound { .. } | MatchError::OfferNotFound { .. }
        )
    }
}

impl From<RepositoryError> for MatchError {
    fn from(e: RepositoryError) -> Self {
        let reason = match e {
            RepositoryError::Unavailable { reason } => reason,
            other => other.to_string(),
        };
        MatchError::RepositoryUnavailable { reason }
    }
}

impl From<StoreError> for MatchError {
    fn from(e: StoreError) -> Self {
        let StoreError::Unavailable { reason } = e;
        MatchError::StoreUnavailable { reason }
    }
}

/// Convenience result type for engine operations.
pub type MatchResult<T> = Result<T, MatchError>;
