use thiserror::Error;

use crate::model::OwnerId;
use crate::repository::RepositoryError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Profile service errors.
pub enum ProfileError {
    /// A draft field failed validation; nothing was written.
    #[error("invalid {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },

    #[error("no subject profile for owner {owner}")]
    NotFound { owner: OwnerId },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ProfileError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

pub type ProfileResult<T> = Result<T, ProfileError>;
