use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Failure classes of a scoring provider.
pub enum ProviderError {
    /// The provider replied with content that does not satisfy the scoring contract.
    #[error("invalid provider response: {reason}")]
    InvalidResponse {
        /// Error message.
        reason: String,
    },

    /// Quota exhausted or backoff requested.
    #[error("provider rate limited: {reason}")]
    RateLimited {
        /// Error message.
        reason: String,
    },

    /// Transport or service failure.
    #[error("provider unavailable: {reason}")]
    Unavailable {
        /// Error message.
        reason: String,
    },
}

impl ProviderError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            reason: reason.into(),
        }
    }

    /// Returns `true` for failures another provider may not share (quota, outage).
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ProviderError::RateLimited { .. } | ProviderError::Unavailable { .. }
        )
    }
}

/// Convenience result type for provider calls.
pub type ProviderResult<T> = Result<T, ProviderError>;
