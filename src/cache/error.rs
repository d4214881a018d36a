use thiserror::Error;

#[derive(Debug, Clone, Error)]
/// Errors returned by a [`ScoreStore`](super::ScoreStore).
pub enum StoreError {
    /// The backing store could not be reached or rejected the operation.
    #[error("score store unavailable: {reason}")]
    Unavailable {
        /// Error message.
        reason: String,
    },
}

/// Convenience result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
