use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Record repository errors.
pub enum RepositoryError {
    /// Backend unreachable or query failed.
    #[error("repository unavailable: {reason}")]
    Unavailable {
        /// Error message.
        reason: String,
    },

    /// Fixture could not be read or decoded.
    #[error("failed to load fixture '{path}': {reason}")]
    Fixture {
        /// Fixture path (or `<inline>`).
        path: String,
        /// Error message.
        reason: String,
    },
}

/// Convenience result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
