use serde::{Serialize, Serializer};

use crate::model::ProviderRole;

/// Where a returned score came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchStatus {
    /// Served from a fresh cached record; no provider was called.
    Cached,
    /// Freshly computed by the given provider and written to the store.
    Computed(ProviderRole),
}

impl MatchStatus {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Cached => "CACHED",
            MatchStatus::Computed(ProviderRole::Primary) => "COMPUTED_PRIMARY",
            MatchStatus::Computed(ProviderRole::Fallback) => "COMPUTED_FALLBACK",
        }
    }

    #[inline]
    pub fn is_cached(&self) -> bool {
        matches!(self, MatchStatus::Cached)
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for MatchStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Freshness of a stored record relative to the configured window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Absent,
    Fresh,
    Stale,
}

impl CacheState {
    #[inline]
    pub fn needs_compute(&self) -> bool {
        !matches!(self, CacheState::Fresh)
    }
}
