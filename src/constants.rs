//! Cross-cutting, shared constants.
//!
//! Engine defaults live here so that [`crate::config::Config`] and the tests agree on them.

/// Default freshness window for cached score records, in hours.
pub const DEFAULT_FRESHNESS_HOURS: u64 = 24;

/// Default number of active offers considered per ranking request.
pub const DEFAULT_OFFER_PAGE_SIZE: usize = 50;

/// Default minimum subject completeness for candidacy.
pub const DEFAULT_MIN_COMPLETENESS: u8 = 30;

/// Default upper bound on the number of ranked entries returned per request.
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Default number of pair computations run concurrently within one request.
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Default capacity of the in-memory score store.
pub const DEFAULT_CACHE_CAPACITY: u64 = 100_000;

/// Upper bound of a compatibility score.
pub const MAX_SCORE_PERCENT: u8 = 100;

/// Upper bound of a subject completeness score.
pub const MAX_COMPLETENESS: u8 = 100;

/// Default model for the primary (higher-quality) provider.
pub const DEFAULT_PRIMARY_MODEL: &str = "gemini-1.5-flash";

/// Default model for the fallback (faster) provider.
pub const DEFAULT_FALLBACK_MODEL: &str = "llama-3.3-70b-versatile";

/// Sampling temperature used for scoring prompts.
pub const DEFAULT_TEMPERATURE: f64 = 0.3;

/// Completion token budget for scoring prompts.
pub const DEFAULT_MAX_TOKENS: u32 = 512;

/// Offer description budget (characters) in prompts sent to the primary provider.
pub const PRIMARY_DESCRIPTION_CHARS: usize = 1000;

/// Offer description budget (characters) in prompts sent to the fallback provider.
pub const FALLBACK_DESCRIPTION_CHARS: usize = 800;

/// Minimum length of required profile text fields.
pub const MIN_PROFILE_FIELD_CHARS: usize = 2;

/// Maximum length of a profile name.
pub const MAX_NAME_CHARS: usize = 100;

/// Maximum length of university and specialty.
pub const MAX_ORGANISATION_CHARS: usize = 200;

/// Maximum length of the free-text experience field.
pub const MAX_EXPERIENCE_CHARS: usize = 5000;
