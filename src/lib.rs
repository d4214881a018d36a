//! Matchlane library crate (used by the command-line runner and integration tests).
//!
//! # Public API Surface
//!
//! ## Engine
//! - [`MatchingEngine`] - cache-and-compute scoring and the two ranking directions
//! - [`MatchError`], [`ScoredPair`], [`RankedOffer`], [`RankedSubject`]
//!
//! ## Cache
//! - [`ScoreStore`], [`MemoryScoreStore`] - keyed score records
//! - [`FreshnessPolicy`], [`MatchStatus`] - freshness and provenance of a score
//! - [`InFlight`] - per-key coalescing of concurrent computations
//!
//! ## Providers
//! - [`ScoringProvider`], [`LlmProvider`] - primary and fallback scorers
//! - [`parse_score_reply`], [`render_match_prompt`] - prompt/response codec
//!
//! ## Records
//! - [`Subject`], [`Offer`], [`ScoreRecord`], [`SkillSnapshot`]
//! - [`RecordRepository`], [`InMemoryRepository`]
//! - [`ProfileService`] - profile edits, resume ingestion, external-profile linking
//!
//! ## Test/Mock Support
//! [`MockProvider`] and the record fixtures are available behind
//! `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod config;
pub mod constants;
pub mod engine;
pub mod model;
pub mod profile;
pub mod provider;
pub mod repository;

pub use cache::{
    CacheState, Coalesced, FreshnessPolicy, InFlight, MatchStatus, MemoryScoreStore, ScoreStore,
    StoreError, StoreResult,
};
pub use config::{Config, ConfigError};
pub use engine::{MatchError, MatchResult, MatchingEngine, RankedOffer, RankedSubject, ScoredPair};
pub use model::{
    Offer, OfferId, OwnerId, PairKey, ProviderRole, ScoreRecord, SkillSnapshot, Subject,
    SubjectId, completeness,
};
pub use profile::{ProfileDraft, ProfileError, ProfileResult, ProfileService, ResumeExtract};
#[cfg(any(test, feature = "mock"))]
pub use provider::{MockProvider, MockReply};
pub use provider::{
    LlmProvider, ProviderError, ProviderResult, ProviderScore, ScoringInput, ScoringProvider,
    parse_score_reply, render_match_prompt,
};
pub use repository::{InMemoryRepository, RecordRepository, RepositoryError, RepositoryResult};
