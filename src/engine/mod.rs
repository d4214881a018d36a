//! Matching engine.
//!
//! For each (subject, offer) pair the engine consults the score store, serves fresh
//! records as-is and otherwise scores the pair with the primary provider, substituting the
//! fallback on quota or availability failures. Fresh results are written back before they
//! are returned. Rankings fan out over pairs with bounded concurrency, then sort by score
//! (stable, so ties keep repository order) and truncate.
//!
//! A failing pair aborts the whole ranking.

pub mod error;
pub mod matcher;
pub mod ranking;
pub mod types;


pub use error::{MatchError, MatchResult};
pub use matcher::MatchingEngine;
pub use ranking::rank_by_percent;
pub use types::{RankedOffer, RankedSubject, ScoredPair};
