//! Subject, offer and score-record types shared by every layer.

#[cfg(any(test, feature = "mock"))]
pub mod fixtures;
pub mod offer;
pub mod record;
pub mod subject;

#[cfg(test)]
mod tests;

pub use offer::{Offer, OfferId};
pub use record::{PairKey, ProviderRole, ScoreRecord};
pub use subject::{OwnerId, SkillSnapshot, Subject, SubjectId, completeness};
