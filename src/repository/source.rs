use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::model::{Offer, OfferId, OwnerId, SkillSnapshot, Subject, SubjectId};

#[async_trait]
/// Keyed access to subject and offer records.
///
/// Implementations wrap an external record store; the engine only reads through this
/// trait, the profile service also writes subjects and snapshots.
pub trait RecordRepository: Send + Sync {
    /// Fetches a subject by identity.
    async fn get_subject(&self, id: SubjectId) -> RepositoryResult<Option<Subject>>;

    /// Fetches the subject owned by `owner`.
    async fn get_subject_by_owner(&self, owner: OwnerId) -> RepositoryResult<Option<Subject>>;

    /// Fetches an offer by identity.
    async fn get_offer(&self, id: OfferId) -> RepositoryResult<Option<Offer>>;

    /// Active offers in creation order, at most `limit`.
    async fn list_active_offers(&self, limit: usize) -> RepositoryResult<Vec<Offer>>;

    /// Subjects with `completeness >= minimum` in creation order, at most `limit`.
    async fn list_subjects_by_min_completeness(
        &self,
        minimum: u8,
        limit: usize,
    ) -> RepositoryResult<Vec<Subject>>;

    /// Inserts or replaces a subject.
    async fn save_subject(&self, subject: Subject) -> RepositoryResult<()>;

    /// Appends to the skill snapshot log.
    async fn append_skill_snapshot(&self, snapshot: SkillSnapshot) -> RepositoryResult<()>;
}
