//! In-memory [`RecordRepository`] used by tests and the command-line runner.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Deserialize;
use tracing::debug;

use super::error::{RepositoryError, RepositoryResult};
use super::source::RecordRepository;
use crate::model::{Offer, OfferId, OwnerId, SkillSnapshot, Subject, SubjectId};

/// On-disk fixture layout.
#[derive(Debug, Default, Deserialize)]
pub struct RepositoryFixture {
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub offers: Vec<Offer>,
}

#[derive(Default)]
struct Records {
    subjects: HashMap<SubjectId, Subject>,
    offers: HashMap<OfferId, Offer>,
    snapshots: Vec<SkillSnapshot>,
    fail_snapshots: bool,
}

/// Repository holding every record in process memory.
#[derive(Default)]
pub struct InMemoryRepository {
    records: RwLock<Records>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a repository from a JSON fixture (`{"subjects": [..], "offers": [..]}`).
    pub fn from_json_str(json: &str) -> RepositoryResult<Self> {
        Self::decode(json, "<inline>")
    }

    /// Loads a JSON fixture file.
    pub fn from_json_file(path: impl AsRef<Path>) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let json = std::fs::read_to_string(path).map_err(|e| RepositoryError::Fixture {
            path: display.clone(),
            reason: e.to_string(),
        })?;
        Self::decode(&json, &display)
    }

    fn decode(json: &str, origin: &str) -> RepositoryResult<Self> {
        let fixture: RepositoryFixture =
            serde_json::from_str(json).map_err(|e| RepositoryError::Fixture {
                path: origin.to_string(),
                reason: e.to_string(),
            })?;

        debug!(
            origin,
            subjects = fixture.subjects.len(),
            offers = fixture.offers.len(),
            "Loaded repository fixture"
        );

        let repository = Self::new();
        for subject in fixture.subjects {
            repository.insert_subject(subject);
        }
        for offer in fixture.offers {
            repository.insert_offer(offer);
        }
        Ok(repository)
    }

    pub fn insert_subject(&self, subject: Subject) {
        self.records.write().subjects.insert(subject.id, subject);
    }

    pub fn insert_offer(&self, offer: Offer) {
        self.records.write().offers.insert(offer.id, offer);
    }

    pub fn subject_count(&self) -> usize {
        self.records.read().subjects.len()
    }

    pub fn offer_count(&self) -> usize {
        self.records.read().offers.len()
    }

    /// Skill snapshots recorded for `subject_id`, oldest first.
    pub fn snapshots_for(&self, subject_id: SubjectId) -> Vec<SkillSnapshot> {
        self.records
            .read()
            .snapshots
            .iter()
            .filter(|s| s.subject_id == subject_id)
            .cloned()
            .collect()
    }

    /// Makes every subsequent snapshot append fail.
    pub fn fail_snapshot_writes(&self, fail: bool) {
        self.records.write().fail_snapshots = fail;
    }
}

impl std::fmt::Debug for InMemoryRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let records = self.records.read();
        f.debug_struct("InMemoryRepository")
            .field("subjects", &records.subjects.len())
            .field("offers", &records.offers.len())
            .field("snapshots", &records.snapshots.len())
            .finish()
    }
}

#[async_trait]
impl RecordRepository for InMemoryRepository {
    async fn get_subject(&self, id: SubjectId) -> RepositoryResult<Option<Subject>> {
        Ok(self.records.read().subjects.get(&id).cloned())
    }

    async fn get_subject_by_owner(&self, owner: OwnerId) -> RepositoryResult<Option<Subject>> {
        Ok(self
            .records
            .read()
            .subjects
            .values()
            .find(|s| s.owner_id == owner)
            .cloned())
    }

    async fn get_offer(&self, id: OfferId) -> RepositoryResult<Option<Offer>> {
        Ok(self.records.read().offers.get(&id).cloned())
    }

    async fn list_active_offers(&self, limit: usize) -> RepositoryResult<Vec<Offer>> {
        let mut offers: Vec<Offer> = self
            .records
            .read()
            .offers
            .values()
            .filter(|o| o.is_active)
            .cloned()
            .collect();

        // HashMap iteration order is arbitrary; the id breaks creation-time ties.
        offers.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        offers.truncate(limit);
        Ok(offers)
    }

    async fn list_subjects_by_min_completeness(
        &self,
        minimum: u8,
        limit: usize,
    ) -> RepositoryResult<Vec<Subject>> {
        let mut subjects: Vec<Subject> = self
            .records
            .read()
            .subjects
            .values()
            .filter(|s| s.meets_completeness(minimum))
            .cloned()
            .collect();

        subjects.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        subjects.truncate(limit);
        Ok(subjects)
    }

    async fn save_subject(&self, subject: Subject) -> RepositoryResult<()> {
        self.insert_subject(subject);
        Ok(())
    }

    async fn append_skill_snapshot(&self, snapshot: SkillSnapshot) -> RepositoryResult<()> {
        let mut records = self.records.write();
        if records.fail_snapshots {
            return Err(RepositoryError::Unavailable {
                reason: "skill snapshot log rejected the write".to_string(),
            });
        }
        records.snapshots.push(snapshot);
        Ok(())
    }
}
