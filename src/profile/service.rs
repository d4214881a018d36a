use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use super::error::{ProfileError, ProfileResult};
use super::types::{ProfileDraft, ResumeExtract, merge_tags};
use crate::model::{OwnerId, SkillSnapshot, Subject, SubjectId};
use crate::repository::RecordRepository;

/// Owner-driven mutations of subject profiles.
///
/// Every mutation re-derives completeness and saves the subject, then appends a skill
/// snapshot. Snapshot failures are logged and do not fail the mutation.
pub struct ProfileService {
    repository: Arc<dyn RecordRepository>,
}

impl ProfileService {
    pub fn new(repository: Arc<dyn RecordRepository>) -> Self {
        Self { repository }
    }

    /// Creates or replaces the owner's profile. An existing resume reference is kept.
    #[instrument(skip_all, fields(owner = %owner))]
    pub async fn save_profile(&self, owner: OwnerId, draft: ProfileDraft) -> ProfileResult<Subject> {
        draft.validate()?;

        let now = Utc::now();
        let existing = self.repository.get_subject_by_owner(owner).await?;

        let (id, created_at, resume_url) = match existing {
            Some(subject) => (subject.id, subject.created_at, subject.resume_url),
            None => {
                debug!("Creating new subject profile");
                (SubjectId::new_v4(), now, None)
            }
        };

        let mut subject = Subject {
            id,
            owner_id: owner,
            name: draft.name.trim().to_string(),
            university: draft.university.trim().to_string(),
            specialty: draft.specialty.trim().to_string(),
            skills: merge_tags(&[], &draft.skills),
            technologies: merge_tags(&[], &draft.technologies),
            experience: draft.experience.filter(|e| !e.trim().is_empty()),
            external_profile_url: draft
                .external_profile_url
                .filter(|u| !u.trim().is_empty()),
            resume_url,
            career_interests: draft.career_interests,
            completeness: 0,
            created_at,
            updated_at: now,
        };

        self.commit(&mut subject).await?;
        info!(subject_id = %subject.id, completeness = subject.completeness, "Profile saved");
        Ok(subject)
    }

    /// Merges fields extracted from a resume into the owner's profile.
    #[instrument(skip_all, fields(owner = %owner))]
    pub async fn ingest_resume(
        &self,
        owner: OwnerId,
        extract: ResumeExtract,
        resume_url: &str,
    ) -> ProfileResult<Subject> {
        let resume_url = resume_url.trim();
        if resume_url.is_empty() {
            return Err(ProfileError::invalid("resume_url", "must not be empty"));
        }

        let mut subject = self.owned_subject(owner).await?;

        subject.skills = merge_tags(&subject.skills, &extract.skills);
        subject.technologies = merge_tags(&subject.technologies, &extract.technologies);
        if let Some(experience) = extract.experience.filter(|e| !e.trim().is_empty()) {
            subject.experience = Some(experience);
        }
        subject.resume_url = Some(resume_url.to_string());
        subject.updated_at = Utc::now();

        self.commit(&mut subject).await?;
        info!(
            subject_id = %subject.id,
            skills = extract.skills.len(),
            technologies = extract.technologies.len(),
            "Resume ingested"
        );
        Ok(subject)
    }

    /// Records an external profile reference and merges the technologies detected there.
    #[instrument(skip_all, fields(owner = %owner))]
    pub async fn link_external_profile(
        &self,
        owner: OwnerId,
        url: &str,
        detected_technologies: &[String],
    ) -> ProfileResult<Subject> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ProfileError::invalid("external_profile_url", "must not be empty"));
        }

        let mut subject = self.owned_subject(owner).await?;

        subject.external_profile_url = Some(url.to_string());
        subject.technologies = merge_tags(&subject.technologies, detected_technologies);
        subject.updated_at = Utc::now();

        self.commit(&mut subject).await?;
        info!(
            subject_id = %subject.id,
            detected = detected_technologies.len(),
            "External profile linked"
        );
        Ok(subject)
    }

    async fn owned_subject(&self, owner: OwnerId) -> ProfileResult<Subject> {
        self.repository
            .get_subject_by_owner(owner)
            .await?
            .ok_or(ProfileError::NotFound { owner })
    }

    async fn commit(&self, subject: &mut Subject) -> ProfileResult<()> {
        subject.refresh_completeness();
        self.repository.save_subject(subject.clone()).await?;

        let snapshot = SkillSnapshot::capture(subject, subject.updated_at);
        if let Err(e) = self.repository.append_skill_snapshot(snapshot).await {
            warn!(subject_id = %subject.id, error = %e, "Failed to record skill snapshot");
        }
        Ok(())
    }
}

impl std::fmt::Debug for ProfileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileService").finish_non_exhaustive()
    }
}
