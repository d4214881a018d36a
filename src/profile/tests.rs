use std::sync::Arc;

use super::*;
use crate::model::OwnerId;
use crate::model::fixtures::sample_subject;
use crate::repository::{InMemoryRepository, RecordRepository};

fn create_test_service() -> (ProfileService, Arc<InMemoryRepository>) {
    let repository = Arc::new(InMemoryRepository::new());
    (ProfileService::new(repository.clone()), repository)
}

fn create_test_draft() -> ProfileDraft {
    ProfileDraft {
        name: "Ada Lovelace".to_string(),
        university: "State Technical University".to_string(),
        specialty: "Software Engineering".to_string(),
        skills: vec!["teamwork".to_string()],
        technologies: vec!["Rust".to_string(), "rust".to_string(), "SQL".to_string()],
        experience: Some("Built a compiler".to_string()),
        external_profile_url: None,
        career_interests: vec!["backend".to_string()],
    }
}

fn tags(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_save_profile_creates_subject() {
    let (service, repository) = create_test_service();
    let owner = OwnerId::new_v4();

    let subject = service.save_profile(owner, create_test_draft()).await.unwrap();

    assert_eq!(subject.owner_id, owner);
    assert_eq!(subject.technologies, tags(&["Rust", "SQL"]));
    // name, university, specialty, skills, technologies, experience
    assert_eq!(subject.completeness, 85);
    assert_eq!(
        repository.get_subject_by_owner(owner).await.unwrap(),
        Some(subject.clone())
    );

    let snapshots = repository.snapshots_for(subject.id);
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].skills, tags(&["Rust", "SQL", "teamwork"]));
}

#[tokio::test]
async fn test_save_profile_keeps_identity_and_resume() {
    let (service, repository) = create_test_service();
    let existing = sample_subject("Ada");
    let owner = existing.owner_id;
    repository.insert_subject(existing.clone());

    let updated = service.save_profile(owner, create_test_draft()).await.unwrap();

    assert_eq!(updated.id, existing.id);
    assert_eq!(updated.created_at, existing.created_at);
    assert_eq!(updated.resume_url, existing.resume_url);
    assert_eq!(updated.name, "Ada Lovelace");
    assert_eq!(updated.external_profile_url, None);
    assert_eq!(repository.subject_count(), 1);
}

#[tokio::test]
async fn test_save_profile_rejects_invalid_draft() {
    let (service, repository) = create_test_service();

    let mut short_name = create_test_draft();
    short_name.name = " A ".to_string();
    let err = service
        .save_profile(OwnerId::new_v4(), short_name)
        .await
        .unwrap_err();
    assert!(matches!(err, ProfileError::Invalid { field: "name", .. }));

    let mut long_experience = create_test_draft();
    long_experience.experience = Some("x".repeat(5001));
    let err = service
        .save_profile(OwnerId::new_v4(), long_experience)
        .await
        .unwrap_err();
    assert!(matches!(err, ProfileError::Invalid { field: "experience", .. }));

    let mut long_university = create_test_draft();
    long_university.university = "u".repeat(201);
    assert!(long_university.validate().is_err());

    assert_eq!(repository.subject_count(), 0);
}

#[tokio::test]
async fn test_snapshot_failure_does_not_fail_save() {
    let (service, repository) = create_test_service();
    repository.fail_snapshot_writes(true);
    let owner = OwnerId::new_v4();

    let subject = service.save_profile(owner, create_test_draft()).await.unwrap();

    assert!(repository.get_subject(subject.id).await.unwrap().is_some());
    assert!(repository.snapshots_for(subject.id).is_empty());
}

#[tokio::test]
async fn test_ingest_resume_merges_fields() {
    let (service, repository) = create_test_service();
    let owner = OwnerId::new_v4();
    service.save_profile(owner, create_test_draft()).await.unwrap();

    let extract = ResumeExtract {
        skills: tags(&["Teamwork", "leadership"]),
        technologies: tags(&["sql", "Docker"]),
        experience: Some("Three years at a fintech".to_string()),
    };
    let subject = service
        .ingest_resume(owner, extract, "resumes/ada.pdf")
        .await
        .unwrap();

    assert_eq!(subject.skills, tags(&["teamwork", "leadership"]));
    assert_eq!(subject.technologies, tags(&["Rust", "SQL", "Docker"]));
    assert_eq!(subject.experience.as_deref(), Some("Three years at a fintech"));
    assert_eq!(subject.resume_url.as_deref(), Some("resumes/ada.pdf"));
    assert_eq!(subject.completeness, 90);
    assert_eq!(repository.snapshots_for(subject.id).len(), 2);
}

#[tokio::test]
async fn test_ingest_resume_keeps_experience_when_none_extracted() {
    let (service, _repository) = create_test_service();
    let owner = OwnerId::new_v4();
    service.save_profile(owner, create_test_draft()).await.unwrap();

    let subject = service
        .ingest_resume(owner, ResumeExtract::default(), "resumes/ada.pdf")
        .await
        .unwrap();

    assert_eq!(subject.experience.as_deref(), Some("Built a compiler"));
}

#[tokio::test]
async fn test_ingest_resume_requires_profile() {
    let (service, _repository) = create_test_service();
    let owner = OwnerId::new_v4();

    let err = service
        .ingest_resume(owner, ResumeExtract::default(), "resumes/x.pdf")
        .await
        .unwrap_err();
    assert_eq!(err, ProfileError::NotFound { owner });

    let err = service
        .ingest_resume(owner, ResumeExtract::default(), "  ")
        .await
        .unwrap_err();
    assert!(matches!(err, ProfileError::Invalid { .. }));
}

#[tokio::test]
async fn test_link_external_profile() {
    let (service, _repository) = create_test_service();
    let owner = OwnerId::new_v4();
    service.save_profile(owner, create_test_draft()).await.unwrap();

    let subject = service
        .link_external_profile(owner, "https://github.com/ada", &tags(&["Go", "rust"]))
        .await
        .unwrap();

    assert_eq!(
        subject.external_profile_url.as_deref(),
        Some("https://github.com/ada")
    );
    assert_eq!(subject.technologies, tags(&["Rust", "SQL", "Go"]));
    assert_eq!(subject.completeness, 95);
}

#[tokio::test]
async fn test_link_external_profile_errors() {
    let (service, _repository) = create_test_service();
    let owner = OwnerId::new_v4();

    let err = service
        .link_external_profile(owner, "https://github.com/ada", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, ProfileError::NotFound { .. }));

    let err = service.link_external_profile(owner, "", &[]).await.unwrap_err();
    assert!(matches!(err, ProfileError::Invalid { field: "external_profile_url", .. }));
}

#[test]
fn test_merge_tags() {
    assert_eq!(
        merge_tags(&tags(&["Rust", " "]), &tags(&["RUST", " Go ", "go", "SQL"])),
        tags(&["Rust", "Go", "SQL"])
    );
    assert!(merge_tags(&[], &[]).is_empty());
}
