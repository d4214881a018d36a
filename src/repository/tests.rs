use std::io::Write;

use chrono::Utc;

use super::*;
use crate::model::SkillSnapshot;
use crate::model::fixtures::{sample_offer, sample_subject, sparse_subject};

#[tokio::test]
async fn test_get_subject_and_offer() {
    let repository = InMemoryRepository::new();
    let subject = sample_subject("Ada");
    let offer = sample_offer("Backend Engineer", 10);
    repository.insert_subject(subject.clone());
    repository.insert_offer(offer.clone());

    assert_eq!(repository.get_subject(subject.id).await.unwrap(), Some(subject.clone()));
    assert_eq!(repository.get_offer(offer.id).await.unwrap(), Some(offer));
    assert_eq!(
        repository.get_subject_by_owner(subject.owner_id).await.unwrap(),
        Some(subject)
    );
    assert_eq!(repository.get_subject(crate::model::SubjectId::new_v4()).await.unwrap(), None);
}

#[tokio::test]
async fn test_active_offers_in_creation_order_and_bounded() {
    let repository = InMemoryRepository::new();
    let newest = sample_offer("Newest", 1);
    let oldest = sample_offer("Oldest", 30);
    let middle = sample_offer("Middle", 10);
    let mut inactive = sample_offer("Closed", 20);
    inactive.is_active = false;

    for offer in [newest, oldest, middle, inactive] {
        repository.insert_offer(offer);
    }

    let titles: Vec<String> = repository
        .list_active_offers(50)
        .await
        .unwrap()
        .into_iter()
        .map(|o| o.title)
        .collect();
    assert_eq!(titles, vec!["Oldest", "Middle", "Newest"]);

    assert_eq!(repository.list_active_offers(2).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_subjects_filtered_by_completeness() {
    let repository = InMemoryRepository::new();
    let full = sample_subject("Ada");
    let sparse = sparse_subject("Bob");
    let mut empty = sparse_subject("Cy");
    empty.specialty.clear();
    empty.refresh_completeness();

    repository.insert_subject(full.clone());
    repository.insert_subject(sparse.clone());
    repository.insert_subject(empty);

    let at_30 = repository.list_subjects_by_min_completeness(30, 50).await.unwrap();
    assert_eq!(at_30.len(), 2);

    let at_31 = repository.list_subjects_by_min_completeness(31, 50).await.unwrap();
    assert_eq!(at_31, vec![full]);
}

#[tokio::test]
async fn test_save_subject_replaces() {
    let repository = InMemoryRepository::new();
    let mut subject = sample_subject("Ada");
    repository.save_subject(subject.clone()).await.unwrap();

    subject.name = "Ada L.".to_string();
    repository.save_subject(subject.clone()).await.unwrap();

    assert_eq!(repository.subject_count(), 1);
    assert_eq!(repository.get_subject(subject.id).await.unwrap().unwrap().name, "Ada L.");
}

#[tokio::test]
async fn test_snapshot_append_and_failure() {
    let repository = InMemoryRepository::new();
    let subject = sample_subject("Ada");

    repository
        .append_skill_snapshot(SkillSnapshot::capture(&subject, Utc::now()))
        .await
        .unwrap();
    assert_eq!(repository.snapshots_for(subject.id).len(), 1);

    repository.fail_snapshot_writes(true);
    let err = repository
        .append_skill_snapshot(SkillSnapshot::capture(&subject, Utc::now()))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Unavailable { .. }));
    assert_eq!(repository.snapshots_for(subject.id).len(), 1);
}

#[test]
fn test_fixture_from_file() {
    let subject = sample_subject("Ada");
    let offer = sample_offer("Backend Engineer", 10);
    let json = serde_json::json!({ "subjects": [subject], "offers": [offer] }).to_string();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let repository = InMemoryRepository::from_json_file(file.path()).unwrap();
    assert_eq!(repository.subject_count(), 1);
    assert_eq!(repository.offer_count(), 1);
}

#[test]
fn test_fixture_missing_sections_default_to_empty() {
    let repository = InMemoryRepository::from_json_str("{}").unwrap();
    assert_eq!(repository.subject_count(), 0);
    assert_eq!(repository.offer_count(), 0);
}

#[test]
fn test_fixture_errors() {
    let err = InMemoryRepository::from_json_str("not json").unwrap_err();
    assert!(matches!(err, RepositoryError::Fixture { ref path, .. } if path == "<inline>"));

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json");
    let err = InMemoryRepository::from_json_file(&missing).unwrap_err();
    assert!(err.to_string().contains("absent.json"));
}
