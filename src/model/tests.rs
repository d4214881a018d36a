use chrono::Utc;

use super::fixtures::{sample_offer, sample_subject, sparse_subject};
use super::*;

#[test]
fn test_completeness_full_profile() {
    let subject = sample_subject("Alice");
    assert_eq!(completeness(&subject), 100);
    assert_eq!(subject.completeness, 100);
}

#[test]
fn test_completeness_sparse_profile() {
    let subject = sparse_subject("Bob");
    assert_eq!(subject.completeness, 30);
    assert!(subject.meets_completeness(30));
    assert!(!subject.meets_completeness(31));
}

#[test]
fn test_completeness_ignores_blank_strings() {
    let mut subject = sparse_subject("Carol");
    subject.university = "   ".to_string();
    subject.experience = Some(String::new());
    subject.refresh_completeness();

    assert_eq!(subject.completeness, 30);
}

#[test]
fn test_completeness_field_weights() {
    let mut subject = sparse_subject("Dan");
    subject.skills.push("analysis".to_string());
    subject.refresh_completeness();
    assert_eq!(subject.completeness, 45);

    subject.resume_url = Some("resumes/dan.pdf".to_string());
    subject.refresh_completeness();
    assert_eq!(subject.completeness, 50);

    subject.external_profile_url = Some("https://github.com/dan".to_string());
    subject.refresh_completeness();
    assert_eq!(subject.completeness, 60);
}

#[test]
fn test_skill_tags_lists_technologies_first() {
    let subject = sample_subject("Eve");
    assert_eq!(
        subject.skill_tags(),
        vec!["Rust", "PostgreSQL", "teamwork", "communication"]
    );
}

#[test]
fn test_skill_snapshot_capture() {
    let subject = sample_subject("Frank");
    let taken_at = Utc::now();
    let snapshot = SkillSnapshot::capture(&subject, taken_at);

    assert_eq!(snapshot.subject_id, subject.id);
    assert_eq!(snapshot.skills.len(), 4);
    assert_eq!(snapshot.taken_at, taken_at);
}

#[test]
fn test_pair_key_display_and_record_key() {
    let subject = sample_subject("Grace");
    let offer = sample_offer("Backend Intern", 0);
    let key = PairKey::new(subject.id, offer.id);

    assert_eq!(key.to_string(), format!("{}:{}", subject.id, offer.id));

    let record = ScoreRecord {
        subject_id: subject.id,
        offer_id: offer.id,
        percent: 80,
        matched: vec![],
        missing: vec![],
        rationale: String::new(),
        scored_by: ProviderRole::Primary,
        computed_at: Utc::now(),
    };
    assert_eq!(record.key(), key);
}

#[test]
fn test_provider_role_serializes_snake_case() {
    assert_eq!(
        serde_json::to_string(&ProviderRole::Fallback).unwrap(),
        "\"fallback\""
    );
    assert_eq!(ProviderRole::Primary.to_string(), "primary");
}

#[test]
fn test_offer_defaults_when_deserializing() {
    let offer = sample_offer("Data Engineer", 5);
    let mut value = serde_json::to_value(&offer).unwrap();
    let object = value.as_object_mut().unwrap();
    object.remove("is_active");
    object.remove("soft_skills");
    object.remove("experience_years");

    let parsed: Offer = serde_json::from_value(value).unwrap();
    assert!(parsed.is_active);
    assert!(parsed.soft_skills.is_empty());
    assert_eq!(parsed.experience_years, 0);
}

#[test]
fn test_ids_serialize_transparently() {
    let subject = sample_subject("Heidi");
    let json = serde_json::to_string(&subject.id).unwrap();
    assert_eq!(json, format!("\"{}\"", subject.id.0));
}
