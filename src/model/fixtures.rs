//! Sample records for tests and local runs.

use chrono::{TimeDelta, Utc};

use super::offer::{Offer, OfferId};
use super::subject::{OwnerId, Subject, SubjectId};

/// A fully filled-in subject (completeness 100).
pub fn sample_subject(name: &str) -> Subject {
    let now = Utc::now();
    let mut subject = Subject {
        id: SubjectId::new_v4(),
        owner_id: OwnerId::new_v4(),
        name: name.to_string(),
        university: "State Technical University".to_string(),
        specialty: "Software Engineering".to_string(),
        skills: vec!["teamwork".to_string(), "communication".to_string()],
        technologies: vec!["Rust".to_string(), "PostgreSQL".to_string()],
        experience: Some("Two internships building backend services".to_string()),
        external_profile_url: Some(format!("https://github.com/{}", name.to_lowercase())),
        resume_url: Some(format!("resumes/{}.pdf", name.to_lowercase())),
        career_interests: vec!["backend".to_string()],
        completeness: 0,
        created_at: now,
        updated_at: now,
    };
    subject.refresh_completeness();
    subject
}

/// A subject with only a name and a specialty (completeness 30).
pub fn sparse_subject(name: &str) -> Subject {
    let now = Utc::now();
    let mut subject = Subject {
        id: SubjectId::new_v4(),
        owner_id: OwnerId::new_v4(),
        name: name.to_string(),
        university: String::new(),
        specialty: "Mathematics".to_string(),
        skills: Vec::new(),
        technologies: Vec::new(),
        experience: None,
        external_profile_url: None,
        resume_url: None,
        career_interests: Vec::new(),
        completeness: 0,
        created_at: now,
        updated_at: now,
    };
    subject.refresh_completeness();
    subject
}

/// An active offer created `age_minutes` ago.
pub fn sample_offer(title: &str, age_minutes: i64) -> Offer {
    Offer {
        id: OfferId::new_v4(),
        owner_id: OwnerId::new_v4(),
        title: title.to_string(),
        company: "Acme Systems".to_string(),
        description: format!("{} working on distributed storage and APIs.", title),
        required_skills: vec!["teamwork".to_string()],
        required_technologies: vec!["Rust".to_string(), "Kubernetes".to_string()],
        soft_skills: vec!["ownership".to_string()],
        experience_years: 1,
        is_active: true,
        created_at: Utc::now() - TimeDelta::minutes(age_minutes),
    }
}
