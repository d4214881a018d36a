use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::MAX_COMPLETENESS;

/// Identity of a [`Subject`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(pub Uuid);

impl SubjectId {
    /// Generates a random identity.
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identity of the actor that owns a subject or an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(pub Uuid);

impl OwnerId {
    /// Generates a random identity.
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The candidate side of a scored pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub owner_id: OwnerId,
    pub name: String,
    #[serde(default)]
    pub university: String,
    #[serde(default)]
    pub specialty: String,
    /// Declared soft skills.
    #[serde(default)]
    pub skills: Vec<String>,
    /// Declared technologies and tools.
    #[serde(default)]
    pub technologies: Vec<String>,
    /// Free-text experience narrative.
    #[serde(default)]
    pub experience: Option<String>,
    /// Linked source-repository profile.
    #[serde(default)]
    pub external_profile_url: Option<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub career_interests: Vec<String>,
    /// Derived from the fields above; see [`completeness`].
    #[serde(default)]
    pub completeness: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subject {
    /// Recomputes [`Subject::completeness`] from the current field values.
    pub fn refresh_completeness(&mut self) {
        self.completeness = completeness(self);
    }

    /// Returns `true` if the subject meets a minimum completeness.
    pub fn meets_completeness(&self, minimum: u8) -> bool {
        self.completeness >= minimum
    }

    /// Technologies followed by skills, as recorded in skill snapshots.
    pub fn skill_tags(&self) -> Vec<String> {
        self.technologies
            .iter()
            .chain(self.skills.iter())
            .cloned()
            .collect()
    }
}

fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}

fn is_filled_opt(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(is_filled)
}

/// Computes the 0-100 completeness score of a subject profile.
///
/// | Field                 | Points |
/// |-----------------------|--------|
/// | name                  | 15     |
/// | university            | 15     |
/// | specialty             | 15     |
/// | skills (non-empty)    | 15     |
/// | technologies          | 15     |
/// | experience            | 10     |
/// | external profile      | 10     |
/// | resume                | 5      |
pub fn completeness(subject: &Subject) -> u8 {
    let checks = [
        (is_filled(&subject.name), 15u8),
        (is_filled(&subject.university), 15),
        (is_filled(&subject.specialty), 15),
        (!subject.skills.is_empty(), 15),
        (!subject.technologies.is_empty(), 15),
        (is_filled_opt(&subject.experience), 10),
        (is_filled_opt(&subject.external_profile_url), 10),
        (is_filled_opt(&subject.resume_url), 5),
    ];

    let score: u8 = checks
        .iter()
        .filter(|(filled, _)| *filled)
        .map(|(_, points)| *points)
        .sum();

    score.min(MAX_COMPLETENESS)
}

/// Append-only record of a subject's skill tags at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillSnapshot {
    pub subject_id: SubjectId,
    pub skills: Vec<String>,
    pub taken_at: DateTime<Utc>,
}

impl SkillSnapshot {
    /// Captures the current skill tags of `subject`.
    pub fn capture(subject: &Subject, taken_at: DateTime<Utc>) -> Self {
        Self {
            subject_id: subject.id,
            skills: subject.skill_tags(),
            taken_at,
        }
    }
}
