use serde::{Deserialize, Serialize};

use super::error::{ProfileError, ProfileResult};
use crate::constants::{
    MAX_EXPERIENCE_CHARS, MAX_NAME_CHARS, MAX_ORGANISATION_CHARS, MIN_PROFILE_FIELD_CHARS,
};

/// Owner-editable subject fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub name: String,
    pub university: String,
    pub specialty: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub external_profile_url: Option<String>,
    #[serde(default)]
    pub career_interests: Vec<String>,
}

impl ProfileDraft {
    /// Checks field lengths.
    pub fn validate(&self) -> ProfileResult<()> {
        check_length("name", &self.name, MAX_NAME_CHARS)?;
        check_length("university", &self.university, MAX_ORGANISATION_CHARS)?;
        check_length("specialty", &self.specialty, MAX_ORGANISATION_CHARS)?;

        if let Some(experience) = &self.experience {
            let len = experience.chars().count();
            if len > MAX_EXPERIENCE_CHARS {
                return Err(ProfileError::invalid(
                    "experience",
                    format!("{} characters exceeds {}", len, MAX_EXPERIENCE_CHARS),
                ));
            }
        }

        Ok(())
    }
}

fn check_length(field: &'static str, value: &str, max: usize) -> ProfileResult<()> {
    let len = value.trim().chars().count();
    if len < MIN_PROFILE_FIELD_CHARS {
        return Err(ProfileError::invalid(
            field,
            format!("must be at least {} characters", MIN_PROFILE_FIELD_CHARS),
        ));
    }
    if len > max {
        return Err(ProfileError::invalid(
            field,
            format!("{} characters exceeds {}", len, max),
        ));
    }
    Ok(())
}

/// Structured fields extracted from a resume document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeExtract {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub experience: Option<String>,
}

/// Appends `incoming` to `existing`, skipping case-insensitive duplicates and blanks.
pub fn merge_tags(existing: &[String], incoming: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(existing.len() + incoming.len());
    let mut seen = std::collections::HashSet::new();

    for tag in existing.iter().chain(incoming) {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_lowercase()) {
            merged.push(trimmed.to_string());
        }
    }

    merged
}
