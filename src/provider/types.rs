use async_trait::async_trait;
use serde::Serialize;

use super::error::{ProviderError, ProviderResult};
use crate::constants::MAX_SCORE_PERCENT;
use crate::model::{Offer, Subject};

/// Subject and offer fields a provider sees when scoring a pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringInput {
    pub subject_name: String,
    pub subject_skills: Vec<String>,
    pub subject_technologies: Vec<String>,
    pub subject_experience: Option<String>,
    pub offer_title: String,
    pub offer_company: String,
    pub offer_description: String,
    pub offer_required_skills: Vec<String>,
    pub offer_required_technologies: Vec<String>,
    pub offer_experience_years: u8,
}

impl ScoringInput {
    pub fn from_pair(subject: &Subject, offer: &Offer) -> Self {
        Self {
            subject_name: subject.name.clone(),
            subject_skills: subject.skills.clone(),
            subject_technologies: subject.technologies.clone(),
            subject_experience: subject.experience.clone(),
            offer_title: offer.title.clone(),
            offer_company: offer.company.clone(),
            offer_description: offer.description.clone(),
            offer_required_skills: offer.required_skills.clone(),
            offer_required_technologies: offer.required_technologies.clone(),
            offer_experience_years: offer.experience_years,
        }
    }
}

/// A validated provider verdict for one pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderScore {
    percent: u8,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub rationale: String,
}

impl ProviderScore {
    /// Builds a score, rejecting percentages outside `0..=100`.
    ///
    /// Out-of-range values are refused rather than clamped so a misbehaving provider never
    /// lands a fabricated score in the cache.
    pub fn try_new(
        percent: i64,
        matched: Vec<String>,
        missing: Vec<String>,
        rationale: String,
    ) -> ProviderResult<Self> {
        let percent = u8::try_from(percent)
            .ok()
            .filter(|p| *p <= MAX_SCORE_PERCENT)
            .ok_or_else(|| {
                ProviderError::invalid(format!("match_percent {} outside 0..=100", percent))
            })?;

        Ok(Self {
            percent,
            matched,
            missing,
            rationale,
        })
    }

    #[inline]
    pub fn percent(&self) -> u8 {
        self.percent
    }
}

#[async_trait]
/// A backend able to score a (subject, offer) pair.
pub trait ScoringProvider: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Scores one pair.
    async fn score(&self, input: &ScoringInput) -> ProviderResult<ProviderScore>;
}
