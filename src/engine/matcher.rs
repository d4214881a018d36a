use std::sync::Arc;

use chrono::Utc;
use futures_util::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, error, info, instrument, warn};

use super::error::{MatchError, MatchResult};
use super::ranking::rank_by_percent;
use super::types::{RankedOffer, RankedSubject, ScoredPair};
use crate::cache::{CacheState, FreshnessPolicy, InFlight, MatchStatus, ScoreStore, StoreError};
use crate::config::Config;
use crate::model::{Offer, OfferId, PairKey, ProviderRole, ScoreRecord, Subject, SubjectId};
use crate::provider::{ProviderError, ProviderScore, ScoringInput, ScoringProvider};
use crate::repository::RecordRepository;

/// Everything needed to resolve one pair, cheap to clone into a detached future.
#[derive(Clone)]
struct PairResolver {
    primary: Arc<dyn ScoringProvider>,
    fallback: Arc<dyn ScoringProvider>,
    store: Arc<dyn ScoreStore>,
    freshness: FreshnessPolicy,
}

impl PairResolver {
    async fn resolve(self, subject: Subject, offer: Offer) -> MatchResult<ScoredPair> {
        let key = PairKey::new(subject.id, offer.id);
        let existing = self.store.lookup(&key).await?;

        match self.freshness.classify(existing.as_ref(), Utc::now()) {
            CacheState::Fresh => {
                if let Some(record) = existing {
                    debug!(pair = %key, percent = record.percent, "Score cache hit");
                    return Ok(ScoredPair {
                        record,
                        status: MatchStatus::Cached,
                    });
                }
            }
            CacheState::Stale => debug!(pair = %key, "Cached score is stale"),
            CacheState::Absent => debug!(pair = %key, "Score cache miss"),
        }

        let input = ScoringInput::from_pair(&subject, &offer);
        let (score, role) = self.score_with_fallback(&key, &input).await?;

        let record = ScoreRecord {
            subject_id: subject.id,
            offer_id: offer.id,
            percent: score.percent(),
            matched: score.matched,
            missing: score.missing,
            rationale: score.rationale,
            scored_by: role,
            computed_at: Utc::now(),
        };

        self.persist(record.clone()).await?;

        info!(pair = %key, percent = record.percent, scored_by = %role, "Computed match score");
        Ok(ScoredPair {
            record,
            status: MatchStatus::Computed(role),
        })
    }

    async fn score_with_fallback(
        &self,
        key: &PairKey,
        input: &ScoringInput,
    ) -> MatchResult<(ProviderScore, ProviderRole)> {
        let primary_err = match self.primary.score(input).await {
            Ok(score) => return Ok((score, ProviderRole::Primary)),
            Err(e) => e,
        };

        if let ProviderError::InvalidResponse { reason } = &primary_err {
            error!(
                pair = %key,
                provider = self.primary.name(),
                reason = %reason,
                "Primary provider returned malformed output"
            );
            return Err(MatchError::ScoringMalformed {
                reason: reason.clone(),
            });
        }

        warn!(
            pair = %key,
            provider = self.primary.name(),
            fallback = self.fallback.name(),
            error = %primary_err,
            "Primary provider failed, using fallback"
        );

        match self.fallback.score(input).await {
            Ok(score) => Ok((score, ProviderRole::Fallback)),
            Err(fallback_err) => {
                if matches!(fallback_err, ProviderError::InvalidResponse { .. }) {
                    error!(
                        pair = %key,
                        provider = self.fallback.name(),
                        error = %fallback_err,
                        "Fallback provider returned malformed output"
                    );
                } else {
                    warn!(pair = %key, error = %fallback_err, "Fallback provider failed");
                }
                Err(MatchError::ScoringUnavailable {
                    reason: format!("primary: {}; fallback: {}", primary_err, fallback_err),
                })
            }
        }
    }

    /// Writes on a spawned task so the upsert finishes even if the caller is dropped.
    async fn persist(&self, record: ScoreRecord) -> MatchResult<()> {
        let store = Arc::clone(&self.store);
        tokio::spawn(async move { store.upsert(record).await })
            .await
            .map_err(|e| StoreError::Unavailable {
                reason: format!("upsert task failed: {}", e),
            })??;
        Ok(())
    }
}

/// Cache-and-compute engine for subject/offer compatibility scores.
///
/// Collaborators are injected; the engine holds no global state. With in-flight
/// deduplication enabled, concurrent requests for the same pair share one computation.
pub struct MatchingEngine {
    config: Config,
    resolver: PairResolver,
    repository: Arc<dyn RecordRepository>,
    in_flight: InFlight<PairKey, MatchResult<ScoredPair>>,
}

impl MatchingEngine {
    pub fn new(
        config: Config,
        primary: Arc<dyn ScoringProvider>,
        fallback: Arc<dyn ScoringProvider>,
        store: Arc<dyn ScoreStore>,
        repository: Arc<dyn RecordRepository>,
    ) -> Self {
        let freshness = FreshnessPolicy::new(config.freshness_window());
        Self {
            resolver: PairResolver {
                primary,
                fallback,
                store,
                freshness,
            },
            config,
            repository,
            in_flight: InFlight::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of pairs with a computation currently pending.
    pub fn in_flight_len(&self) -> usize {
        self.in_flight.len()
    }

    /// Returns the score for a pair, from cache when fresh, otherwise freshly computed.
    #[instrument(skip_all, fields(subject_id = %subject.id, offer_id = %offer.id))]
    pub async fn compute_or_fetch(&self, subject: &Subject, offer: &Offer) -> MatchResult<ScoredPair> {
        let resolver = self.resolver.clone();
        let subject = subject.clone();
        let offer = offer.clone();

        if !self.config.dedupe_in_flight {
            return resolver.resolve(subject, offer).await;
        }

        let key = PairKey::new(subject.id, offer.id);
        let outcome = self
            .in_flight
            .run(key, move || resolver.resolve(subject, offer))
            .await;

        if outcome.joined {
            debug!(pair = %key, "Joined pending computation");
        }
        outcome.value
    }

    /// Ranks active offers for a subject, best match first.
    #[instrument(skip_all, fields(subject_id = %subject_id, limit = limit))]
    pub async fn rank_offers_for_subject(
        &self,
        subject_id: SubjectId,
        limit: usize,
    ) -> MatchResult<Vec<RankedOffer>> {
        let subject = self
            .repository
            .get_subject(subject_id)
            .await?
            .ok_or(MatchError::SubjectNotFound { id: subject_id })?;

        let limit = self.config.clamp_limit(limit);
        if limit == 0 {
            return Ok(Vec::new());
        }

        let offers = self
            .repository
            .list_active_offers(self.config.offer_page_size)
            .await?;
        debug!(offers = offers.len(), "Scoring active offers");

        let subject = &subject;
        let ranked: Vec<RankedOffer> = stream::iter(offers)
            .map(|offer| async move {
                let scored = self.compute_or_fetch(subject, &offer).await?;
                Ok::<_, MatchError>(RankedOffer {
                    offer,
                    record: scored.record,
                    status: scored.status,
                })
            })
            .buffered(self.config.max_concurrency.max(1))
            .try_collect()
            .await?;

        Ok(rank_by_percent(ranked, |r| r.record.percent, limit))
    }

    /// Ranks sufficiently complete subjects for an offer, best match first.
    #[instrument(skip_all, fields(offer_id = %offer_id, limit = limit))]
    pub async fn rank_subjects_for_offer(
        &self,
        offer_id: OfferId,
        limit: usize,
    ) -> MatchResult<Vec<RankedSubject>> {
        let offer = self
            .repository
            .get_offer(offer_id)
            .await?
            .ok_or(MatchError::OfferNotFound { id: offer_id })?;

        let limit = self.config.clamp_limit(limit);
        if limit == 0 {
            return Ok(Vec::new());
        }

        let minimum = self.config.min_completeness;
        let subjects: Vec<Subject> = self
            .repository
            .list_subjects_by_min_completeness(minimum, self.config.offer_page_size)
            .await?
            .into_iter()
            .filter(|s| s.meets_completeness(minimum))
            .collect();
        debug!(subjects = subjects.len(), "Scoring candidate subjects");

        let offer = &offer;
        let ranked: Vec<RankedSubject> = stream::iter(subjects)
            .map(|subject| async move {
                let scored = self.compute_or_fetch(&subject, offer).await?;
                Ok::<_, MatchError>(RankedSubject {
                    subject,
                    record: scored.record,
                    status: scored.status,
                })
            })
            .buffered(self.config.max_concurrency.max(1))
            .try_collect()
            .await?;

        Ok(rank_by_percent(ranked, |r| r.record.percent, limit))
    }
}

impl std::fmt::Debug for MatchingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchingEngine")
            .field("primary", &self.resolver.primary.name())
            .field("fallback", &self.resolver.fallback.name())
            .field("freshness", &self.resolver.freshness)
            .field("in_flight", &self.in_flight)
            .finish()
    }
}
