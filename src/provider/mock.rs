//! Scripted scoring provider for tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::{ProviderError, ProviderResult};
use super::parse::parse_score_reply;
use super::types::{ProviderScore, ScoringInput, ScoringProvider};

/// One scripted provider outcome.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Raw completion text, run through the same parser as real providers.
    Raw(String),
    /// A provider failure.
    Error(ProviderError),
}

impl MockReply {
    /// A well-formed JSON verdict.
    pub fn score(percent: i64, matched: &[&str], missing: &[&str], explanation: &str) -> Self {
        Self::Raw(
            serde_json::json!({
                "match_percent": percent,
                "strong_skills": matched,
                "missing_skills": missing,
                "explanation": explanation,
            })
            .to_string(),
        )
    }

    pub fn rate_limited() -> Self {
        Self::Error(ProviderError::RateLimited {
            reason: "429 quota exceeded".to_string(),
        })
    }

    pub fn unavailable() -> Self {
        Self::Error(ProviderError::Unavailable {
            reason: "connection reset".to_string(),
        })
    }

    pub fn invalid() -> Self {
        Self::Error(ProviderError::invalid("truncated JSON"))
    }
}

/// A [`ScoringProvider`] that replays scripted replies and counts calls.
///
/// Reply resolution order: per-offer-title override, then the FIFO queue, then the default.
pub struct MockProvider {
    name: String,
    default_reply: MockReply,
    queue: Mutex<VecDeque<MockReply>>,
    by_offer: Mutex<HashMap<String, MockReply>>,
    delay: Option<Duration>,
    delays_by_offer: Mutex<HashMap<String, Duration>>,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new(name: &str, default_reply: MockReply) -> Self {
        Self {
            name: name.to_string(),
            default_reply,
            queue: Mutex::new(VecDeque::new()),
            by_offer: Mutex::new(HashMap::new()),
            delay: None,
            delays_by_offer: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Always scores `percent`, naming itself in the explanation.
    pub fn scoring(name: &str, percent: i64) -> Self {
        let explanation = format!("{} verdict", name);
        Self::new(
            name,
            MockReply::score(percent, &["Rust"], &["Kubernetes"], &explanation),
        )
    }

    /// Always fails with `error`.
    pub fn failing(name: &str, error: ProviderError) -> Self {
        Self::new(name, MockReply::Error(error))
    }

    /// Sleeps before every reply.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sleeps for `delay` before replying for `offer_title`, instead of the shared delay.
    pub fn with_delay_for(self, offer_title: &str, delay: Duration) -> Self {
        self.delays_by_offer
            .lock()
            .insert(offer_title.to_string(), delay);
        self
    }

    /// Uses `reply` whenever the scored offer has `offer_title`.
    pub fn with_reply_for(self, offer_title: &str, reply: MockReply) -> Self {
        self.by_offer.lock().insert(offer_title.to_string(), reply);
        self
    }

    /// Queues a one-shot reply.
    pub fn push_reply(&self, reply: MockReply) {
        self.queue.lock().push_back(reply);
    }

    /// Number of `score` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Offer titles seen, in call order.
    pub fn seen_offers(&self) -> Vec<String> {
        self.seen.lock().clone()
    }

    fn next_reply(&self, input: &ScoringInput) -> MockReply {
        if let Some(reply) = self.by_offer.lock().get(&input.offer_title) {
            return reply.clone();
        }
        if let Some(reply) = self.queue.lock().pop_front() {
            return reply;
        }
        self.default_reply.clone()
    }
}

impl std::fmt::Debug for MockProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockProvider")
            .field("name", &self.name)
            .field("calls", &self.calls())
            .finish()
    }
}

#[async_trait]
impl ScoringProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn score(&self, input: &ScoringInput) -> ProviderResult<ProviderScore> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().push(input.offer_title.clone());

        let delay = self
            .delays_by_offer
            .lock()
            .get(&input.offer_title)
            .copied()
            .or(self.delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match self.next_reply(input) {
            MockReply::Raw(text) => parse_score_reply(&text),
            MockReply::Error(error) => Err(error),
        }
    }
}
