//! Engine harness wired with mock providers and in-memory collaborators.

use std::io::Write;
use std::sync::Arc;

use matchlane::cache::MemoryScoreStore;
use matchlane::config::Config;
use matchlane::engine::MatchingEngine;
use matchlane::model::{Offer, Subject};
use matchlane::provider::MockProvider;
use matchlane::repository::InMemoryRepository;
use tempfile::NamedTempFile;

pub struct TestEngine {
    pub engine: MatchingEngine,
    pub primary: Arc<MockProvider>,
    pub fallback: Arc<MockProvider>,
    pub store: Arc<MemoryScoreStore>,
    pub repository: Arc<InMemoryRepository>,
}

impl TestEngine {
    pub fn new(primary: MockProvider, fallback: MockProvider) -> Self {
        Self::with_repository(primary, fallback, InMemoryRepository::new(), Config::default())
    }

    pub fn with_repository(
        primary: MockProvider,
        fallback: MockProvider,
        repository: InMemoryRepository,
        config: Config,
    ) -> Self {
        let primary = Arc::new(primary);
        let fallback = Arc::new(fallback);
        let store = Arc::new(MemoryScoreStore::with_capacity(config.cache_capacity));
        let repository = Arc::new(repository);

        let engine = MatchingEngine::new(
            config,
            primary.clone(),
            fallback.clone(),
            store.clone(),
            repository.clone(),
        );

        Self {
            engine,
            primary,
            fallback,
            store,
            repository,
        }
    }
}

/// Writes subjects and offers to a temporary JSON fixture.
pub fn write_fixture(subjects: &[Subject], offers: &[Offer]) -> NamedTempFile {
    let json = serde_json::json!({ "subjects": subjects, "offers": offers });
    let mut file = NamedTempFile::new().expect("temp file should be created");
    file.write_all(json.to_string().as_bytes())
        .expect("fixture should be written");
    file
}
