//! Matchlane command-line runner.
//!
//! Loads subjects and offers from a JSON fixture, scores them with the configured LLM
//! providers and prints one ranking as JSON.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use mimalloc::MiMalloc;
use tokio::signal;
use uuid::Uuid;

use matchlane::cache::MemoryScoreStore;
use matchlane::config::Config;
use matchlane::engine::MatchingEngine;
use matchlane::model::{OfferId, SubjectId};
use matchlane::provider::LlmProvider;
use matchlane::repository::InMemoryRepository;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Direction {
    /// Rank offers for a subject
    Subject,
    /// Rank subjects for an offer
    Offer,
}

#[derive(Debug)]
enum Query {
    OffersForSubject(SubjectId),
    SubjectsForOffer(OfferId),
}

#[derive(Parser, Debug)]
#[command(name = "matchlane", about = "Rank subjects and offers by LLM match score")]
struct Args {
    /// JSON fixture with subjects and offers
    fixture: PathBuf,
    /// Which side the id belongs to
    #[arg(value_enum)]
    direction: Direction,
    /// Subject or offer id
    id: Uuid,
    /// Maximum results; defaults to MATCHLANE_MAX_RESULTS
    limit: Option<usize>,
}

impl Args {
    fn query(&self) -> Query {
        match self.direction {
            Direction::Subject => Query::OffersForSubject(SubjectId(self.id)),
            Direction::Offer => Query::SubjectsForOffer(OfferId(self.id)),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!(
        fixture = %args.fixture.display(),
        primary = %config.primary_model,
        fallback = %config.fallback_model,
        freshness_hours = config.freshness_hours,
        "Matchlane starting"
    );

    let repository = Arc::new(
        InMemoryRepository::from_json_file(&args.fixture)
            .with_context(|| format!("failed to load fixture {}", args.fixture.display()))?,
    );
    let store = Arc::new(MemoryScoreStore::with_capacity(config.cache_capacity));

    let client = genai::Client::default();
    let primary = Arc::new(LlmProvider::primary(client.clone(), &config.primary_model));
    let fallback = Arc::new(LlmProvider::fallback(client, &config.fallback_model));

    let limit = args.limit.unwrap_or(config.max_results);
    let engine = MatchingEngine::new(config, primary, fallback, store, repository);

    let query = args.query();
    let output = tokio::select! {
        result = run_query(&engine, &query, limit) => result?,
        _ = signal::ctrl_c() => {
            tracing::info!("Received Ctrl+C, abandoning ranking");
            return Ok(());
        }
    };

    println!("{}", output);
    Ok(())
}

async fn run_query(engine: &MatchingEngine, query: &Query, limit: usize) -> anyhow::Result<String> {
    let json = match query {
        Query::OffersForSubject(id) => {
            let ranked = engine.rank_offers_for_subject(*id, limit).await?;
            tracing::info!(results = ranked.len(), "Ranked offers");
            serde_json::to_string_pretty(&ranked)?
        }
        Query::SubjectsForOffer(id) => {
            let ranked = engine.rank_subjects_for_offer(*id, limit).await?;
            tracing::info!(results = ranked.len(), "Ranked subjects");
            serde_json::to_string_pretty(&ranked)?
        }
    };
    Ok(json)
}
