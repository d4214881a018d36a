//! Score cache: store contract, freshness policy and in-flight coalescing.

pub mod error;
pub mod freshness;
pub mod inflight;
pub mod memory;
pub mod store;
pub mod types;


pub use error::{StoreError, StoreResult};
pub use freshness::FreshnessPolicy;
pub use inflight::{Coalesced, InFlight};
pub use memory::MemoryScoreStore;
pub use store::ScoreStore;
pub use types::{CacheState, MatchStatus};
