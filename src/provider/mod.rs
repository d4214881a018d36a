//! Scoring providers.
//!
//! Two interchangeable [`ScoringProvider`]s sit behind the engine: a primary (higher
//! quality) and a fallback (faster, cheaper). Each returns a tagged
//! [`ProviderResult`]; the engine branches on the error class to decide whether the
//! fallback is worth trying.
//!
//! Reply parsing is strict: a percentage outside `0..=100`, a fractional percentage or a
//! missing percentage is [`ProviderError::InvalidResponse`], never a clamped or defaulted
//! score.

pub mod error;
pub mod llm;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod parse;
pub mod prompt;
pub mod types;


pub use error::{ProviderError, ProviderResult};
pub use llm::{LlmProvider, classify_transport_error};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockProvider, MockReply};
pub use parse::{parse_score_reply, strip_code_fences};
pub use prompt::{SYSTEM_PROMPT, render_match_prompt, truncate_chars};
pub use types::{ProviderScore, ScoringInput, ScoringProvider};
