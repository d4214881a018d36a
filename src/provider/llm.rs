//! LLM-backed scoring provider built on [`genai`].
//!
//! One adapter type serves both roles; the role only changes the prompt's description
//! budget and the log label. `genai` resolves the backend (Gemini, Groq, OpenAI, ...) from
//! the model name, with credentials taken from the usual per-vendor environment variables.

use async_trait::async_trait;
use genai::Client;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest};
use tracing::{debug, instrument};

use super::error::{ProviderError, ProviderResult};
use super::parse::parse_score_reply;
use super::prompt::{SYSTEM_PROMPT, render_match_prompt, truncate_chars};
use super::types::{ProviderScore, ScoringInput, ScoringProvider};
use crate::constants::{
    DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, FALLBACK_DESCRIPTION_CHARS,
    PRIMARY_DESCRIPTION_CHARS,
};
use crate::model::ProviderRole;

const ERROR_DETAIL_CHARS: usize = 200;

/// Scoring provider that prompts a chat model and parses its JSON verdict.
pub struct LlmProvider {
    client: Client,
    model: String,
    role: ProviderRole,
    description_budget: usize,
    options: ChatOptions,
}

impl LlmProvider {
    pub fn new(client: Client, role: ProviderRole, model: impl Into<String>) -> Self {
        let description_budget = match role {
            ProviderRole::Primary => PRIMARY_DESCRIPTION_CHARS,
            ProviderRole::Fallback => FALLBACK_DESCRIPTION_CHARS,
        };

        Self {
            client,
            model: model.into(),
            role,
            description_budget,
            options: ChatOptions::default()
                .with_temperature(DEFAULT_TEMPERATURE)
                .with_max_tokens(DEFAULT_MAX_TOKENS),
        }
    }

    pub fn primary(client: Client, model: impl Into<String>) -> Self {
        Self::new(client, ProviderRole::Primary, model)
    }

    pub fn fallback(client: Client, model: impl Into<String>) -> Self {
        Self::new(client, ProviderRole::Fallback, model)
    }

    /// Overrides the generation options.
    pub fn with_options(mut self, options: ChatOptions) -> Self {
        self.options = options;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn role(&self) -> ProviderRole {
        self.role
    }

    pub fn description_budget(&self) -> usize {
        self.description_budget
    }

    /// Builds the chat request sent for `input`.
    pub fn build_request(&self, input: &ScoringInput) -> ChatRequest {
        let prompt = render_match_prompt(input, self.description_budget);
        ChatRequest::new(vec![
            ChatMessage::system(SYSTEM_PROMPT.to_string()),
            ChatMessage::user(prompt),
        ])
    }
}

impl std::fmt::Debug for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmProvider")
            .field("model", &self.model)
            .field("role", &self.role)
            .field("description_budget", &self.description_budget)
            .finish()
    }
}

#[async_trait]
impl ScoringProvider for LlmProvider {
    fn name(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, input), fields(model = %self.model, role = %self.role))]
    async fn score(&self, input: &ScoringInput) -> ProviderResult<ProviderScore> {
        let request = self.build_request(input);

        let response = self
            .client
            .exec_chat(&self.model, request, Some(&self.options))
            .await
            .map_err(|e| classify_transport_error(&e.to_string()))?;

        let text = response
            .first_text()
            .ok_or_else(|| ProviderError::invalid("completion contained no text"))?;

        debug!(reply_len = text.len(), "Provider replied");
        parse_score_reply(text)
    }
}

/// Maps a transport-level failure message to a provider failure class.
///
/// Quota and throttling signals (HTTP 429, "quota", "rate limit") become
/// [`ProviderError::RateLimited`]; everything else is [`ProviderError::Unavailable`].
pub fn classify_transport_error(message: &str) -> ProviderError {
    let lowered = message.to_lowercase();
    let reason = truncate_chars(message, ERROR_DETAIL_CHARS).to_string();

    let throttled = lowered.contains("429")
        || lowered.contains("quota")
        || lowered.contains("rate limit")
        || lowered.contains("rate_limit")
        || lowered.contains("too many requests")
        || lowered.contains("resource_exhausted");

    if throttled {
        ProviderError::RateLimited { reason }
    } else {
        ProviderError::Unavailable { reason }
    }
}
