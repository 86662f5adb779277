//! Paraphrase orchestration: validate, build prompts, call the gateway, and
//! package the result. A single linear pipeline per call; stateless across
//! calls except for the shared read-only configuration and client handle.

use crate::config::Config;
use crate::error::AppError;
use crate::gateway::{CompletionClient, GeminiClient};
use crate::log_debug;
use crate::prompt::{create_system_prompt, create_user_prompt};
use crate::types::{ParaphraseRequest, ParaphraseResponse};
use crate::validator::validate_description;

use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;

// Word overlap at or above this ratio means the rewrite stayed too close
const OVERLAP_THRESHOLD: f64 = 0.7;

/// Service for rewriting product descriptions with AI assistance
pub struct ParaphraseService {
    client: Arc<dyn CompletionClient>,
}

impl ParaphraseService {
    /// Create a service backed by a [`GeminiClient`] built from the given
    /// configuration
    pub fn new(config: Config) -> Result<Self, AppError> {
        Ok(Self {
            client: Arc::new(GeminiClient::new(config)?),
        })
    }

    /// Create a service with an injected completion client (mainly for
    /// testing with stub clients)
    pub fn with_client(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Run the full pipeline: validate, build prompts, call the gateway, and
    /// package a [`ParaphraseResponse`].
    ///
    /// Any stage failure aborts the call and propagates its [`AppError`]
    /// unchanged; there is no partial-failure recovery.
    pub async fn paraphrase(
        &self,
        request: &ParaphraseRequest,
    ) -> Result<ParaphraseResponse, AppError> {
        let description = validate_description(&request.description)?;
        log_debug!(
            "Paraphrasing {} characters with length hint {:?}",
            description.chars().count(),
            request.target_length
        );

        let system_prompt = create_system_prompt(request.target_length);
        let user_prompt = create_user_prompt(&description);

        let completion = self.client.complete(&system_prompt, &user_prompt).await?;
        let paraphrased = completion.text.trim().to_string();
        if paraphrased.is_empty() {
            return Err(AppError::api("no content generated"));
        }

        Ok(ParaphraseResponse {
            original: description,
            paraphrased,
            generated_at: Utc::now(),
            tokens_used: completion.tokens_used,
        })
    }
}

/// Advisory check that the rewrite actually moved away from the original
/// wording. Never alters control flow; callers may use it to warn.
///
/// Case-insensitively identical texts are never significantly different.
/// Otherwise the distinct words shared by both texts are counted and divided
/// by the larger of the two distinct word counts; the rewrite is
/// significantly different when that overlap falls below 0.7.
pub fn is_significantly_different(original: &str, paraphrased: &str) -> bool {
    let original_lower = original.trim().to_lowercase();
    let paraphrased_lower = paraphrased.trim().to_lowercase();
    if original_lower == paraphrased_lower {
        return false;
    }

    let original_words: HashSet<&str> = original_lower.split_whitespace().collect();
    let paraphrased_words: HashSet<&str> = paraphrased_lower.split_whitespace().collect();
    if original_words.is_empty() || paraphrased_words.is_empty() {
        return true;
    }

    let shared = paraphrased_words
        .iter()
        .filter(|word| original_words.contains(*word))
        .count();
    let larger = original_words.len().max(paraphrased_words.len());

    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    let overlap = shared as f64 / larger as f64;

    overlap < OVERLAP_THRESHOLD
}
