//! Gateway over the Gemini text-generation API.
//!
//! [`GeminiClient`] issues a single chat-style `generateContent` request with
//! a system instruction and one user message, requesting exactly one
//! candidate. Transport and API failures are classified into the [`AppError`]
//! taxonomy; transient network failures are retried a small fixed number of
//! times inside the client itself.

use crate::config::Config;
use crate::error::{AppError, classify_completion_failure};
use crate::types::RawCompletion;
use crate::{log_debug, trace_debug};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tokio_retry::RetryIf;
use tokio_retry::strategy::ExponentialBackoff;

/// Bound on a single request, including connect time
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// Retries after the initial attempt: 3 attempts total
const TRANSPORT_RETRIES: usize = 2;

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// An interface for sending a system instruction and a user prompt to a
/// text-generation API and receiving the raw completion.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details. Consumers (e.g. [`crate::paraphrase::ParaphraseService`]) remain
/// decoupled from any particular provider or HTTP client library.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send a `system` context message followed by a `user` prompt and return
    /// the first candidate's text and the reported token usage
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<RawCompletion, AppError>;
}

/// Gemini implementation of [`CompletionClient`]
pub struct GeminiClient {
    config: Config,
    client: Client,
}

impl GeminiClient {
    /// Create a client with a bounded request timeout. The underlying
    /// `reqwest::Client` is reusable and safe for concurrent use.
    pub fn new(config: Config) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::unknown("failed to build HTTP client", Some(Box::new(e))))?;
        Ok(Self { config, client })
    }

    async fn request_once(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<RawCompletion, AppError> {
        let mut generation_config = json!({ "candidateCount": 1 });
        if let Some(max_tokens) = self.config.max_tokens {
            generation_config["maxOutputTokens"] = json!(max_tokens);
        }
        if let Some(temperature) = self.config.temperature {
            generation_config["temperature"] = json!(temperature);
        }

        let request_body = json!({
            "systemInstruction": {
                "parts": [
                    {"text": system_prompt}
                ]
            },
            "contents": [
                {
                    "role": "user",
                    "parts": [
                        {"text": user_prompt}
                    ]
                }
            ],
            "generationConfig": generation_config,
        });

        let api_url = format!("{API_BASE_URL}/{}:generateContent", self.config.model);

        let response = self
            .client
            .post(&api_url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                let message = e.to_string();
                classify_completion_failure(None, &message, Some(Box::new(e)))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = upstream_error_message(&body).unwrap_or(body);
            return Err(classify_completion_failure(Some(status.as_u16()), &message, None));
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            let message = format!("malformed API response: {e}");
            AppError::Api {
                message,
                source: Some(Box::new(e)),
            }
        })?;

        extract_completion(body)
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<RawCompletion, AppError> {
        log_debug!("Requesting completion from model: {}", self.config.model);

        let retry_strategy = ExponentialBackoff::from_millis(250)
            .factor(2)
            .take(TRANSPORT_RETRIES);

        let result = RetryIf::spawn(
            retry_strategy,
            || self.request_once(system_prompt, user_prompt),
            is_transient,
        )
        .await;

        match &result {
            Ok(completion) => {
                trace_debug!(
                    target: "resay::gateway",
                    "completion received: {} chars, tokens={:?}",
                    completion.text.len(),
                    completion.tokens_used
                );
            }
            Err(e) => log_debug!("Completion failed: {}", e),
        }

        result
    }
}

/// Only transport-level failures are worth another attempt
fn is_transient(err: &AppError) -> bool {
    matches!(err, AppError::Network { .. })
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "totalTokenCount")]
    total_token_count: Option<u32>,
}

/// Pull the first candidate's text out of a successful response.
///
/// A 2xx response with no usable text still fails, with an API error rather
/// than an empty string.
fn extract_completion(response: GenerateContentResponse) -> Result<RawCompletion, AppError> {
    let tokens_used = response
        .usage_metadata
        .and_then(|usage| usage.total_token_count);

    let text = response
        .candidates
        .into_iter()
        .find_map(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AppError::api("no content generated"));
    }

    Ok(RawCompletion { text, tokens_used })
}

/// Extract the upstream message from a Gemini error body, when present
fn upstream_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value["error"]["message"].as_str().map(String::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_completion_from_full_response() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{
                "candidates": [
                    {"content": {"parts": [{"text": "A simple wallet."}], "role": "model"}}
                ],
                "usageMetadata": {"promptTokenCount": 41, "candidatesTokenCount": 48, "totalTokenCount": 89}
            }"#,
        )
        .expect("response should deserialize");

        let completion = extract_completion(response).expect("extraction should succeed");
        assert_eq!(completion.text, "A simple wallet.");
        assert_eq!(completion.tokens_used, Some(89));
    }

    #[test]
    fn test_extract_completion_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "A simple"}, {"text": " wallet."}]}}]}"#,
        )
        .expect("response should deserialize");

        let completion = extract_completion(response).expect("extraction should succeed");
        assert_eq!(completion.text, "A simple wallet.");
        assert_eq!(completion.tokens_used, None);
    }

    #[test]
    fn test_empty_candidate_list_is_api_error() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": []}"#).expect("response should deserialize");

        let err = extract_completion(response).expect_err("extraction should fail");
        assert!(matches!(err, AppError::Api { .. }));
        assert!(err.to_string().contains("no content generated"));
    }

    #[test]
    fn test_blank_text_is_api_error() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "  \n"}]}}]}"#,
        )
        .expect("response should deserialize");

        assert!(extract_completion(response).is_err());
    }

    #[test]
    fn test_upstream_error_message_parsing() {
        let body = r#"{"error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(
            upstream_error_message(body).as_deref(),
            Some("Resource has been exhausted")
        );
        assert_eq!(upstream_error_message("not json"), None);
    }
}
