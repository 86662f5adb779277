use async_trait::async_trait;
use resay::error::AppError;
use resay::gateway::CompletionClient;
use resay::paraphrase::{ParaphraseService, is_significantly_different};
use resay::types::{ParaphraseRequest, RawCompletion, TargetLength};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Stub client that returns a canned completion and counts calls
struct StubClient {
    text: String,
    tokens_used: Option<u32>,
    calls: AtomicUsize,
}

impl StubClient {
    fn new(text: &str, tokens_used: Option<u32>) -> Arc<Self> {
        Arc::new(Self {
            text: text.to_string(),
            tokens_used,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl CompletionClient for StubClient {
    async fn complete(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
    ) -> Result<RawCompletion, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(RawCompletion {
            text: self.text.clone(),
            tokens_used: self.tokens_used,
        })
    }
}

/// Stub client that always fails with the given error builder
struct FailingClient<F: Fn() -> AppError + Send + Sync>(F);

#[async_trait]
impl<F: Fn() -> AppError + Send + Sync> CompletionClient for FailingClient<F> {
    async fn complete(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
    ) -> Result<RawCompletion, AppError> {
        Err((self.0)())
    }
}

#[tokio::test]
async fn test_paraphrase_end_to_end_with_stub() {
    let stub = StubClient::new(
        "A premium leather wallet with card slots, a bill pocket, and RFID protection.",
        Some(89),
    );
    let service = ParaphraseService::with_client(stub.clone());

    let request = ParaphraseRequest::new(
        "This premium leather wallet features multiple card slots, a bill compartment, and RFID protection for secure storage.",
    );
    let response = service
        .paraphrase(&request)
        .await
        .expect("paraphrase should succeed");

    assert_eq!(response.original, request.description);
    assert_eq!(
        response.paraphrased,
        "A premium leather wallet with card slots, a bill pocket, and RFID protection."
    );
    assert_eq!(response.tokens_used, Some(89));
    assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_target_length_is_threaded_through() {
    let stub = StubClient::new("Short and sweet wallet copy for shoppers.", None);
    let service = ParaphraseService::with_client(stub);

    let request = ParaphraseRequest::new(
        "This premium leather wallet features multiple card slots and RFID protection.",
    )
    .with_target_length(TargetLength::Short);

    let response = service
        .paraphrase(&request)
        .await
        .expect("paraphrase should succeed");
    assert_eq!(response.tokens_used, None);
}

#[tokio::test]
async fn test_validation_failure_never_calls_the_gateway() {
    let stub = StubClient::new("unused", None);
    let service = ParaphraseService::with_client(stub.clone());

    let err = service
        .paraphrase(&ParaphraseRequest::new("tiny"))
        .await
        .expect_err("short description should fail");

    assert!(matches!(err, AppError::Validation { .. }));
    assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_blank_completion_is_an_api_error() {
    let stub = StubClient::new("   \n  ", Some(12));
    let service = ParaphraseService::with_client(stub);

    let err = service
        .paraphrase(&ParaphraseRequest::new(
            "A warm winter jacket with a detachable hood.",
        ))
        .await
        .expect_err("blank completion should fail");

    assert!(matches!(err, AppError::Api { .. }));
    assert!(err.to_string().contains("no content generated"));
}

#[tokio::test]
async fn test_gateway_errors_propagate_unchanged() {
    let service = ParaphraseService::with_client(Arc::new(FailingClient(|| {
        AppError::RateLimit {
            message: "Resource has been exhausted".to_string(),
            source: None,
        }
    })));

    let err = service
        .paraphrase(&ParaphraseRequest::new(
            "A warm winter jacket with a detachable hood.",
        ))
        .await
        .expect_err("gateway failure should propagate");
    assert!(matches!(err, AppError::RateLimit { .. }));
}

#[tokio::test]
async fn test_paraphrased_text_is_trimmed() {
    let stub = StubClient::new("  A simple wallet that holds cards and cash.  \n", None);
    let service = ParaphraseService::with_client(stub);

    let response = service
        .paraphrase(&ParaphraseRequest::new(
            "This premium leather wallet features multiple card slots.",
        ))
        .await
        .expect("paraphrase should succeed");
    assert_eq!(
        response.paraphrased,
        "A simple wallet that holds cards and cash."
    );
}

#[test]
fn test_identical_texts_are_not_significantly_different() {
    assert!(!is_significantly_different("A red shirt", "A red shirt"));
}

#[test]
fn test_case_insensitively_identical_texts_are_not_significantly_different() {
    assert!(!is_significantly_different("A Red Shirt", "a red shirt"));
}

#[test]
fn test_disjoint_texts_are_significantly_different() {
    assert!(is_significantly_different(
        "A red large cotton shirt",
        "Blue denim pants"
    ));
}

#[test]
fn test_high_overlap_is_not_significantly_different() {
    // 4 of 5 distinct words shared: overlap 0.8, above the 0.7 threshold
    assert!(!is_significantly_different(
        "The quick brown fox jumps",
        "The quick brown fox leaps"
    ));
}
