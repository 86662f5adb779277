//! Application error taxonomy.
//!
//! Every failure surfaced by the core pipeline is exactly one [`AppError`]
//! variant carrying a human-readable message and an optional wrapped cause.
//! The caller decides what is fatal; the core never swallows errors.

use thiserror::Error;

/// Boxed source error attached to a classified failure
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync>;

/// Tagged union over every failure the paraphrase pipeline can surface
#[derive(Debug, Error)]
pub enum AppError {
    /// Credential missing or rejected. The only fatal variant for an
    /// interactive session.
    #[error("API key error: {message}")]
    ApiKey {
        message: String,
        #[source]
        source: Option<BoxedCause>,
    },

    /// Transport-level failure: connection refused, timeout, DNS
    #[error("network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<BoxedCause>,
    },

    /// The API accepted the request but reported an error, or returned an
    /// unusable response
    #[error("API error: {message}")]
    Api {
        message: String,
        #[source]
        source: Option<BoxedCause>,
    },

    /// Input or configuration failed validation before any network call
    #[error("validation error: {message}")]
    Validation { message: String },

    /// HTTP 429 from the upstream API
    #[error("rate limit exceeded: {message}")]
    RateLimit {
        message: String,
        #[source]
        source: Option<BoxedCause>,
    },

    /// Catch-all for failures that match no other variant
    #[error("unexpected error: {message}")]
    Unknown {
        message: String,
        #[source]
        source: Option<BoxedCause>,
    },
}

impl AppError {
    /// Validation failure with no underlying cause
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// API-reported failure with no underlying cause
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
            source: None,
        }
    }

    /// Catch-all failure, optionally wrapping its cause
    pub fn unknown(message: impl Into<String>, source: Option<BoxedCause>) -> Self {
        Self::Unknown {
            message: message.into(),
            source,
        }
    }

    /// True only for credential failures, which should end an interactive
    /// session instead of prompting a retry
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::ApiKey { .. })
    }

    /// Everything except a credential failure may be retried by the caller
    pub const fn is_recoverable(&self) -> bool {
        !self.is_fatal()
    }
}

/// Signatures in transport error messages that indicate a network failure
const NETWORK_SIGNATURES: &[&str] = &[
    "connection refused",
    "connection reset",
    "timed out",
    "timeout",
    "connect",
    "dns",
];

/// Classify a failed completion attempt into an [`AppError`].
///
/// Works from the HTTP status code and the failure message alone, so it is
/// independent of any particular client library. `status` is `None` when the
/// request never produced a response (transport failure). Mapping order:
/// auth rejection, rate limit, other API-reported errors, then network
/// signatures, then the catch-all.
pub fn classify_completion_failure(
    status: Option<u16>,
    message: &str,
    source: Option<BoxedCause>,
) -> AppError {
    match status {
        Some(401 | 403) => AppError::ApiKey {
            message: format!("authentication rejected by the API: {message}"),
            source,
        },
        Some(429) => AppError::RateLimit {
            message: message.to_string(),
            source,
        },
        Some(code) => AppError::Api {
            message: format!("HTTP {code}: {message}"),
            source,
        },
        None => {
            let lower = message.to_lowercase();
            if NETWORK_SIGNATURES.iter().any(|sig| lower.contains(sig)) {
                AppError::Network {
                    message: message.to_string(),
                    source,
                }
            } else {
                AppError::Unknown {
                    message: message.to_string(),
                    source,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_api_key_errors_are_fatal() {
        let err = classify_completion_failure(Some(401), "bad key", None);
        assert!(err.is_fatal());
        assert!(!err.is_recoverable());

        let err = classify_completion_failure(Some(429), "slow down", None);
        assert!(!err.is_fatal());
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_messages_are_preserved() {
        let err = classify_completion_failure(Some(500), "backend unavailable", None);
        assert!(err.to_string().contains("backend unavailable"));
        assert!(err.to_string().contains("500"));
    }
}
