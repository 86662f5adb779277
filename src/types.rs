//! Core data model for the paraphrase pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Relative length of the rewrite compared to the original description
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TargetLength {
    Short,
    /// Same length as the original; also the behavior when no hint is given
    #[default]
    Medium,
    Long,
}

impl TargetLength {
    /// All available target lengths
    pub const ALL: &'static [TargetLength] =
        &[TargetLength::Short, TargetLength::Medium, TargetLength::Long];

    /// Hint name as used on the command line
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }

    /// Get all hint names as strings
    pub fn all_names() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::name).collect()
    }
}

/// A single paraphrase request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParaphraseRequest {
    /// Raw product description supplied by the caller
    pub description: String,
    /// Optional hint steering output length relative to the input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_length: Option<TargetLength>,
}

impl ParaphraseRequest {
    /// Create a request with no length hint
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            target_length: None,
        }
    }

    /// Attach a target-length hint
    #[must_use]
    pub fn with_target_length(mut self, target_length: TargetLength) -> Self {
        self.target_length = Some(target_length);
        self
    }
}

/// Result of a successful paraphrase call. Immutable once constructed.
#[derive(Debug, Clone, Serialize)]
pub struct ParaphraseResponse {
    /// The validated description the model was asked to rewrite
    pub original: String,
    /// The generated rewrite, trimmed
    pub paraphrased: String,
    /// When the rewrite was produced
    pub generated_at: DateTime<Utc>,
    /// Aggregate token usage reported by the API, when available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u32>,
}

/// Raw text and usage returned by the completion gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCompletion {
    pub text: String,
    pub tokens_used: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_length_from_str() {
        assert_eq!("short".parse::<TargetLength>().ok(), Some(TargetLength::Short));
        assert_eq!("MEDIUM".parse::<TargetLength>().ok(), Some(TargetLength::Medium));
        assert_eq!("Long".parse::<TargetLength>().ok(), Some(TargetLength::Long));
        assert!("huge".parse::<TargetLength>().is_err());
    }

    #[test]
    fn test_target_length_defaults_to_medium() {
        assert_eq!(TargetLength::default(), TargetLength::Medium);
    }

    #[test]
    fn test_request_builder() {
        let request = ParaphraseRequest::new("A soft cotton shirt")
            .with_target_length(TargetLength::Short);
        assert_eq!(request.description, "A soft cotton shirt");
        assert_eq!(request.target_length, Some(TargetLength::Short));
    }
}
