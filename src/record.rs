//! Annotation records.
//!
//! An [AnnotationResult] is created once per processed line and never modified.
//! The serialized shape is flat:
//!
//! ```json
//! {
//!   "line_number": 2,
//!   "original_text": "padam semma mass",
//!   "model_response": "Positive",
//!   "finish_reason": "stop",
//!   "model": "deepseek-chat",
//!   "usage": { "prompt_tokens": 25, "completion_tokens": 1, "total_tokens": 26 },
//!   "timestamp": "2025-03-02T10:21:43.123456+01:00"
//! }
//! ```
//!
//! Failed lines carry an `error` field in place of the completion fields.
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Token counters reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// Successful model output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    pub model_response: String,
    pub finish_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl Completion {
    pub fn new(model_response: String) -> Self {
        Self {
            model_response,
            finish_reason: None,
            model: None,
            usage: None,
        }
    }
}

/// Result of a single call to the annotation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Outcome {
    Success(Completion),
    Failure { error: String },
}

impl Outcome {
    pub fn failure(error: impl Into<String>) -> Self {
        Outcome::Failure {
            error: error.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationResult {
    line_number: usize,
    original_text: String,
    #[serde(flatten)]
    outcome: Outcome,
    timestamp: DateTime<Local>,
}

impl AnnotationResult {
    /// Create a record for `original_text` at absolute line `line_number`, timestamped now.
    pub fn new(line_number: usize, original_text: String, outcome: Outcome) -> Self {
        Self {
            line_number,
            original_text,
            outcome,
            timestamp: Local::now(),
        }
    }

    /// Get the record's absolute line number (1-based).
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Get a reference to the record's original text.
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    /// Get a reference to the record's outcome.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn timestamp(&self) -> &DateTime<Local> {
        &self.timestamp
    }

    pub fn is_failure(&self) -> bool {
        self.outcome.is_failure()
    }
}
