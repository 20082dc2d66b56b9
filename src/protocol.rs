//! Wire types for the scoring endpoint
//!
//! The success body is `GuessOutcome` itself (see `core`); these are the
//! request and error shapes around it.

use serde::{Deserialize, Serialize};

/// Body of a scoring request: `{ "word": "cloud" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub word: String,
}

/// Body of a rejected request: `{ "error": "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
