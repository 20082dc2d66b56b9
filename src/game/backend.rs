//! Scoring backends
//!
//! A backend turns a validated guess into a `GuessOutcome`. The local backend
//! runs the scorer against a target it holds; the remote backend asks the
//! scoring endpoint, which holds the target itself.

use crate::core::{GuessOutcome, Word, score};
use crate::protocol::{ErrorResponse, ScoreRequest};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Default target for local play
pub const DEFAULT_TARGET: &str = "CLOUD";

const REMOTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Where guesses are scored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringMode {
    Local,
    Remote,
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("Local"),
            Self::Remote => f.write_str("Remote"),
        }
    }
}

/// Failure to obtain an outcome; the guess was not consumed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("Scoring server unavailable: {0}")]
    RemoteUnavailable(String),
}

/// Something that can score a guess
#[async_trait]
pub trait ScoringBackend: Send + Sync {
    /// Score a validated guess
    ///
    /// # Errors
    /// Returns `ScoringError` when no trustworthy outcome could be obtained.
    async fn score(&self, guess: &Word) -> Result<GuessOutcome, ScoringError>;

    fn mode(&self) -> ScoringMode;

    /// The target, when this backend is allowed to know it
    fn target(&self) -> Option<&Word> {
        None
    }
}

/// The backends a front end can switch between
#[derive(Clone)]
pub struct Backends {
    pub local: Arc<dyn ScoringBackend>,
    pub remote: Option<Arc<dyn ScoringBackend>>,
}

impl Backends {
    /// The backend for the mode opposite `current`, if one is configured
    #[must_use]
    pub fn opposite(&self, current: ScoringMode) -> Option<Arc<dyn ScoringBackend>> {
        match current {
            ScoringMode::Local => self.remote.clone(),
            ScoringMode::Remote => Some(Arc::clone(&self.local)),
        }
    }
}

/// Scores against a target held in memory
#[derive(Debug, Clone)]
pub struct LocalScorer {
    target: Word,
}

impl LocalScorer {
    #[must_use]
    pub const fn new(target: Word) -> Self {
        Self { target }
    }
}

#[async_trait]
impl ScoringBackend for LocalScorer {
    async fn score(&self, guess: &Word) -> Result<GuessOutcome, ScoringError> {
        Ok(score(guess, &self.target))
    }

    fn mode(&self) -> ScoringMode {
        ScoringMode::Local
    }

    fn target(&self) -> Option<&Word> {
        Some(&self.target)
    }
}

/// Scores by calling the scoring endpoint over HTTP
#[derive(Debug, Clone)]
pub struct RemoteScorer {
    client: reqwest::Client,
    endpoint: String,
}

impl RemoteScorer {
    /// Create a scorer that posts to `endpoint`
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(REMOTE_TIMEOUT).build()?;
        Ok(Self::with_client(client, endpoint))
    }

    /// Use a preconfigured client, e.g. one with custom proxy settings
    #[must_use]
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn unavailable(err: impl fmt::Display) -> ScoringError {
    ScoringError::RemoteUnavailable(err.to_string())
}

#[async_trait]
impl ScoringBackend for RemoteScorer {
    async fn score(&self, guess: &Word) -> Result<GuessOutcome, ScoringError> {
        debug!(endpoint = %self.endpoint, guess = %guess, "requesting remote score");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ScoreRequest {
                word: guess.text().to_string(),
            })
            .send()
            .await
            .map_err(unavailable)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorResponse>()
                .await
                .map_or_else(|_| status.to_string(), |body| body.error);
            warn!(%status, %detail, "scoring endpoint rejected guess");
            return Err(ScoringError::RemoteUnavailable(detail));
        }

        let outcome: GuessOutcome = response
            .json()
            .await
            .map_err(|e| unavailable(format!("malformed response: {e}")))?;

        if !outcome.is_consistent_with(guess) {
            warn!(guess = %guess, "scoring endpoint returned an inconsistent outcome");
            return Err(unavailable("malformed response: outcome does not match guess"));
        }

        Ok(outcome)
    }

    fn mode(&self) -> ScoringMode {
        ScoringMode::Remote
    }
}
