//! Game orchestration
//!
//! `Game` owns one `GameSession`, the backend that scores guesses and the
//! optional history mirror. Session state only changes after the backend has
//! answered; a failed or malformed answer leaves it untouched.

pub mod backend;
pub mod session;

pub use backend::{
    Backends, DEFAULT_TARGET, LocalScorer, RemoteScorer, ScoringBackend, ScoringError, ScoringMode,
};
pub use session::{GameSession, GameState, GuessSubmission, MAX_ATTEMPTS, SessionError};

use crate::core::{GuessOutcome, Word};
use crate::history::{HistoryRecord, HistoryStore};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a submission produced no outcome
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error("A guess is already being scored")]
    SubmissionPending,
    #[error("The game was reset while this guess was being scored")]
    Superseded,
}

/// A validated guess waiting for its backend
#[derive(Debug)]
#[must_use = "a pending guess blocks further submissions until completed"]
pub struct PendingGuess {
    guess: Word,
    generation: u64,
}

impl PendingGuess {
    #[must_use]
    pub const fn guess(&self) -> &Word {
        &self.guess
    }
}

/// A game session bound to a scoring backend and a history mirror
pub struct Game {
    session: GameSession,
    backend: Arc<dyn ScoringBackend>,
    history: Option<Arc<dyn HistoryStore>>,
    pending: bool,
    generation: u64,
}

impl Game {
    #[must_use]
    pub fn new(
        backend: Arc<dyn ScoringBackend>,
        history: Option<Arc<dyn HistoryStore>>,
    ) -> Self {
        Self {
            session: GameSession::new(),
            backend,
            history,
            pending: false,
            generation: 0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn session(&self) -> &GameSession {
        &self.session
    }

    #[must_use]
    pub fn mode(&self) -> ScoringMode {
        self.backend.mode()
    }

    /// Shared handle to the active backend, for scoring off the UI task
    #[must_use]
    pub fn backend(&self) -> Arc<dyn ScoringBackend> {
        Arc::clone(&self.backend)
    }

    #[inline]
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// The target, if the active backend knows it
    #[must_use]
    pub fn target(&self) -> Option<&Word> {
        self.backend.target()
    }

    /// Validate `raw` and reserve the submission slot
    ///
    /// # Errors
    /// `SubmissionPending` while another guess is outstanding, otherwise the
    /// session's validation error.
    pub fn begin_submission(&mut self, raw: &str) -> Result<PendingGuess, GameError> {
        if self.pending {
            return Err(GameError::SubmissionPending);
        }

        let guess = self.session.validate(raw)?;
        self.pending = true;

        Ok(PendingGuess {
            guess,
            generation: self.generation,
        })
    }

    /// Apply the backend's answer for a pending guess
    ///
    /// On success the outcome is recorded and mirrored to history. On failure
    /// the session is unchanged and the guess may be submitted again.
    ///
    /// # Errors
    /// `Superseded` if the game was reset since `begin_submission`, otherwise
    /// the backend's error.
    pub async fn complete_submission(
        &mut self,
        pending: PendingGuess,
        scored: Result<GuessOutcome, ScoringError>,
    ) -> Result<GuessSubmission, GameError> {
        if pending.generation != self.generation {
            debug!(guess = %pending.guess, "dropping outcome from a previous game");
            return Err(GameError::Superseded);
        }
        self.pending = false;

        let outcome = scored?;
        let submission = self.session.record(pending.guess, outcome);
        info!(
            guess = %submission.guess,
            attempt = submission.attempt,
            state = ?submission.state,
            "guess recorded"
        );

        self.mirror(&submission).await;
        Ok(submission)
    }

    /// Validate, score and record a guess in one step
    ///
    /// # Errors
    /// See `begin_submission` and `complete_submission`.
    pub async fn submit_guess(&mut self, raw: &str) -> Result<GuessSubmission, GameError> {
        let pending = self.begin_submission(raw)?;
        let scored = self.backend.score(pending.guess()).await;
        self.complete_submission(pending, scored).await
    }

    /// Start a fresh game on the same backend and clear the history mirror
    pub async fn reset(&mut self) {
        self.session.reset();
        self.pending = false;
        self.generation += 1;

        if let Some(store) = &self.history
            && let Err(error) = store.clear().await
        {
            warn!(%error, "failed to clear guess history");
        }
    }

    /// Swap the scoring backend; always starts a fresh game
    pub async fn switch_mode(&mut self, backend: Arc<dyn ScoringBackend>) {
        info!(from = %self.backend.mode(), to = %backend.mode(), "switching scoring mode");
        self.backend = backend;
        self.reset().await;
    }

    /// Saved records, newest first; empty when the store is missing or fails
    pub async fn saved_history(&self, limit: usize) -> Vec<HistoryRecord> {
        let Some(store) = &self.history else {
            return Vec::new();
        };

        store.recent(limit).await.unwrap_or_else(|error| {
            warn!(%error, "failed to load guess history");
            Vec::new()
        })
    }

    async fn mirror(&self, submission: &GuessSubmission) {
        if let Some(store) = &self.history
            && let Err(error) = store
                .append(&submission.guess, submission.outcome.results())
                .await
        {
            warn!(%error, guess = %submission.guess, "failed to save guess to history");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LetterResult, WORD_LENGTH, score};
    use crate::history::MemoryHistory;
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;

    /// Backend that always fails, standing in for an unreachable server
    struct DownBackend;

    #[async_trait]
    impl ScoringBackend for DownBackend {
        async fn score(&self, _guess: &Word) -> Result<GuessOutcome, ScoringError> {
            Err(ScoringError::RemoteUnavailable("connection refused".into()))
        }

        fn mode(&self) -> ScoringMode {
            ScoringMode::Remote
        }
    }

    /// History store that rejects every call
    struct BrokenHistory;

    #[async_trait]
    impl HistoryStore for BrokenHistory {
        async fn append(
            &self,
            _guess: &Word,
            _result: &[LetterResult; WORD_LENGTH],
        ) -> Result<HistoryRecord> {
            Err(anyhow!("disk full"))
        }

        async fn recent(&self, _limit: usize) -> Result<Vec<HistoryRecord>> {
            Err(anyhow!("disk full"))
        }

        async fn clear(&self) -> Result<()> {
            Err(anyhow!("disk full"))
        }
    }

    fn local() -> Arc<dyn ScoringBackend> {
        Arc::new(LocalScorer::new(Word::new("cloud").unwrap()))
    }

    #[tokio::test]
    async fn accepted_guess_is_recorded_and_mirrored() {
        let history = Arc::new(MemoryHistory::new());
        let mut game = Game::new(local(), Some(history.clone()));

        let submission = game.submit_guess("could").await.unwrap();
        assert_eq!(submission.attempt, 1);
        assert_eq!(submission.state, GameState::Active);
        assert_eq!(game.session().attempt_count(), 1);

        let saved = history.recent(10).await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].guess, "COULD");
        assert_eq!(&saved[0].result, submission.outcome.results());
    }

    #[tokio::test]
    async fn backend_failure_leaves_session_untouched() {
        let history = Arc::new(MemoryHistory::new());
        let mut game = Game::new(Arc::new(DownBackend), Some(history.clone()));

        let err = game.submit_guess("cloud").await.unwrap_err();
        assert!(matches!(
            err,
            GameError::Scoring(ScoringError::RemoteUnavailable(_))
        ));
        assert_eq!(game.session().attempt_count(), 0);
        assert!(game.session().history().is_empty());
        assert!(!game.is_pending());
        assert!(history.recent(10).await.unwrap().is_empty());

        // The same guess can be resubmitted
        assert!(game.begin_submission("cloud").is_ok());
    }

    #[tokio::test]
    async fn invalid_guess_is_rejected_without_reserving() {
        let mut game = Game::new(local(), None);
        let err = game.submit_guess("clo").await.unwrap_err();
        assert_eq!(err, GameError::Session(SessionError::InvalidLength(3)));
        assert!(!game.is_pending());
    }

    #[tokio::test]
    async fn overlapping_submission_is_refused() {
        let mut game = Game::new(local(), None);
        let first = game.begin_submission("could").unwrap();

        assert_eq!(
            game.begin_submission("cloud").unwrap_err(),
            GameError::SubmissionPending
        );

        let target = Word::new("cloud").unwrap();
        let scored = Ok(score(first.guess(), &target));
        game.complete_submission(first, scored).await.unwrap();
        assert!(game.begin_submission("cloud").is_ok());
    }

    #[tokio::test]
    async fn outcome_after_reset_is_dropped() {
        let mut game = Game::new(local(), None);
        let pending = game.begin_submission("could").unwrap();
        game.reset().await;

        let target = Word::new("cloud").unwrap();
        let scored = Ok(score(pending.guess(), &target));
        assert_eq!(
            game.complete_submission(pending, scored).await.unwrap_err(),
            GameError::Superseded
        );
        assert_eq!(game.session().attempt_count(), 0);
        assert!(!game.is_pending());
    }

    #[tokio::test]
    async fn switching_mode_resets_session_and_history() {
        let history = Arc::new(MemoryHistory::new());
        let mut game = Game::new(local(), Some(history.clone()));
        game.submit_guess("could").await.unwrap();

        game.switch_mode(Arc::new(DownBackend)).await;

        assert_eq!(game.mode(), ScoringMode::Remote);
        assert_eq!(game.session().attempt_count(), 0);
        assert_eq!(game.session().state(), GameState::Active);
        assert!(history.recent(10).await.unwrap().is_empty());
        assert!(game.target().is_none());
    }

    #[tokio::test]
    async fn broken_history_never_blocks_play() {
        let mut game = Game::new(local(), Some(Arc::new(BrokenHistory)));

        let submission = game.submit_guess("cloud").await.unwrap();
        assert_eq!(submission.state, GameState::Won);
        assert!(game.saved_history(6).await.is_empty());

        game.reset().await;
        assert_eq!(game.session().state(), GameState::Active);
    }

    #[tokio::test]
    async fn game_over_after_six_misses() {
        let mut game = Game::new(local(), None);
        for _ in 0..MAX_ATTEMPTS {
            game.submit_guess("aaaaa").await.unwrap();
        }
        assert_eq!(game.session().state(), GameState::Lost);
        assert_eq!(
            game.submit_guess("cloud").await.unwrap_err(),
            GameError::Session(SessionError::GameOver)
        );
        assert_eq!(game.session().history().len(), MAX_ATTEMPTS);
        assert_eq!(game.target().map(Word::text), Some("CLOUD"));
    }
}
