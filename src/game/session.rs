//! Game session state machine
//!
//! A session counts attempts, records outcomes and decides when the game is
//! over. It never scores anything itself except on the synchronous local path
//! (`submit_guess`); outcomes from any backend are applied with `record`.

use crate::core::{GuessOutcome, LetterStatus, Word, WordError, score};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Attempts allowed per game
pub const MAX_ATTEMPTS: usize = 6;

/// Lifecycle of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Active,
    Won,
    Lost,
}

impl GameState {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Reasons a guess is rejected before it is scored
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("The game is over. Start a new game to play again")]
    GameOver,
    #[error("Enter a 5-letter word (got {0} letters)")]
    InvalidLength(usize),
    #[error("Words may only contain the letters A-Z")]
    InvalidCharacters,
    #[error("All 6 attempts have been used")]
    AttemptsExhausted,
}

impl From<WordError> for SessionError {
    fn from(err: WordError) -> Self {
        match err {
            WordError::InvalidLength(len) => Self::InvalidLength(len),
            WordError::InvalidCharacters => Self::InvalidCharacters,
        }
    }
}

/// An accepted guess: its outcome and where the session ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessSubmission {
    pub guess: Word,
    pub outcome: GuessOutcome,
    pub state: GameState,
    pub attempt: usize,
}

/// One game from first guess to win, loss or reset
#[derive(Debug, Clone)]
pub struct GameSession {
    attempt_count: usize,
    state: GameState,
    history: Vec<(Word, GuessOutcome)>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            attempt_count: 0,
            state: GameState::Active,
            history: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn attempt_count(&self) -> usize {
        self.attempt_count
    }

    #[inline]
    #[must_use]
    pub const fn attempts_remaining(&self) -> usize {
        MAX_ATTEMPTS.saturating_sub(self.attempt_count)
    }

    #[inline]
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn history(&self) -> &[(Word, GuessOutcome)] {
        &self.history
    }

    /// Check whether `raw` may be submitted now
    ///
    /// Checks run in order: terminal state, word shape, attempt budget.
    ///
    /// # Errors
    /// - `GameOver` if the session already ended
    /// - `InvalidLength` / `InvalidCharacters` if `raw` is not a 5-letter word
    /// - `AttemptsExhausted` if the attempt budget is spent on an active
    ///   session, which indicates a broken invariant
    pub fn validate(&self, raw: &str) -> Result<Word, SessionError> {
        if self.state.is_terminal() {
            return Err(SessionError::GameOver);
        }

        let word = Word::new(raw)?;

        if self.attempt_count >= MAX_ATTEMPTS {
            return Err(SessionError::AttemptsExhausted);
        }

        Ok(word)
    }

    /// Apply a scored guess and advance the state machine
    pub(crate) fn record(&mut self, guess: Word, outcome: GuessOutcome) -> GuessSubmission {
        debug_assert!(!self.state.is_terminal(), "record on a finished session");

        self.history.push((guess.clone(), outcome.clone()));
        self.attempt_count += 1;

        self.state = if outcome.is_correct() {
            GameState::Won
        } else if self.attempt_count >= MAX_ATTEMPTS {
            GameState::Lost
        } else {
            GameState::Active
        };

        GuessSubmission {
            guess,
            outcome,
            state: self.state,
            attempt: self.attempt_count,
        }
    }

    /// Validate, score locally against `target` and record
    ///
    /// # Errors
    /// Returns the `validate` error and leaves the session untouched.
    pub fn submit_guess(
        &mut self,
        raw: &str,
        target: &Word,
    ) -> Result<GuessSubmission, SessionError> {
        let guess = self.validate(raw)?;
        let outcome = score(&guess, target);
        Ok(self.record(guess, outcome))
    }

    /// Best status seen so far for every guessed letter
    #[must_use]
    pub fn letter_hints(&self) -> FxHashMap<char, LetterStatus> {
        let mut hints: FxHashMap<char, LetterStatus> = FxHashMap::default();
        for (_, outcome) in &self.history {
            for r in outcome.results() {
                hints
                    .entry(r.letter)
                    .and_modify(|s| *s = (*s).max(r.status))
                    .or_insert(r.status);
            }
        }
        hints
    }

    /// Start over: no history, no attempts, active
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
