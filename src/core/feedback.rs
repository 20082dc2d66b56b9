//! Per-letter feedback and the scoring routine
//!
//! Scoring a guess against a target yields one status per position:
//! - `Correct` = right letter, right position
//! - `Present` = letter appears elsewhere in the target
//! - `Absent`  = no unconsumed instance of the letter is left in the target

use super::word::{WORD_LENGTH, Word};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message attached to a winning outcome
pub const CORRECT_MESSAGE: &str = "Correct!";

/// Message attached to any other outcome
pub const CONTINUE_MESSAGE: &str = "Keep going";

/// Classification of one guessed letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterStatus {
    Absent,
    Present,
    Correct,
}

impl LetterStatus {
    /// Emoji tile for this status
    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }
}

impl fmt::Display for LetterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Correct => "correct",
            Self::Present => "present",
            Self::Absent => "absent",
        };
        f.write_str(name)
    }
}

/// A guessed letter paired with its status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterResult {
    pub letter: char,
    pub status: LetterStatus,
}

impl LetterResult {
    #[must_use]
    pub const fn new(letter: char, status: LetterStatus) -> Self {
        Self { letter, status }
    }
}

/// Result of scoring one guess
///
/// Serializes to the scoring endpoint's response shape:
/// `{ "result": [...], "isCorrect": bool, "message": string }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessOutcome {
    #[serde(rename = "result")]
    results: [LetterResult; WORD_LENGTH],
    #[serde(rename = "isCorrect")]
    is_correct: bool,
    message: String,
}

impl GuessOutcome {
    /// Build an outcome from per-letter results, deriving the win flag
    #[must_use]
    pub fn from_results(results: [LetterResult; WORD_LENGTH]) -> Self {
        let is_correct = results
            .iter()
            .all(|r| r.status == LetterStatus::Correct);
        let message = if is_correct {
            CORRECT_MESSAGE
        } else {
            CONTINUE_MESSAGE
        };

        Self {
            results,
            is_correct,
            message: message.to_string(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn results(&self) -> &[LetterResult; WORD_LENGTH] {
        &self.results
    }

    #[inline]
    #[must_use]
    pub const fn is_correct(&self) -> bool {
        self.is_correct
    }

    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Count results with the given status
    #[must_use]
    pub fn count(&self, status: LetterStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    /// Check that this outcome is a coherent answer for `guess`
    ///
    /// Letters must echo the guess position by position, and the win flag
    /// must agree with the statuses.
    #[must_use]
    pub fn is_consistent_with(&self, guess: &Word) -> bool {
        let letters_match = self
            .results
            .iter()
            .zip(guess.letters())
            .all(|(r, &g)| r.letter == char::from(g));
        let all_correct = self.count(LetterStatus::Correct) == WORD_LENGTH;

        letters_match && all_correct == self.is_correct
    }

    /// Convert to an emoji string like "🟩🟨⬜🟩🟨"
    ///
    /// # Examples
    /// ```
    /// use word_guess::core::{Word, score};
    ///
    /// let outcome = score(&Word::new("could").unwrap(), &Word::new("cloud").unwrap());
    /// assert_eq!(outcome.to_emoji(), "🟩🟨🟨🟨🟩");
    /// ```
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.results.iter().map(|r| r.status.emoji()).collect()
    }
}

/// Score `guess` against `target`
///
/// # Algorithm
/// 1. First pass: exact position matches become `Correct`, and that target
///    letter is removed from the pool
/// 2. Second pass: left to right, each unresolved letter consumes the first
///    remaining pool instance of itself (`Present`) or is `Absent`
///
/// A target letter satisfies at most one guess position, and exact matches
/// always claim their letter before any present match.
///
/// # Examples
/// ```
/// use word_guess::core::{LetterStatus, Word, score};
///
/// let outcome = score(&Word::new("llama").unwrap(), &Word::new("allow").unwrap());
/// let statuses: Vec<_> = outcome.results().iter().map(|r| r.status).collect();
/// assert_eq!(
///     statuses,
///     [
///         LetterStatus::Present,
///         LetterStatus::Correct,
///         LetterStatus::Present,
///         LetterStatus::Absent,
///         LetterStatus::Absent,
///     ]
/// );
/// ```
#[must_use]
pub fn score(guess: &Word, target: &Word) -> GuessOutcome {
    let guess_letters = guess.letters();
    let mut pool: [Option<u8>; WORD_LENGTH] = target.letters().map(Some);
    let mut staged: [Option<LetterStatus>; WORD_LENGTH] = [None; WORD_LENGTH];

    // First pass: exact position matches
    for (i, slot) in staged.iter_mut().enumerate() {
        if pool[i] == Some(guess_letters[i]) {
            *slot = Some(LetterStatus::Correct);
            pool[i] = None;
        }
    }

    // Second pass: remaining letters consume the pool left to right
    for (i, slot) in staged.iter_mut().enumerate() {
        if slot.is_some() {
            continue;
        }

        let letter = Some(guess_letters[i]);
        *slot = Some(match pool.iter_mut().find(|p| **p == letter) {
            Some(instance) => {
                *instance = None;
                LetterStatus::Present
            }
            None => LetterStatus::Absent,
        });
    }

    let results = std::array::from_fn(|i| {
        LetterResult::new(
            char::from(guess_letters[i]),
            staged[i].unwrap_or(LetterStatus::Absent),
        )
    });

    GuessOutcome::from_results(results)
}
