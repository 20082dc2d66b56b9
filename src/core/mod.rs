//! Core domain types for the guessing game
//!
//! Words, per-letter feedback and the scoring routine. Everything here is pure
//! and shared by the interactive front ends and the scoring endpoint.

mod feedback;
mod word;

pub use feedback::{
    CONTINUE_MESSAGE, CORRECT_MESSAGE, GuessOutcome, LetterResult, LetterStatus, score,
};
pub use word::{WORD_LENGTH, Word, WordError};
