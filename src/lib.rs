//! Word Guess
//!
//! A five-letter word guessing game: six attempts, per-letter feedback, and
//! either local scoring or an HTTP scoring endpoint that keeps the target
//! secret.
//!
//! # Quick Start
//!
//! ```rust
//! use word_guess::core::{LetterStatus, Word, score};
//!
//! let guess = Word::new("could").unwrap();
//! let target = Word::new("cloud").unwrap();
//!
//! let outcome = score(&guess, &target);
//! assert_eq!(outcome.results()[0].status, LetterStatus::Correct);
//! assert!(!outcome.is_correct());
//! ```

// Core domain types and the scoring rule
pub mod core;

// Session state machine and scoring backends
pub mod game;

// Saved guess history
pub mod history;

// Wire types shared by client and endpoint
pub mod protocol;

// HTTP scoring endpoint
pub mod server;

// Settings file and environment
pub mod config;

// Tracing setup
pub mod telemetry;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
