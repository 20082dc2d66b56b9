//! Guess history
//!
//! An append-only mirror of submitted guesses, kept for display across runs.
//! The game never reads it back to decide anything; losing it costs nothing
//! but the listing.

mod memory;
mod sqlite;

pub use memory::MemoryHistory;
pub use sqlite::SqliteHistory;

use crate::core::{LetterResult, WORD_LENGTH, Word};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One saved guess
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: i64,
    pub guess: String,
    pub result: [LetterResult; WORD_LENGTH],
    pub timestamp: DateTime<Utc>,
}

impl HistoryRecord {
    /// Emoji tiles for the saved result
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.result.iter().map(|r| r.status.emoji()).collect()
    }
}

/// Storage for saved guesses
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append a guess and its result, stamped with the current time
    async fn append(&self, guess: &Word, result: &[LetterResult; WORD_LENGTH])
    -> Result<HistoryRecord>;

    /// Most recent records first, at most `limit`
    async fn recent(&self, limit: usize) -> Result<Vec<HistoryRecord>>;

    /// Remove every record
    async fn clear(&self) -> Result<()>;
}
