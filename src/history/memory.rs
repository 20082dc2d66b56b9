//! In-process history, used when no database is wanted

use super::{HistoryRecord, HistoryStore};
use crate::core::{LetterResult, WORD_LENGTH, Word};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemoryHistory {
    records: Mutex<Vec<HistoryRecord>>,
}

impl MemoryHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistory {
    async fn append(
        &self,
        guess: &Word,
        result: &[LetterResult; WORD_LENGTH],
    ) -> Result<HistoryRecord> {
        let mut records = self.records.lock().await;
        let id = records.last().map_or(1, |r| r.id + 1);
        let record = HistoryRecord {
            id,
            guess: guess.text().to_string(),
            result: *result,
            timestamp: Utc::now(),
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<HistoryRecord>> {
        let records = self.records.lock().await;
        let mut newest_first: Vec<HistoryRecord> = records.iter().rev().cloned().collect();
        newest_first.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        newest_first.truncate(limit);
        Ok(newest_first)
    }

    async fn clear(&self) -> Result<()> {
        self.records.lock().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::score;

    #[tokio::test]
    async fn records_come_back_newest_first() {
        let store = MemoryHistory::new();
        let target = Word::new("cloud").unwrap();
        for guess in ["aaaaa", "could", "cloud"] {
            let guess = Word::new(guess).unwrap();
            store
                .append(&guess, score(&guess, &target).results())
                .await
                .unwrap();
        }

        let recent = store.recent(10).await.unwrap();
        let guesses: Vec<&str> = recent.iter().map(|r| r.guess.as_str()).collect();
        assert_eq!(guesses, ["CLOUD", "COULD", "AAAAA"]);
        assert_eq!(recent[0].to_emoji(), "🟩🟩🟩🟩🟩");

        assert_eq!(store.recent(2).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn clear_empties_store() {
        let store = MemoryHistory::new();
        let guess = Word::new("cloud").unwrap();
        store
            .append(&guess, score(&guess, &guess).results())
            .await
            .unwrap();
        store.clear().await.unwrap();
        assert!(store.recent(10).await.unwrap().is_empty());
    }
}
