//! SQLite-backed history

use super::{HistoryRecord, HistoryStore};
use crate::core::{LetterResult, WORD_LENGTH, Word};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    Pool, Row, Sqlite,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
};
use std::{fs, path::Path};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SqliteHistory {
    pool: Pool<Sqlite>,
}

impl SqliteHistory {
    /// Open (creating if needed) the history database at `path`
    ///
    /// # Errors
    /// Returns an error if the parent directory cannot be created or the
    /// database cannot be opened or migrated.
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        // Single writer per front end
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open history at {}", path.display()))?;

        let store = Self { pool };
        store.ensure_schema().await?;
        debug!(path = %path.display(), "history store ready");
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS guess_history (
                id        INTEGER PRIMARY KEY AUTOINCREMENT,
                guess     TEXT NOT NULL,
                result    TEXT NOT NULL,
                timestamp INTEGER NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .context("failed to create guess_history")?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS guess_history_timestamp ON guess_history (timestamp)",
        )
        .execute(&self.pool)
        .await
        .context("failed to create guess_history index")?;

        Ok(())
    }
}

fn decode_row(row: &SqliteRow) -> Result<HistoryRecord> {
    let id: i64 = row.try_get("id")?;
    let guess: String = row.try_get("guess")?;
    let result_json: String = row.try_get("result")?;
    let millis: i64 = row.try_get("timestamp")?;

    let result: [LetterResult; WORD_LENGTH] = serde_json::from_str(&result_json)
        .with_context(|| format!("corrupt result in history row {id}"))?;
    let timestamp = DateTime::<Utc>::from_timestamp_millis(millis)
        .with_context(|| format!("invalid timestamp in history row {id}"))?;

    Ok(HistoryRecord {
        id,
        guess,
        result,
        timestamp,
    })
}

#[async_trait]
impl HistoryStore for SqliteHistory {
    async fn append(
        &self,
        guess: &Word,
        result: &[LetterResult; WORD_LENGTH],
    ) -> Result<HistoryRecord> {
        let timestamp = Utc::now();
        let result_json = serde_json::to_string(result)?;

        let id = sqlx::query("INSERT INTO guess_history (guess, result, timestamp) VALUES (?, ?, ?)")
            .bind(guess.text())
            .bind(&result_json)
            .bind(timestamp.timestamp_millis())
            .execute(&self.pool)
            .await
            .context("failed to save guess")?
            .last_insert_rowid();

        Ok(HistoryRecord {
            id,
            guess: guess.text().to_string(),
            result: *result,
            timestamp,
        })
    }

    async fn recent(&self, limit: usize) -> Result<Vec<HistoryRecord>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query(
            "SELECT id, guess, result, timestamp FROM guess_history \
             ORDER BY timestamp DESC, id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("failed to load history")?;

        rows.iter().map(decode_row).collect()
    }

    async fn clear(&self) -> Result<()> {
        sqlx::query("DELETE FROM guess_history")
            .execute(&self.pool)
            .await
            .context("failed to clear history")?;
        Ok(())
    }
}
