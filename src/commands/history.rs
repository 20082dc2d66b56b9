//! Saved history listing

use crate::history::{HistoryRecord, HistoryStore};
use anyhow::Result;

/// What the history command did
#[derive(Debug)]
pub enum HistoryAction {
    Listed(Vec<HistoryRecord>),
    Cleared,
}

/// List the newest `limit` saved guesses, or clear them all
///
/// # Errors
///
/// Returns an error if the store cannot be read or cleared.
pub async fn run_history(
    store: &dyn HistoryStore,
    limit: usize,
    clear: bool,
) -> Result<HistoryAction> {
    if clear {
        store.clear().await?;
        return Ok(HistoryAction::Cleared);
    }

    Ok(HistoryAction::Listed(store.recent(limit).await?))
}
