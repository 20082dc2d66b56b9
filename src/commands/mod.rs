//! Command implementations

pub mod history;
pub mod score;
pub mod simple;

pub use history::{HistoryAction, run_history};
pub use score::{ScoreReport, score_words};
pub use simple::run_simple;
