//! Terminal output formatting
//!
//! Colored tiles and banners for the line-oriented commands.

pub mod display;
pub mod formatters;

pub use display::{print_game_over, print_history, print_outcome, print_submission};
