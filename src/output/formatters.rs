//! Formatting utilities for terminal output

use crate::core::{LetterResult, LetterStatus};
use colored::{ColoredString, Colorize};

/// Render one letter as a colored tile like " C "
#[must_use]
pub fn letter_tile(result: &LetterResult) -> ColoredString {
    let text = format!(" {} ", result.letter);
    match result.status {
        LetterStatus::Correct => text.black().on_green().bold(),
        LetterStatus::Present => text.black().on_yellow().bold(),
        LetterStatus::Absent => text.white().on_bright_black().bold(),
    }
}

/// Render a row of results as adjacent colored tiles
#[must_use]
pub fn tile_row(results: &[LetterResult]) -> String {
    results
        .iter()
        .map(|r| letter_tile(r).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: usize, max: usize, width: usize) -> String {
    let filled = if max == 0 { 0 } else { value * width / max };
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_row_keeps_letter_order() {
        colored::control::set_override(false);
        let results = [
            LetterResult::new('C', LetterStatus::Correct),
            LetterResult::new('O', LetterStatus::Present),
            LetterResult::new('A', LetterStatus::Absent),
        ];
        assert_eq!(tile_row(&results), " C   O   A ");
    }

    #[test]
    fn progress_bar_empty() {
        assert_eq!(create_progress_bar(0, 6, 6), "░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        assert_eq!(create_progress_bar(6, 6, 6), "██████");
    }

    #[test]
    fn progress_bar_half() {
        assert_eq!(create_progress_bar(3, 6, 10), "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(3, 0, 4), "░░░░");
    }
}
