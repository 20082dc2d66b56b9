//! Display functions for command results

use super::formatters::{create_progress_bar, tile_row};
use crate::core::{GuessOutcome, Word};
use crate::game::{GameState, GuessSubmission, MAX_ATTEMPTS};
use crate::history::HistoryRecord;
use colored::Colorize;

/// Print a scored guess as a row of tiles
pub fn print_outcome(outcome: &GuessOutcome) {
    println!("  {}  {}", tile_row(outcome.results()), outcome.to_emoji());
}

/// Print an accepted guess with the remaining attempt budget
pub fn print_submission(submission: &GuessSubmission) {
    println!(
        "\nTurn {}/{MAX_ATTEMPTS} [{}]",
        submission.attempt,
        create_progress_bar(submission.attempt, MAX_ATTEMPTS, MAX_ATTEMPTS).cyan()
    );
    print_outcome(&submission.outcome);

    if submission.state == GameState::Active {
        println!("  {}", submission.outcome.message());
    }
}

/// Print the end-of-game banner
///
/// `target` is `None` when the answer is held by a remote server.
pub fn print_game_over(state: GameState, attempts: usize, target: Option<&Word>) {
    println!("\n{}", "═".repeat(60).bright_cyan());
    match state {
        GameState::Won => println!(
            "{}",
            format!(
                "🎉 Correct! Solved in {attempts} {}",
                if attempts == 1 { "guess" } else { "guesses" }
            )
            .green()
            .bold()
        ),
        GameState::Lost => {
            let answer = target.map_or_else(|| "???".to_string(), ToString::to_string);
            println!(
                "{}",
                format!("❌ Game over! The answer was {answer}.").red().bold()
            );
        }
        GameState::Active => {}
    }
    println!("{}", "═".repeat(60).bright_cyan());
}

/// Print saved history, newest first
pub fn print_history(records: &[HistoryRecord]) {
    if records.is_empty() {
        println!("{}", "No saved guesses.".bright_black());
        return;
    }

    println!("\n{}", "Saved guesses (newest first)".bright_cyan().bold());
    for record in records {
        println!(
            "  {}  {}  {}",
            record
                .timestamp
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
                .bright_black(),
            tile_row(&record.result),
            record.to_emoji()
        );
    }
}
