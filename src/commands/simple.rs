//! Simple interactive CLI mode
//!
//! Line-oriented game without the TUI. Reads guesses and `:` commands from
//! any buffered reader so it can be driven from stdin or a script.

use crate::game::{Backends, Game, GameError, MAX_ATTEMPTS};
use crate::output::{print_game_over, print_history, print_submission};
use anyhow::Result;
use colored::Colorize;
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const HISTORY_LIMIT: usize = 20;

/// Run the line-mode game until `:quit` or end of input
///
/// # Errors
///
/// Returns an error if reading input or flushing the prompt fails.
pub async fn run_simple<R>(game: &mut Game, backends: &Backends, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                   Word Guess - Simple Mode                   ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Guess the 5-letter word in {MAX_ATTEMPTS} attempts.");
    println!("  🟩 right letter, right spot");
    println!("  🟨 right letter, wrong spot");
    println!("  ⬜ not in the word\n");
    println!("Commands: ':new' new game, ':mode' switch scoring, ':history' saved guesses, ':quit' exit\n");
    println!("Scoring mode: {}", game.mode().to_string().bright_cyan());

    let mut lines = input.lines();

    loop {
        prompt(game)?;
        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        match line.trim() {
            "" => {}
            ":quit" | ":q" | ":exit" => break,
            ":new" | ":n" => {
                game.reset().await;
                println!("\n🔄 New game started!\n");
            }
            ":mode" | ":m" => match backends.opposite(game.mode()) {
                Some(next) => {
                    game.switch_mode(next).await;
                    println!(
                        "\nScoring mode: {} (new game started)\n",
                        game.mode().to_string().bright_cyan()
                    );
                }
                None => println!("{}", "No scoring endpoint configured (use --endpoint)".red()),
            },
            ":history" | ":h" => print_history(&game.saved_history(HISTORY_LIMIT).await),
            guess => submit(game, guess).await,
        }
    }

    println!("\n👋 Thanks for playing!\n");
    Ok(())
}

async fn submit(game: &mut Game, guess: &str) {
    match game.submit_guess(guess).await {
        Ok(submission) => {
            print_submission(&submission);
            if submission.state.is_terminal() {
                print_game_over(submission.state, submission.attempt, game.target());
                println!("Type ':new' to play again or ':quit' to exit.");
            }
        }
        Err(GameError::Session(err)) => println!("❌ {err}"),
        Err(err) => println!("{}", format!("❌ {err}. Try again.").red()),
    }
}

fn prompt(game: &Game) -> Result<()> {
    let session = game.session();
    if session.state().is_terminal() {
        print!("> ");
    } else {
        print!("Guess {}/{MAX_ATTEMPTS}: ", session.attempt_count() + 1);
    }
    io::stdout().flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::game::{GameState, LocalScorer, ScoringBackend, ScoringMode};
    use crate::history::{HistoryStore, MemoryHistory};
    use std::sync::Arc;

    fn setup(history: Arc<MemoryHistory>) -> (Game, Backends) {
        let local: Arc<dyn ScoringBackend> = Arc::new(LocalScorer::new(Word::new("cloud").unwrap()));
        let game = Game::new(Arc::clone(&local), Some(history));
        (
            game,
            Backends {
                local,
                remote: None,
            },
        )
    }

    #[tokio::test]
    async fn plays_until_solved() {
        let history = Arc::new(MemoryHistory::new());
        let (mut game, backends) = setup(Arc::clone(&history));

        run_simple(&mut game, &backends, &b"could\ncloud\n:quit\n"[..])
            .await
            .unwrap();

        assert_eq!(game.session().state(), GameState::Won);
        assert_eq!(game.session().attempt_count(), 2);
        assert_eq!(history.recent(10).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn invalid_lines_do_not_consume_attempts() {
        let (mut game, backends) = setup(Arc::new(MemoryHistory::new()));

        run_simple(&mut game, &backends, &b"clo\nab1de\n\nllama\n"[..])
            .await
            .unwrap();

        assert_eq!(game.session().attempt_count(), 1);
        assert_eq!(game.session().state(), GameState::Active);
    }

    #[tokio::test]
    async fn new_command_resets_game() {
        let history = Arc::new(MemoryHistory::new());
        let (mut game, backends) = setup(Arc::clone(&history));

        run_simple(&mut game, &backends, &b"cloud\n:new\ncould\n"[..])
            .await
            .unwrap();

        assert_eq!(game.session().attempt_count(), 1);
        assert_eq!(game.session().state(), GameState::Active);
        let saved = history.recent(10).await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].guess, "COULD");
    }

    #[tokio::test]
    async fn mode_without_endpoint_stays_local() {
        let (mut game, backends) = setup(Arc::new(MemoryHistory::new()));

        run_simple(&mut game, &backends, &b"could\n:mode\n:history\n"[..])
            .await
            .unwrap();

        assert_eq!(game.mode(), ScoringMode::Local);
        assert_eq!(game.session().attempt_count(), 1);
    }
}
