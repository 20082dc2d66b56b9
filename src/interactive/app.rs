//! TUI application state and logic

use crate::core::GuessOutcome;
use crate::game::{
    Backends, Game, GameError, GameState, MAX_ATTEMPTS, PendingGuess, ScoringError, ScoringMode,
};
use crate::history::HistoryRecord;
use anyhow::Result;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tokio::sync::mpsc;
use tracing::debug;

/// Outcome of a backend call made off the UI task
type Scored = (PendingGuess, Result<GuessOutcome, ScoringError>);

/// Application state
pub struct App {
    pub game: Game,
    pub backends: Backends,
    pub input_buffer: String,
    pub messages: Vec<Message>,
    pub saved: Vec<HistoryRecord>,
    pub stats: Statistics,
    pub should_quit: bool,
    pub input_mode: InputMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Guessing,
    GameOver,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

#[derive(Debug, Default, Clone)]
pub struct Statistics {
    pub total_games: usize,
    pub games_won: usize,
    pub guess_distribution: [usize; MAX_ATTEMPTS + 1],
}

impl App {
    /// Build the app around a game whose backend is one of `backends`
    #[must_use]
    pub fn new(game: Game, backends: Backends) -> Self {
        let mode_hint = if backends.remote.is_some() {
            "Type a 5-letter word and press Enter. TAB switches local/remote scoring."
        } else {
            "Type a 5-letter word and press Enter."
        };

        Self {
            game,
            backends,
            input_buffer: String::new(),
            messages: vec![
                Message {
                    text: format!("Welcome! You have {MAX_ATTEMPTS} attempts."),
                    style: MessageStyle::Info,
                },
                Message {
                    text: mode_hint.to_string(),
                    style: MessageStyle::Info,
                },
            ],
            saved: Vec::new(),
            stats: Statistics::default(),
            should_quit: false,
            input_mode: InputMode::Guessing,
        }
    }

    pub async fn refresh_saved(&mut self) {
        self.saved = self.game.saved_history(MAX_ATTEMPTS).await;
    }

    pub fn push_letter(&mut self, c: char) {
        if self.input_buffer.len() < crate::core::WORD_LENGTH && c.is_ascii_alphabetic() {
            self.input_buffer.push(c.to_ascii_uppercase());
        }
    }

    /// Validate the typed word and reserve a submission
    ///
    /// Returns `None` (with a message) when the word cannot be submitted.
    pub fn begin_guess(&mut self) -> Option<PendingGuess> {
        let input = self.input_buffer.clone();
        match self.game.begin_submission(&input) {
            Ok(pending) => {
                if self.game.mode() == ScoringMode::Remote {
                    self.add_message("Contacting scoring server...", MessageStyle::Info);
                }
                Some(pending)
            }
            Err(err) => {
                self.add_message(&err.to_string(), MessageStyle::Error);
                None
            }
        }
    }

    /// Apply a backend answer to the game
    pub async fn finish_guess(
        &mut self,
        pending: PendingGuess,
        scored: Result<GuessOutcome, ScoringError>,
    ) {
        match self.game.complete_submission(pending, scored).await {
            Ok(submission) => {
                // Keep anything typed while the guess was being scored
                if self.input_buffer == submission.guess.text() {
                    self.input_buffer.clear();
                }
                match submission.state {
                    GameState::Won => {
                        self.record_game(true, submission.attempt);
                        self.input_mode = InputMode::GameOver;

                        let celebration = match submission.attempt {
                            1 => "🎯 HOLE IN ONE! Extraordinary! 🌟",
                            2 => "🔥 MAGNIFICENT! Two guesses! 🔥",
                            3 => "✨ SPLENDID! Three guesses! ✨",
                            4 => "👏 GREAT JOB! Four guesses! 👏",
                            5 => "🎉 NICE WORK! Five guesses! 🎉",
                            _ => "😅 PHEW! Got it in six! 😅",
                        };
                        self.add_message(celebration, MessageStyle::Success);
                        self.add_message("Press 'n' for new game or 'q' to quit.", MessageStyle::Info);
                    }
                    GameState::Lost => {
                        self.record_game(false, submission.attempt);
                        self.input_mode = InputMode::GameOver;

                        let answer = self
                            .game
                            .target()
                            .map_or_else(|| "???".to_string(), ToString::to_string);
                        self.add_message(
                            &format!("Game over! The answer was {answer}."),
                            MessageStyle::Error,
                        );
                        self.add_message("Press 'n' for new game or 'q' to quit.", MessageStyle::Info);
                    }
                    GameState::Active => {
                        let text = format!(
                            "{} ({} left)",
                            submission.outcome.message(),
                            self.game.session().attempts_remaining()
                        );
                        self.add_message(&text, MessageStyle::Info);
                    }
                }
                self.refresh_saved().await;
            }
            Err(GameError::Superseded) => {
                debug!("ignoring outcome for a finished game");
            }
            Err(err) => {
                self.add_message(&format!("{err}. Try again."), MessageStyle::Error);
            }
        }
    }

    fn record_game(&mut self, won: bool, attempts: usize) {
        self.stats.total_games += 1;
        if won {
            self.stats.games_won += 1;
            if attempts <= MAX_ATTEMPTS {
                self.stats.guess_distribution[attempts] += 1;
            }
        }
    }

    pub async fn new_game(&mut self) {
        self.game.reset().await;
        self.input_buffer.clear();
        self.messages.clear();
        self.input_mode = InputMode::Guessing;
        self.add_message("New game started!", MessageStyle::Info);
        self.refresh_saved().await;
    }

    /// Flip between local and remote scoring; always starts a new game
    pub async fn toggle_mode(&mut self) {
        let Some(next) = self.backends.opposite(self.game.mode()) else {
            self.add_message(
                "No scoring endpoint configured (use --endpoint)",
                MessageStyle::Error,
            );
            return;
        };

        let text = match next.mode() {
            ScoringMode::Remote => "Switched to remote mode. Guesses are scored by the server.",
            ScoringMode::Local => "Switched to local mode. Guesses are scored on this machine.",
        };

        self.game.switch_mode(next).await;
        self.input_buffer.clear();
        self.messages.clear();
        self.input_mode = InputMode::Guessing;
        self.add_message(text, MessageStyle::Info);
        self.refresh_saved().await;
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub async fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Scored>();
    let mut events = EventStream::new();

    app.refresh_saved().await;

    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        tokio::select! {
            Some((pending, scored)) = rx.recv() => {
                app.finish_guess(pending, scored).await;
            }
            event = events.next() => match event {
                // Only process key press events (fixes Windows double-input bug)
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    handle_key(&mut app, key, &tx).await;
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                None => break,
            },
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

async fn handle_key(app: &mut App, key: KeyEvent, tx: &mpsc::UnboundedSender<Scored>) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        InputMode::GameOver => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
            KeyCode::Char('n') => app.new_game().await,
            KeyCode::Tab => app.toggle_mode().await,
            // Ignore other keys until a new game starts
            _ => {}
        },
        InputMode::Guessing => match key.code {
            KeyCode::Esc => app.should_quit = true,
            KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.new_game().await;
            }
            KeyCode::Tab => app.toggle_mode().await,
            KeyCode::Char(c) => app.push_letter(c),
            KeyCode::Backspace => {
                app.input_buffer.pop();
            }
            KeyCode::Enter => {
                if let Some(pending) = app.begin_guess() {
                    let backend = app.game.backend();
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let scored = backend.score(pending.guess()).await;
                        // The receiver only goes away when the UI is shutting down
                        let _ = tx.send((pending, scored));
                    });
                }
            }
            _ => {}
        },
    }
}
