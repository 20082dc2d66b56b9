//! TUI rendering with ratatui
//!
//! Board, keyboard hints, saved history and messages.

use super::app::{App, InputMode, MessageStyle};
use crate::core::{LetterStatus, WORD_LENGTH};
use crate::game::{GameState, MAX_ATTEMPTS};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(16),   // Main content
            Constraint::Length(3), // Input area
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55), // Board and keyboard
            Constraint::Percentage(45), // Saved history and messages
        ])
        .split(chunks[1]);

    render_play_panel(f, app, main_chunks[0]);
    render_info_panel(f, app, main_chunks[1]);

    render_input(f, app, chunks[2]);
    render_status(f, app, chunks[3]);
}

/// Background color for a status tile
const fn status_color(status: LetterStatus) -> Color {
    match status {
        LetterStatus::Correct => Color::Green,
        LetterStatus::Present => Color::Yellow,
        LetterStatus::Absent => Color::DarkGray,
    }
}

fn tile(letter: char, status: Option<LetterStatus>) -> Span<'static> {
    let style = match status {
        Some(status) => Style::default()
            .fg(Color::Black)
            .bg(status_color(status))
            .add_modifier(Modifier::BOLD),
        None => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    };
    Span::styled(format!(" {letter} "), style)
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("🟩 WORD GUESS - Find the 5-letter word")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_play_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(MAX_ATTEMPTS as u16 * 2 + 2), // Board
            Constraint::Min(5),                              // Keyboard
        ])
        .split(area);

    render_board(f, app, chunks[0]);
    render_keyboard(f, app, chunks[1]);
}

fn render_board(f: &mut Frame, app: &App, area: Rect) {
    let history = app.game.session().history();
    let mut lines = Vec::with_capacity(MAX_ATTEMPTS * 2);

    for row in 0..MAX_ATTEMPTS {
        let mut spans = Vec::with_capacity(WORD_LENGTH * 2);

        if let Some((_, outcome)) = history.get(row) {
            for r in outcome.results() {
                spans.push(tile(r.letter, Some(r.status)));
                spans.push(Span::raw(" "));
            }
        } else if row == history.len() && app.input_mode == InputMode::Guessing {
            // Row being typed
            let typed: Vec<char> = app.input_buffer.chars().collect();
            for i in 0..WORD_LENGTH {
                spans.push(tile(typed.get(i).copied().unwrap_or('_'), None));
                spans.push(Span::raw(" "));
            }
        } else {
            for _ in 0..WORD_LENGTH {
                spans.push(Span::styled(" · ", Style::default().fg(Color::DarkGray)));
                spans.push(Span::raw(" "));
            }
        }

        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    let board = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Board ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(board, area);
}

fn render_keyboard(f: &mut Frame, app: &App, area: Rect) {
    let hints = app.game.session().letter_hints();

    let lines: Vec<Line> = KEYBOARD_ROWS
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .chars()
                .flat_map(|c| {
                    let key = match hints.get(&c) {
                        Some(&status) => Span::styled(
                            c.to_string(),
                            Style::default()
                                .fg(Color::Black)
                                .bg(status_color(status))
                                .add_modifier(Modifier::BOLD),
                        ),
                        None => Span::raw(c.to_string()),
                    };
                    [key, Span::raw(" ")]
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let keyboard = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Letters ")
            .borders(Borders::ALL),
    );
    f.render_widget(keyboard, area);
}

fn render_info_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),                          // Saved history
            Constraint::Length(MAX_ATTEMPTS as u16 + 2), // Guess distribution
            Constraint::Min(4),                          // Messages
        ])
        .split(area);

    render_saved_history(f, app, chunks[0]);
    render_distribution(f, app, chunks[1]);
    render_messages(f, app, chunks[2]);
}

fn render_distribution(f: &mut Frame, app: &App, area: Rect) {
    const BAR_WIDTH: usize = 20;

    let distribution = &app.stats.guess_distribution[1..];
    let most = distribution.iter().copied().max().unwrap_or(0).max(1);

    let lines: Vec<Line> = distribution
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let filled = count * BAR_WIDTH / most;
            Line::from(vec![
                Span::raw(format!("{} ", i + 1)),
                Span::styled("█".repeat(filled), Style::default().fg(Color::Green)),
                Span::raw(format!(" {count}")),
            ])
        })
        .collect();

    let chart = Paragraph::new(lines).block(
        Block::default()
            .title(" Guess Distribution ")
            .borders(Borders::ALL),
    );
    f.render_widget(chart, area);
}

fn render_saved_history(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = if app.saved.is_empty() {
        vec![ListItem::new("No saved guesses").style(Style::default().fg(Color::DarkGray))]
    } else {
        app.saved
            .iter()
            .map(|record| {
                ListItem::new(format!(
                    "{} {} {}",
                    record.timestamp.format("%H:%M:%S"),
                    record.guess,
                    record.to_emoji()
                ))
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .title(" Saved History ")
            .borders(Borders::ALL),
    );
    f.render_widget(list, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let (title, content, color) = match (app.input_mode, app.game.is_pending()) {
        (InputMode::GameOver, _) => (
            " Game over | 'n' new game, 'q' quit, TAB switch mode ",
            "",
            Color::Green,
        ),
        (InputMode::Guessing, true) => (
            " Scoring... ",
            app.input_buffer.as_str(),
            Color::DarkGray,
        ),
        (InputMode::Guessing, false) => (
            " Your guess (5 letters) | Enter submit, TAB switch mode ",
            app.input_buffer.as_str(),
            Color::Yellow,
        ),
    };

    let input = Paragraph::new(content)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );

    f.render_widget(input, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(area);

    let session = app.game.session();

    let mode = Paragraph::new(format!("Mode: {}", app.game.mode())).alignment(Alignment::Center);
    f.render_widget(mode, chunks[0]);

    let state = match session.state() {
        GameState::Active => "Playing",
        GameState::Won => "Won",
        GameState::Lost => "Lost",
    };
    let attempts = Paragraph::new(format!(
        "{state} {}/{MAX_ATTEMPTS}",
        session.attempt_count()
    ))
    .alignment(Alignment::Center);
    f.render_widget(attempts, chunks[1]);

    let stats_text = format!(
        "Games: {} | Win Rate: {:.0}%",
        app.stats.total_games,
        if app.stats.total_games > 0 {
            app.stats.games_won as f64 / app.stats.total_games as f64 * 100.0
        } else {
            0.0
        }
    );
    let stats = Paragraph::new(stats_text).alignment(Alignment::Center);
    f.render_widget(stats, chunks[2]);

    let help = Paragraph::new("Esc: Quit | Ctrl-N: New | TAB: Mode")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::game::{Backends, Game, LocalScorer, ScoringBackend};
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test]
    async fn board_shows_scored_rows_and_mode() {
        let local: Arc<dyn ScoringBackend> = Arc::new(LocalScorer::new(Word::new("cloud").unwrap()));
        let mut game = Game::new(Arc::clone(&local), None);
        game.submit_guess("llama").await.unwrap();
        let app = App::new(
            game,
            Backends {
                local,
                remote: None,
            },
        );

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| ui(f, &app)).unwrap();
        let text = buffer_text(&terminal);

        assert!(text.contains("Mode: Local"));
        assert!(text.contains("Playing 1/6"));
        assert!(text.contains(" L "));
        assert!(text.contains("No saved guesses"));
    }
}
