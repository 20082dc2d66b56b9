//! Word Guess - CLI
//!
//! Terminal word guessing game with TUI and line modes, plus the HTTP scoring
//! endpoint that remote mode talks to.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{info, warn};
use word_guess::{
    commands::{HistoryAction, run_history, run_simple, score_words},
    config::{Settings, load_settings},
    core::Word,
    game::{Backends, Game, LocalScorer, RemoteScorer, ScoringBackend},
    history::{HistoryStore, MemoryHistory, SqliteHistory},
    output::{print_history, print_outcome},
    server, telemetry,
};

#[derive(Parser)]
#[command(
    name = "word_guess",
    about = "Guess the five-letter word in six tries, scored locally or by a server",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play(GameArgs),

    /// Simple CLI mode (line-oriented game without TUI)
    Simple(GameArgs),

    /// Run the HTTP scoring endpoint
    Serve {
        /// Address to bind, e.g. 127.0.0.1:3000
        #[arg(short, long)]
        bind: Option<String>,

        /// Target word the endpoint scores against
        #[arg(short, long)]
        target: Option<String>,
    },

    /// Score one guess against a target and exit
    Score {
        /// The guess to score
        guess: String,

        /// Target word (defaults to the configured target)
        #[arg(short, long)]
        target: Option<String>,

        /// Print the endpoint's JSON response shape
        #[arg(long)]
        json: bool,
    },

    /// List or clear the saved guess history
    History {
        /// Number of records to show, newest first
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,

        /// Delete every saved record
        #[arg(long)]
        clear: bool,

        /// History database (defaults to the configured path)
        #[arg(long)]
        history: Option<PathBuf>,
    },
}

#[derive(Args, Default)]
struct GameArgs {
    /// Scoring endpoint URL; enables remote mode
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Start in remote mode
    #[arg(short, long)]
    remote: bool,

    /// Target word for local scoring
    #[arg(short, long)]
    target: Option<String>,

    /// History database
    #[arg(long)]
    history: Option<PathBuf>,

    /// Keep history in memory for this run only
    #[arg(long, conflicts_with = "history")]
    no_history: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings()?;

    // Default to Play mode if no command given
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Play(GameArgs::default()));

    // The TUI owns the terminal, so it only logs when given a file
    let default_filter = match (&command, &cli.log_file) {
        (Commands::Serve { .. }, _) | (_, Some(_)) => "info",
        (Commands::Play(_), None) => "off",
        _ => "warn",
    };
    telemetry::init(default_filter, cli.log_file.as_deref())?;

    match command {
        Commands::Play(args) => run_play_command(&args, &settings).await,
        Commands::Simple(args) => run_simple_command(&args, &settings).await,
        Commands::Serve { bind, target } => {
            run_serve_command(bind, target.as_deref(), &settings).await
        }
        Commands::Score {
            guess,
            target,
            json,
        } => run_score_command(&guess, target.as_deref(), json, &settings),
        Commands::History {
            limit,
            clear,
            history,
        } => run_history_command(limit, clear, history, &settings).await,
    }
}

fn parse_target(raw: &str) -> Result<Word> {
    Word::new(raw).with_context(|| format!("invalid target word '{raw}'"))
}

/// Build the game and the backends it may switch between
async fn build_game(args: &GameArgs, settings: &Settings) -> Result<(Game, Backends)> {
    let target = parse_target(args.target.as_deref().unwrap_or(&settings.target_word))?;
    let local: Arc<dyn ScoringBackend> = Arc::new(LocalScorer::new(target));

    let remote: Option<Arc<dyn ScoringBackend>> =
        match args.endpoint.as_ref().or(settings.endpoint.as_ref()) {
            Some(url) => Some(Arc::new(RemoteScorer::new(url.as_str())?)),
            None => None,
        };

    let active = match (&remote, args.remote) {
        (Some(remote), true) => Arc::clone(remote),
        (None, true) => bail!("remote mode needs a scoring endpoint (--endpoint or SCORE_ENDPOINT)"),
        (_, false) => Arc::clone(&local),
    };

    let history_path = if args.no_history {
        None
    } else {
        Some(args.history.as_deref().unwrap_or(&settings.history_path))
    };
    let history = open_history(history_path).await;

    Ok((Game::new(active, Some(history)), Backends { local, remote }))
}

/// Open the SQLite history, falling back to memory so play is never blocked
async fn open_history(path: Option<&Path>) -> Arc<dyn HistoryStore> {
    if let Some(path) = path {
        match SqliteHistory::open(path).await {
            Ok(store) => return Arc::new(store),
            Err(error) => warn!("history unavailable, keeping it in memory: {error:#}"),
        }
    }
    Arc::new(MemoryHistory::new())
}

async fn run_play_command(args: &GameArgs, settings: &Settings) -> Result<()> {
    use word_guess::interactive::{App, run_tui};

    let (game, backends) = build_game(args, settings).await?;
    info!(mode = %game.mode(), "starting TUI");
    run_tui(App::new(game, backends)).await
}

async fn run_simple_command(args: &GameArgs, settings: &Settings) -> Result<()> {
    let (mut game, backends) = build_game(args, settings).await?;
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    run_simple(&mut game, &backends, stdin).await
}

async fn run_serve_command(
    bind: Option<String>,
    target: Option<&str>,
    settings: &Settings,
) -> Result<()> {
    let bind = bind.unwrap_or_else(|| settings.bind_addr.clone());
    let addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("invalid bind address '{bind}'"))?;
    let target = parse_target(target.unwrap_or(&settings.target_word))?;

    server::serve(addr, target).await
}

fn run_score_command(
    guess: &str,
    target: Option<&str>,
    json: bool,
    settings: &Settings,
) -> Result<()> {
    let report = score_words(guess, target.unwrap_or(&settings.target_word))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report.outcome)?);
        return Ok(());
    }

    println!("\n{} vs {}", report.guess, report.target);
    print_outcome(&report.outcome);
    println!("  {}\n", report.outcome.message());
    Ok(())
}

async fn run_history_command(
    limit: usize,
    clear: bool,
    history: Option<PathBuf>,
    settings: &Settings,
) -> Result<()> {
    let path = history.unwrap_or_else(|| settings.history_path.clone());
    let store = SqliteHistory::open(&path).await?;

    match run_history(&store, limit, clear).await? {
        HistoryAction::Listed(records) => print_history(&records),
        HistoryAction::Cleared => println!("Cleared saved history at {}", path.display()),
    }
    Ok(())
}
