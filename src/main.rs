//! Sutom - CLI
//!
//! French word-guessing game with TUI and line modes, a daily challenge and
//! optional remote scoring.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use sutom::{
    commands::{collect_stats, run_daily, run_simple, score_words},
    core::{Difficulty, Word},
    game::{
        Collaborators, DEFAULT_MAX_ATTEMPTS, Dictionary, FileStore, GameConfig, HttpEvaluator,
        RemoteEvaluator, StateStore, time_until_next, today,
    },
    output::{print_countdown, print_score, print_server_stats, print_stats},
    wordlists::{WordPool, loader::load_from_file},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sutom",
    about = "Sutom: find the French word in six attempts, first letter given",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Game server base URL (e.g. http://localhost:8080); offline when absent
    #[arg(long, global = true)]
    server: Option<String>,

    /// Give up on the server after this many milliseconds
    #[arg(long, global = true, default_value_t = 5000)]
    timeout_ms: u64,

    /// Directory holding daily records and preferences
    #[arg(long, global = true, default_value = ".sutom")]
    state_dir: PathBuf,

    /// Attempts per classic round
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: usize,

    /// Difficulty: easy, medium or hard (default: last played, else medium)
    #[arg(short, long, global = true)]
    difficulty: Option<Difficulty>,

    /// Play a fixed word instead of a drawn one
    #[arg(long, global = true)]
    word: Option<String>,

    /// Custom word pool file ("difficulty,word" per line)
    #[arg(short = 'w', long, global = true)]
    wordlist: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple CLI mode (line-based classic game)
    Simple,

    /// Today's daily challenge
    Daily,

    /// Score a guess against a target word
    Score {
        /// The guessed word
        guess: String,

        /// The word to find
        target: String,
    },

    /// Daily-challenge statistics, with server-wide numbers when --server is set
    Stats,
}

/// Log to stderr in line modes; to a file under the state dir for the TUI
fn init_logging(tui: bool, state_dir: &Path) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    );

    if tui {
        fs::create_dir_all(state_dir)
            .with_context(|| format!("failed to create {}", state_dir.display()))?;
        let path = state_dir.join("sutom.log");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        builder.with_writer(Mutex::new(file)).with_ansi(false).init();
    } else {
        builder.with_writer(io::stderr).init();
    }
    Ok(())
}

fn load_pool(wordlist: Option<&Path>) -> Result<WordPool> {
    match wordlist {
        None => Ok(WordPool::embedded()),
        Some(path) => {
            let pool = load_from_file(path)
                .with_context(|| format!("failed to load word pool from {}", path.display()))?;
            anyhow::ensure!(!pool.is_empty(), "word pool {} is empty", path.display());
            Ok(pool)
        }
    }
}

fn build_remote(cli: &Cli) -> Result<Option<Arc<dyn RemoteEvaluator>>> {
    let Some(server) = &cli.server else {
        return Ok(None);
    };

    let timeout = Duration::from_millis(cli.timeout_ms.max(1));
    let evaluator = HttpEvaluator::new(server, timeout)
        .with_context(|| format!("failed to set up client for {server}"))?;
    info!(%server, ?timeout, "remote evaluator configured");
    Ok(Some(Arc::new(evaluator) as Arc<dyn RemoteEvaluator>))
}

fn build_collaborators(cli: &Cli) -> Result<Collaborators> {
    let pool = Arc::new(load_pool(cli.wordlist.as_deref())?);

    Ok(Collaborators {
        validator: Arc::new(Dictionary::from_pool(&pool)),
        pool,
        remote: build_remote(cli)?,
    })
}

fn game_config(cli: &Cli, store: &dyn StateStore) -> Result<GameConfig> {
    let override_target = cli
        .word
        .as_deref()
        .map(Word::new)
        .transpose()
        .context("invalid --word")?;

    Ok(GameConfig {
        difficulty: cli.difficulty,
        last_difficulty: store
            .last_difficulty()
            .context("failed to read preferences")?,
        override_target,
        max_attempts: cli.max_attempts,
    })
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.take().unwrap_or(Commands::Play);
    init_logging(matches!(command, Commands::Play), &cli.state_dir)?;

    let store: Arc<dyn StateStore> = Arc::new(FileStore::new(&cli.state_dir));

    match command {
        Commands::Play => run_play_command(&cli, store),
        Commands::Simple => {
            let collaborators = build_collaborators(&cli)?;
            let config = game_config(&cli, store.as_ref())?;
            run_simple(&config, &collaborators, store.as_ref())
        }
        Commands::Daily => {
            let collaborators = build_collaborators(&cli)?;
            run_daily(&collaborators, store.as_ref(), Utc::now(), &mut io::stdin().lock())?;
            Ok(())
        }
        Commands::Score { guess, target } => {
            let result = score_words(&guess, &target)?;
            print_score(&result.guess, &result.target, &result.verdicts);
            Ok(())
        }
        Commands::Stats => {
            let now = Utc::now();
            let remote = build_remote(&cli)?;
            let report = collect_stats(store.as_ref(), remote.as_deref(), today(now))?;
            print_stats(&report.personal);
            print_server_stats(report.server.as_ref(), report.daily.as_ref());
            print_countdown(time_until_next(now));
            Ok(())
        }
    }
}

fn run_play_command(cli: &Cli, store: Arc<dyn StateStore>) -> Result<()> {
    use sutom::interactive::{App, run_tui};

    let collaborators = build_collaborators(cli)?;
    let config = game_config(cli, store.as_ref())?;
    let app = App::new(config, collaborators, store)?;
    run_tui(app)
}
