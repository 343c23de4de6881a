mod app;
mod commands;
mod config;
mod ui;

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::EventStream;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use fakecoin_execution::logging::{describe, event_log_line};
use fakecoin_execution::{Autoplayer, Game, Variant};
use futures::StreamExt;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::select;
use tracing::{info, Level};

use crate::app::{handle_key_event, AppState};
use crate::config::{default_log_path, load_config, resolve, save_config, Settings};
use crate::ui::draw_ui;

/// CLI flags (override persisted preferences)
#[derive(Parser, Debug)]
#[command(name = "fakecoin", about = "Find the light coin among nine with a two-pan scale")]
struct Args {
    /// Rule set: classic (2 weighs, no candidate labels) or open
    #[arg(long)]
    variant: Option<Variant>,

    /// Maximum weighs per game
    #[arg(long, conflicts_with = "no_weigh_limit")]
    weigh_limit: Option<u32>,

    /// Allow unlimited weighs
    #[arg(long)]
    no_weigh_limit: bool,

    /// Seed for a reproducible sequence of games
    #[arg(long)]
    seed: Option<u64>,

    /// Print each event as JSON in the log pane
    #[arg(long)]
    verbose: bool,

    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,

    /// Log file (defaults to the platform data dir)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Solve one game automatically and print the events instead of starting the UI
    #[arg(long)]
    autoplay: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut cfg = load_config().unwrap_or_default();
    let settings = resolve(&args, &mut cfg)?;
    save_config(&cfg)?;

    let log_path = args.log_file.clone().or_else(default_log_path);
    if let Some(warning) = init_tracing(log_path, settings.log_level) {
        eprintln!("fakecoin: {warning}");
    }
    info!(
        variant = %settings.variant,
        rules = %settings.rules.describe(),
        seed = ?settings.seed,
        "starting"
    );

    let rng = match settings.seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    };

    if args.autoplay {
        return run_autoplay(&settings, rng);
    }
    run_tui(&settings, rng).await
}

/// Write logs to `path`. The terminal is in raw mode, so without a file there is no
/// subscriber at all. Returns a warning to print before the UI starts when the file
/// can't be used.
fn init_tracing(path: Option<PathBuf>, level: Level) -> Option<String> {
    let Some(path) = path else {
        return Some("no data directory; file logging disabled".to_string());
    };
    let file = match open_log_file(&path) {
        Ok(file) => file,
        Err(err) => return Some(format!("file logging disabled: {err:#}")),
    };
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(level)
        .with_writer(Mutex::new(file))
        .init();
    info!(path = %path.display(), "logging initialized");
    None
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create log directory {}", dir.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))
}

fn run_autoplay(settings: &Settings, mut rng: ChaCha20Rng) -> Result<()> {
    let mut game = Game::new(settings.rules, &mut rng);
    println!("{}", describe(&game.started_event()));
    let (verdict, events) = Autoplayer::default()
        .solve(&mut game)
        .context("autoplay")?;
    for event in &events {
        if settings.verbose {
            println!("{}", event_log_line(event));
        } else {
            println!("{}", describe(event));
        }
    }
    info!(correct = verdict.correct, weigh_count = verdict.weigh_count, "autoplay done");
    Ok(())
}

async fn run_tui(settings: &Settings, rng: ChaCha20Rng) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = AppState::new(settings, rng);
    let result = event_loop(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;
    terminal.show_cursor()?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    let mut events = EventStream::new();
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(200);

    loop {
        terminal.draw(|f| draw_ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::from_millis(0));

        select! {
            maybe_ev = events.next() => {
                match maybe_ev {
                    Some(Ok(ev)) => {
                        if handle_key_event(ev, app) {
                            break;
                        }
                    }
                    Some(Err(err)) => {
                        return Err(anyhow::Error::new(err).context("read terminal event"));
                    }
                    None => break,
                }
            }
            _ = tokio::time::sleep(timeout) => {
                last_tick = Instant::now();
            }
        }
    }
    info!("exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let args = Args::parse_from([
            "fakecoin",
            "--variant",
            "classic",
            "--weigh-limit",
            "3",
            "--seed",
            "7",
            "--verbose",
            "--log-level",
            "debug",
            "--log-file",
            "/tmp/fakecoin.log",
            "--autoplay",
        ]);
        assert_eq!(args.variant, Some(Variant::Classic));
        assert_eq!(args.weigh_limit, Some(3));
        assert_eq!(args.seed, Some(7));
        assert!(args.verbose);
        assert!(args.autoplay);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/fakecoin.log")));
    }

    #[test]
    fn rejects_unknown_variant() {
        assert!(Args::try_parse_from(["fakecoin", "--variant", "hard"]).is_err());
    }

    #[test]
    fn log_file_under_a_file_is_an_error() {
        let dir = std::env::temp_dir().join(format!("fakecoin-log-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();

        let err = open_log_file(&blocker.join("fakecoin.log")).unwrap_err();
        assert!(format!("{err:#}").contains("create log directory"));

        let ok = dir.join("logs").join("fakecoin.log");
        assert!(open_log_file(&ok).is_ok());
        assert!(ok.exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn seeded_games_repeat() {
        let settings = Settings {
            variant: Variant::Open,
            rules: Variant::Open.rules(),
            verbose: false,
            log_level: Level::INFO,
            seed: Some(42),
        };
        let solve = || {
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            let mut game = Game::new(settings.rules, &mut rng);
            Autoplayer::default().solve(&mut game).unwrap().0
        };
        assert_eq!(solve(), solve());
        assert!(run_autoplay(&settings, ChaCha20Rng::seed_from_u64(42)).is_ok());
    }
}
