//! BLOCKFALL - headless driver
//!
//! Reads one action per line from stdin, plays them through a session, then
//! prints the final board and statistics.

use anyhow::{Context, Result};
use blockfall::session::{self, EndReason, SessionConfig};
use blockfall::settings::Settings;
use blockfall::{Difficulty, GameAction, GameState, GameStatistics};
use clap::Parser;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// How long shutdown waits for the blocking stdin reader
const SHUTDOWN_GRACE: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Difficulty: easy, normal, hard or extreme. Defaults to the saved preference.
    #[arg(short, long)]
    difficulty: Option<Difficulty>,
    /// Piece seed, so a run can be replayed with the same pieces.
    #[arg(short, long)]
    seed: Option<u64>,
    /// Milliseconds per engine tick.
    #[arg(short, long)]
    tick_ms: Option<u64>,
    /// Keep ticking with no input after stdin ends, until the game is over.
    #[arg(long)]
    play_out: bool,
    /// Print the final statistics as JSON instead of text.
    #[arg(long)]
    json: bool,
    /// Do not record the score or write settings.
    #[arg(long)]
    no_save: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Generate session ID for this run
    let session_id: u32 = rand::random();

    let log_dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&log_dir);
    let log_file = format!("{:08x}.log", session_id);

    // Setup tracing to log file
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("blockfall=debug".parse()?),
        )
        .with_ansi(false)
        .init();

    info!(
        "BLOCKFALL starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let mut settings = Settings::load();

    let difficulty = args.difficulty.unwrap_or(settings.gameplay.difficulty);
    let seed = args
        .seed
        .or(settings.gameplay.seed)
        .unwrap_or_else(rand::random);
    let tick_ms = args.tick_ms.unwrap_or(settings.gameplay.tick_ms).max(1);
    info!(%difficulty, seed, tick_ms, "new game");

    let config = SessionConfig {
        tick_interval: Duration::from_millis(tick_ms),
        stop_when_idle: !args.play_out,
    };

    let runtime = tokio::runtime::Runtime::new().context("failed to create async runtime")?;
    let outcome = runtime.block_on(play(GameState::new(difficulty, seed), config));
    // stdin is read on a thread that cannot be cancelled
    runtime.shutdown_timeout(SHUTDOWN_GRACE);

    let stats = GameStatistics::from_state(&outcome.state, outcome.elapsed);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).context("failed to encode statistics")?
        );
    } else {
        print!("{}", outcome.state.board());
        println!();
        match outcome.reason {
            EndReason::GameOver => println!("Game over!"),
            EndReason::Quit => println!("Quit."),
            EndReason::InputClosed => println!("Out of input."),
        }
        println!("{}", stats);
        println!(
            "Time: {} | {:.1} ticks/s | {:.1} points/piece",
            stats.format_time(),
            stats.ticks_per_second(),
            stats.score_per_piece()
        );
    }

    if args.no_save {
        return Ok(());
    }

    if let Some(rank) = settings.record_score(&stats) {
        info!(score = stats.final_score, rank, "new high score entry");
        if !args.json {
            println!("High score! #{} ({})", rank, difficulty);
        }
    }
    if let Some(best) = settings.top_score().filter(|_| !args.json) {
        println!("Best: {}", best);
    }

    if let Err(e) = settings.save() {
        warn!("could not save settings: {:#}", e);
        eprintln!("Warning: Could not save settings: {:#}", e);
    }

    Ok(())
}

/// Wire stdin to the session and log every snapshot change
async fn play(initial: GameState, config: SessionConfig) -> session::SessionOutcome {
    let (action_tx, action_rx) = mpsc::channel(64);
    let (snapshot_tx, mut snapshot_rx) = watch::channel(initial.clone());

    tokio::spawn(read_actions(action_tx));

    tokio::spawn(async move {
        let mut last_score = 0;
        while snapshot_rx.changed().await.is_ok() {
            let state = snapshot_rx.borrow_and_update().clone();
            if let Some(clear) = state.last_clear() {
                debug!(lines = clear.lines, points = clear.points, "rows cleared");
            }
            if state.score() != last_score {
                last_score = state.score();
                debug!(score = last_score, lines = state.lines_cleared(), "score changed");
            }
        }
    });

    session::run(initial, config, action_rx, snapshot_tx).await
}

/// Forward parsed stdin lines until EOF or the session stops listening
async fn read_actions(tx: mpsc::Sender<GameAction>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match line.parse::<GameAction>() {
                Ok(action) => {
                    if tx.send(action).await.is_err() {
                        break;
                    }
                }
                Err(e) => warn!("skipping input: {}", e),
            },
            Ok(None) => {
                debug!("stdin closed");
                break;
            }
            Err(e) => {
                warn!("stdin read failed: {}", e);
                break;
            }
        }
    }
}
