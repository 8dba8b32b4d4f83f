//! Strictly Checkers - terminal front end
//!
//! Renders session snapshots as text and reads clicks from stdin.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, PlayArgs};
use strictly_checkers::{
    Board, CheckersOracle, GameEvent, GameSession, Input, Orchestrator, SessionConfig,
    TurnError, render_snapshot,
};
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Play(args) => play(args).await,
        Command::DefaultConfig => {
            print!("{}", SessionConfig::default().to_toml()?);
            Ok(())
        }
    }
}

/// Play one game in the terminal.
#[instrument(skip_all)]
async fn play(args: PlayArgs) -> Result<()> {
    let config = args.session_config()?;
    info!(?config, "Starting game");

    let oracle = match args.seed {
        Some(seed) => CheckersOracle::with_seed(seed),
        None => CheckersOracle::new(),
    };
    let session = GameSession::new(oracle, config);

    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut orchestrator = Orchestrator::new(input_rx, event_tx);

    spawn_stdin_reader(input_tx);
    let game = tokio::spawn(async move { orchestrator.run(session).await });

    println!("Enter moves as `row col` (for example `5 2`), or `q` to quit.");
    while let Some(event) = event_rx.recv().await {
        print_event(&event);
    }

    let session = game.await??;

    if let Some(path) = args.history_out {
        let json = serde_json::to_string_pretty(session.history())?;
        std::fs::write(&path, json)
            .with_context(|| format!("writing history to {}", path.display()))?;
        info!(path = %path.display(), plies = session.history().len() - 1, "History exported");
    }
    Ok(())
}

/// Reads stdin on a dedicated thread so a pending read never holds up shutdown.
fn spawn_stdin_reader(input_tx: mpsc::UnboundedSender<Input>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else {
                break;
            };
            match cli::parse_input(&line) {
                Some(input) => {
                    if input_tx.send(input).is_err() {
                        break;
                    }
                }
                None => eprintln!("Type `row col` or `q`"),
            }
        }
    });
}

fn print_event(event: &GameEvent<Board>) {
    match event {
        GameEvent::StateChanged(snapshot) => println!("\n{}", render_snapshot(snapshot)),
        GameEvent::AutomatedThinking => println!("Computer is thinking..."),
        GameEvent::Rejected(TurnError::InvalidSelection { .. }) => println!("Invalid position"),
        GameEvent::Rejected(e) => {
            warn!(error = %e, "Rejected input");
            println!("invalid move");
        }
        GameEvent::Notified(notification) => println!("{notification}"),
        GameEvent::GameOver(outcome) => println!("Game over: {outcome}"),
    }
}
