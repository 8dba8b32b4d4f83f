//! Command-line interface for strictly_checkers.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use strictly_checkers::{
    Algorithm, ConfigError, Difficulty, Input, Mode, Player, Position, SessionConfig,
};
use tracing::instrument;

/// Strictly Checkers - two-player checkers in the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_checkers")]
#[command(about = "Checkers against the computer or a friend", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game in the terminal
    Play(PlayArgs),

    /// Print the default session configuration as TOML
    DefaultConfig,
}

/// Options for a game. Flags override values from the config file.
#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Path to a TOML session config
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// AI difficulty (easy, medium, hard)
    #[arg(short, long)]
    pub difficulty: Option<Difficulty>,

    /// single-player or multi-player
    #[arg(short, long)]
    pub mode: Option<Mode>,

    /// minimax or random
    #[arg(short, long)]
    pub algorithm: Option<Algorithm>,

    /// Side that moves first (the human in single-player mode)
    #[arg(long)]
    pub starting_player: Option<Player>,

    /// Keep the search depth fixed in the endgame
    #[arg(long)]
    pub no_escalation: bool,

    /// Seed for the random mover
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the board history as JSON when the game ends
    #[arg(long)]
    pub history_out: Option<PathBuf>,
}

impl PlayArgs {
    /// Builds the session config from the file (if any) and the flags.
    #[instrument(skip(self))]
    pub fn session_config(&self) -> Result<SessionConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::from_file(path)?,
            None => SessionConfig::default(),
        };
        if let Some(difficulty) = self.difficulty {
            config = config.with_difficulty(difficulty);
        }
        if let Some(mode) = self.mode {
            config = config.with_mode(mode);
        }
        if let Some(algorithm) = self.algorithm {
            config = config.with_algorithm(algorithm);
        }
        if let Some(player) = self.starting_player {
            config = config.with_starting_player(player);
        }
        if self.no_escalation {
            config = config.with_escalate_depth(false);
        }
        Ok(config)
    }
}

/// Parses a line typed by the player: `row col`, or `q` to quit.
pub fn parse_input(line: &str) -> Option<Input> {
    let line = line.trim();
    if matches!(line, "q" | "quit" | "exit") {
        return Some(Input::Quit);
    }
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Position::checked(row, col).map(Input::Click)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_click() {
        assert_eq!(parse_input("5 2"), Some(Input::Click(Position::new(5, 2))));
        assert_eq!(parse_input(" 4,3 \n"), Some(Input::Click(Position::new(4, 3))));
    }

    #[test]
    fn test_parse_quit() {
        assert_eq!(parse_input("q"), Some(Input::Quit));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_input("8 0"), None);
        assert_eq!(parse_input("a b"), None);
        assert_eq!(parse_input("1 2 3"), None);
        assert_eq!(parse_input(""), None);
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "strictly_checkers",
            "play",
            "--difficulty",
            "hard",
            "--mode",
            "multi-player",
            "--no-escalation",
        ]);
        let Command::Play(args) = cli.command else {
            panic!("expected play");
        };
        let config = args.session_config().expect("config");
        assert_eq!(config.initial_depth(), 7);
        assert_eq!(*config.mode(), Mode::MultiPlayer);
        assert!(!*config.escalate_depth());
    }
}
