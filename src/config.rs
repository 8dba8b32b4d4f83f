//! Session configuration.
//!
//! A [`SessionConfig`] is fixed for the lifetime of a session. It can be
//! built in code, loaded from TOML, or assembled from CLI flags.

use crate::games::checkers::{Evaluation, Player};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Who sits on the other side of the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Mode {
    /// One human against the automated side.
    #[default]
    SinglePlayer,
    /// Two humans taking turns at the same board.
    MultiPlayer,
}

/// How the automated side chooses its moves.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Algorithm {
    /// Depth-limited minimax search.
    #[default]
    Minimax,
    /// Uniformly random legal moves.
    Random,
}

/// Difficulty level offered at startup.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Search two plies deep.
    Easy,
    /// Search four plies deep.
    #[default]
    Medium,
    /// Search seven plies deep.
    Hard,
}

impl Difficulty {
    /// Initial search depth for this difficulty.
    pub fn depth(self) -> u32 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => 7,
        }
    }
}

/// Immutable configuration of one game session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct SessionConfig {
    /// Single- or multi-player.
    mode: Mode,

    /// Side that moves first. In single-player mode this is the human.
    starting_player: Player,

    /// How the automated side picks moves.
    algorithm: Algorithm,

    /// Difficulty, which sets the initial search depth.
    difficulty: Difficulty,

    /// Scoring function used before the endgame.
    primary_evaluation: Evaluation,

    /// Scoring function used once captures dry up.
    endgame_evaluation: Evaluation,

    /// Raise the search depth in the endgame.
    escalate_depth: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: Mode::SinglePlayer,
            starting_player: Player::Black,
            algorithm: Algorithm::Minimax,
            difficulty: Difficulty::Medium,
            primary_evaluation: Evaluation::Positional,
            endgame_evaluation: Evaluation::Endgame,
            escalate_depth: true,
        }
    }
}

impl SessionConfig {
    /// Loads configuration from a TOML file. Missing keys take their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(mode = %config.mode, difficulty = %config.difficulty, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Renders the configuration as TOML.
    #[instrument(skip(self))]
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
    }

    /// Initial search depth derived from the difficulty.
    pub fn initial_depth(&self) -> u32 {
        self.difficulty.depth()
    }

    /// True when one side is played automatically.
    pub fn is_single_player(&self) -> bool {
        self.mode == Mode::SinglePlayer
    }

    /// Side played by the computer in single-player mode.
    pub fn automated_player(&self) -> Option<Player> {
        self.is_single_player()
            .then(|| self.starting_player.opponent())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use strum::IntoEnumIterator;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(*config.mode(), Mode::SinglePlayer);
        assert_eq!(*config.starting_player(), Player::Black);
        assert_eq!(config.initial_depth(), 4);
        assert_eq!(config.automated_player(), Some(Player::White));
        assert!(*config.escalate_depth());
    }

    #[test]
    fn test_difficulty_depths() {
        assert_eq!(Difficulty::Easy.depth(), 2);
        assert_eq!(Difficulty::Medium.depth(), 4);
        assert_eq!(Difficulty::Hard.depth(), 7);
        assert_eq!("HARD".parse::<Difficulty>().ok(), Some(Difficulty::Hard));

        let depths: Vec<u32> = Difficulty::iter().map(Difficulty::depth).collect();
        assert!(depths.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = SessionConfig::from_toml(
            r#"
            mode = "multi-player"
            difficulty = "hard"
            "#,
        )
        .expect("valid config");
        assert_eq!(*config.mode(), Mode::MultiPlayer);
        assert_eq!(config.initial_depth(), 7);
        assert_eq!(*config.algorithm(), Algorithm::Minimax);
        assert_eq!(config.automated_player(), None);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SessionConfig::default()
            .with_algorithm(Algorithm::Random)
            .with_starting_player(Player::White);
        let text = config.to_toml().expect("serializable");
        assert_eq!(SessionConfig::from_toml(&text).expect("parsable"), config);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "escalate_depth = false").expect("write");
        let config = SessionConfig::from_file(file.path()).expect("loads");
        assert!(!*config.escalate_depth());
    }

    #[test]
    fn test_missing_file_reports_error() {
        let err = SessionConfig::from_file("/nonexistent/checkers.toml").unwrap_err();
        assert!(err.message.contains("Failed to read config file"));
    }

    #[test]
    fn test_invalid_toml_reports_error() {
        let err = SessionConfig::from_toml("mode = 3").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }
}
