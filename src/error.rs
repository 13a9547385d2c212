use std::path::PathBuf;

/// Reasons a drop request is rejected without touching the game.
///
/// A full column is not an error: it is reported as
/// [`DropOutcome::Full`](crate::game::DropOutcome::Full).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is out of range (board has {width} columns)")]
    InvalidColumn { column: usize, width: usize },

    #[error("game is already over")]
    GameOver,
}

/// Errors that can occur when setting up a new game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid board dimensions {width}x{height} (both must be between 1 and 64)")]
    InvalidDimensions { width: usize, height: usize },

    #[error("both players have the same profile '{0}'")]
    DuplicatePlayers(String),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("invalid game setup: {0}")]
    Board(#[from] BoardError),
}
