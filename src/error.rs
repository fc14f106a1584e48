//! Error types for board mutation, policy selection and configuration

use std::path::PathBuf;

use crate::board::Pos;

/// Errors raised when mutating the board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("position ({row}, {col}) is outside the 15x15 board")]
    OutOfBounds { row: i32, col: i32 },

    #[error("cell {0} is already occupied")]
    OccupiedCell(Pos),
}

/// Errors raised when selecting or building a difficulty policy or hint level.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("unknown difficulty or hint level: {0:?}")]
    UnknownKey(String),

    #[error("invalid policy: {0}")]
    Invalid(String),
}

/// Errors that can occur when loading engine configuration.
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
}
