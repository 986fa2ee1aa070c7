//! Error types.
//!
//! Setup problems are fatal and come back as `ConfigError`. Content
//! problems come back as `LoadError`; whether a bad record aborts the load
//! or is skipped is decided by [`LoadPolicy`](crate::content::LoadPolicy).
//! Turn transitions never fail: late calls on a finished game are no-ops.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid game setup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("player count must be between 1 and 255, got {0}")]
    InvalidPlayerCount(usize),

    #[error("first player {first} is not a seat in a {player_count}-player game")]
    InvalidFirstPlayer { first: u8, player_count: usize },

    #[error("a bounded game needs at least one round")]
    InvalidRoundLimit,

    #[error("required data file not found: {0}")]
    MissingDataFile(PathBuf),

    #[error("snapshot does not fit this game: {0}")]
    SnapshotMismatch(String),
}

/// Failure while reading content files.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid record #{index} in {path}: {reason}")]
    InvalidRecord {
        path: PathBuf,
        index: usize,
        reason: String,
    },

    #[error("required data file not found: {0}")]
    MissingDataFile(PathBuf),
}

/// Failure encoding or decoding a game snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("snapshot encoding failed: {0}")]
    Encoding(#[from] bincode::Error),
}
