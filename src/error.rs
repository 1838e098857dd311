//! Error types shared across the crate

use thiserror::Error;

/// Failure talking to a key-value store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage is not available: {0}")]
    Unavailable(String),
    #[error("could not read key `{key}`: {reason}")]
    Read { key: String, reason: String },
    #[error("could not write key `{key}`: {reason}")]
    Write { key: String, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Rejected cell address on a mutation
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("row {row} is not a player row (players: {players})")]
    RowOutOfRange { row: usize, players: usize },
    #[error("column {col} is not a round column (rounds: {rounds})")]
    ColumnOutOfRange { col: usize, rounds: usize },
}

/// Stored session that cannot be adopted
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("session payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("session payload has no rows")]
    EmptyMatrix,
    #[error("session payload has only {0} column(s)")]
    TooFewColumns(usize),
    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
}
