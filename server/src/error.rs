//! Error types for the category store and game setup.
//!
//! Store errors never leave the store's public listing/word APIs; they are
//! logged and degrade to empty results. Setup errors are user-facing and carry
//! the exact message returned to the caller.

use shared::{MSG_EMPTY_CATEGORY, MSG_NOT_ENOUGH_PLAYERS, MSG_NO_CATEGORY};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Category store is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Invalid category name: '{name}'")]
    InvalidName { name: String },

    #[error("Unknown category: '{name}'")]
    UnknownCategory { name: String },

    #[error("Category file lies outside the store: {path}")]
    OutsideStore { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Category file is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    #[error("{}", MSG_NOT_ENOUGH_PLAYERS)]
    NotEnoughPlayers,

    #[error("{}", MSG_NO_CATEGORY)]
    NoCategory,

    #[error("{}", MSG_EMPTY_CATEGORY)]
    EmptyCategory,
}
