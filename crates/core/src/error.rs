//! Error types for configuration and durable storage.
//!
//! Gameplay itself has no error path: rejected input is a no-op and a
//! collision is an ordinary transition to `GameState::GameOver`.

use thiserror::Error;

/// Invalid startup configuration. Fatal: no session is started.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid dimensions must be positive (got {width}x{height})")]
    InvalidDimensions { width: i16, height: i16 },
    #[error("grid {width}x{height} is too small, need at least {min_width}x{min_height}")]
    GridTooSmall {
        width: i16,
        height: i16,
        min_width: i16,
        min_height: i16,
    },
    #[error("grid {width}x{height} is too large, at most {max_width}x{max_height}")]
    GridTooLarge {
        width: i16,
        height: i16,
        max_width: i16,
        max_height: i16,
    },
    #[error("grid does not fit in the coordinate range (offset {x},{y}, size {width}x{height})")]
    OutOfRange {
        x: i16,
        y: i16,
        width: i16,
        height: i16,
    },
    #[error("cell size must be non-zero")]
    ZeroCellSize,
    #[error("{0} must be non-zero")]
    ZeroValue(&'static str),
}

/// A durable write could not complete.
///
/// Logged by the caller; the session continues.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("encoding error: {0}")]
    Encoding(String),
}
