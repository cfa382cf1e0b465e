//! Error types for match-core.

use thiserror::Error;

/// Result type alias using GameError.
pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid timer option: {0} seconds")]
    InvalidTimer(u32),
}
