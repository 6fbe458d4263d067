//! RailTalk Error Types
//!
//! Errors only surface at file and configuration boundaries. Resolution
//! itself is total and never returns one.

use thiserror::Error;

/// Central error type for RailTalk
#[derive(Error, Debug)]
pub enum RailError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Vocabulary error: {0}")]
    Vocabulary(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for RailTalk operations
pub type RailResult<T> = Result<T, RailError>;
