//! Engine-specific error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid category: {reason}")]
    InvalidCategory { reason: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
