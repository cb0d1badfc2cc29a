//! Error types for the drawing services.

use omikuji_core::CoreError;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while drawing a fortune.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No omikuji type with this id exists.
    #[error("unknown omikuji type: {0}")]
    UnknownOmikujiType(String),

    /// A core lookup or validation failed.
    #[error("{0}")]
    Core(#[from] CoreError),
}
