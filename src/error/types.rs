use thiserror::Error;

use crate::logging::LoggingError;

/// Unified result type for the editor crate.
pub type Result<T> = std::result::Result<T, EditorError>;

/// Errors surfaced at the editor's I/O edges. Editing itself never fails.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("logging failure: {0}")]
    Logging(#[from] LoggingError),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
