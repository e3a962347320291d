use thiserror::Error;

/// Errors that can occur while persisting state documents.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The temp-file rename into place failed.
    #[error("Atomic replace failed: {0}")]
    Replace(String),
}

pub type Result<T> = std::result::Result<T, StateError>;
