use thiserror::Error;

/// Errors that can occur while talking to the remote library.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// Service account key could not be decoded or parsed.
    #[error("Auth error: {0}")]
    Auth(String),

    /// The remote API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, LibraryError>;
