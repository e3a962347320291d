use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Config file/env could not be read, parsed, or validated.
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
