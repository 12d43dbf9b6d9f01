use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CampError {
    #[error("SQLite error: {0}")]
    RusqliteError(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("Config error: {0}")]
    ConfigError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl CampError {
    /// True for errors the caller caused by supplying bad input.
    pub fn is_validation(&self) -> bool {
        matches!(self, CampError::ValidationError(_))
    }
}
