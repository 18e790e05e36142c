// ABOUTME: Error types for output handling operations
// ABOUTME: Defines specific error types for writing hydrated pages and reports

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Write error: {message}")]
    WriteError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OutputError>;
