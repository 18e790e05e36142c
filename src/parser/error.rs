// ABOUTME: Error types for page and manifest parsing
// ABOUTME: Defines specific error types for parser module operations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to convert binding data: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid page format: {0}")]
    InvalidFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Duplicate template id: {id}")]
    DuplicateTemplate { id: String },

    #[error("No container with id '{id}' in page")]
    UnknownContainer { id: String },
}

#[derive(Error, Debug, Clone)]
pub enum ValidationError {
    #[error("Binding '{binding}' references unknown template '{template}'")]
    UnknownTemplate { binding: String, template: String },

    #[error("Binding '{binding}' targets unknown container '{target}'")]
    UnknownTarget { binding: String, target: String },

    #[error("Invalid template syntax in '{id}': {error}")]
    InvalidTemplate { id: String, error: String },

    #[error("Invalid partial '{name}': {error}")]
    InvalidPartial { name: String, error: String },

    #[error("Invalid data for binding '{binding}': {reason}")]
    InvalidBindingData { binding: String, reason: String },

    #[error("Empty manifest: no bindings defined")]
    EmptyManifest,
}

pub type Result<T> = std::result::Result<T, ParserError>;
