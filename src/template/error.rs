// ABOUTME: Error types for template engine operations
// ABOUTME: Defines specific error types for template processing and rendering

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template syntax error: {0}")]
    SyntaxError(String),

    #[error("Invalid binding context: {0}")]
    InvalidContext(String),

    #[error("System error: {0}")]
    SystemError(String),

    #[error("Handlebars error: {0}")]
    HandlebarsError(#[from] handlebars::RenderError),

    #[error("Template definition error: {0}")]
    DefinitionError(#[from] handlebars::TemplateError),
}

pub type Result<T> = std::result::Result<T, TemplateError>;
