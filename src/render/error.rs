// ABOUTME: Error types for render session operations
// ABOUTME: Wraps parser and template failures with binding-level context

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("No template with id '{id}' in page")]
    UnknownTemplate { id: String },

    #[error(transparent)]
    Parser(#[from] crate::parser::ParserError),

    #[error(transparent)]
    Template(#[from] crate::template::TemplateError),
}

pub type Result<T> = std::result::Result<T, RenderError>;
