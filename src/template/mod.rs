// ABOUTME: Template engine module for the inlay page hydration tool
// ABOUTME: Provides Handlebars rendering, binding contexts, and built-in helpers

pub mod context;
pub mod engine;
pub mod error;
pub mod helpers;

pub use context::BindingContext;
pub use engine::TemplateEngine;
pub use error::{Result, TemplateError};
