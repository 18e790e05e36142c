// ABOUTME: Main library module for the inlay page hydration tool
// ABOUTME: Exports all core modules and provides the public API

pub mod cli;
pub mod output;
pub mod parser;
pub mod render;
pub mod template;

// Re-export commonly used types
pub use cli::{App, Args, Config};
pub use output::{OutputDestination, OutputWriter};
pub use parser::{Binding, InlineTemplate, Manifest, ManifestValidator, Page};
pub use render::{RenderSession, SessionResult, SessionStatus};
pub use template::{BindingContext, TemplateEngine};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
