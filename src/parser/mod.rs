// ABOUTME: Parser module for pages and render manifests
// ABOUTME: Exports HTML page handling, manifest loading, and validation

pub mod error;
pub mod manifest;
pub mod page;
pub mod validation;

pub use error::{ParserError, Result, ValidationError};
pub use manifest::{Binding, Manifest};
pub use page::{InlineTemplate, Page};
pub use validation::{ManifestValidator, ValidationReport};
