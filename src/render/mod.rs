// ABOUTME: Render session module: runs a manifest's bindings against a page
// ABOUTME: Exports the sequential session runner and its result types

pub mod error;
pub mod result;
pub mod session;

pub use error::{RenderError, Result};
pub use result::{BindingResult, BindingStatus, SessionResult, SessionStatus, SessionSummary};
pub use session::RenderSession;
