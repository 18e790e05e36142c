// ABOUTME: Output module for writing hydrated pages
// ABOUTME: Dispatches page content to stdout or file destinations

pub mod error;
pub mod writer;

pub use error::{OutputError, Result};
pub use writer::{FileWriter, FileWriterConfig, OutputDestination, OutputWriter, StdoutWriter};

/// Write content to a destination using the matching built-in writer
pub fn write_output(content: &str, destination: &OutputDestination) -> Result<()> {
    match destination {
        OutputDestination::Stdout => StdoutWriter::new().write(content, destination),
        OutputDestination::File(_) => FileWriter::new().write(content, destination),
    }
}
