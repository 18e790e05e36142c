// ABOUTME: Output writers for stdout and file destinations
// ABOUTME: Handles writing hydrated page content with backup and append options

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::error::{OutputError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputDestination {
    Stdout,
    File(FileWriterConfig),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileWriterConfig {
    pub path: PathBuf,
    #[serde(default = "default_true")]
    pub create_dirs: bool,
    #[serde(default)]
    pub append: bool,
    #[serde(default)]
    pub backup_existing: bool,
}

fn default_true() -> bool {
    true
}

impl OutputDestination {
    pub fn stdout() -> Self {
        Self::Stdout
    }

    pub fn file<P: AsRef<Path>>(path: P) -> Self {
        Self::File(FileWriterConfig {
            path: path.as_ref().to_path_buf(),
            create_dirs: true,
            append: false,
            backup_existing: false,
        })
    }
}

pub trait OutputWriter {
    fn write(&self, content: &str, destination: &OutputDestination) -> Result<()>;
}

#[derive(Default)]
pub struct StdoutWriter;

#[derive(Default)]
pub struct FileWriter;

impl StdoutWriter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputWriter for StdoutWriter {
    fn write(&self, content: &str, _destination: &OutputDestination) -> Result<()> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(content.as_bytes())
            .map_err(OutputError::IoError)?;

        debug!("Output written to stdout ({} chars)", content.len());
        Ok(())
    }
}

impl FileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputWriter for FileWriter {
    fn write(&self, content: &str, destination: &OutputDestination) -> Result<()> {
        let config = match destination {
            OutputDestination::File(config) => config,
            OutputDestination::Stdout => {
                return Err(OutputError::ConfigError {
                    message: "file writer needs a file destination".to_string(),
                })
            }
        };

        if config.create_dirs {
            if let Some(parent) = config.path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).map_err(|e| OutputError::WriteError {
                        message: format!(
                            "Failed to create directory {}: {}",
                            parent.display(),
                            e
                        ),
                    })?;
                }
            }
        }

        if config.backup_existing && config.path.exists() {
            let backup_path = config.path.with_extension("bak");
            fs::copy(&config.path, &backup_path).map_err(|e| OutputError::WriteError {
                message: format!("Failed to backup existing file: {}", e),
            })?;
            debug!("Backed up existing file to {}", backup_path.display());
        }

        if config.append {
            let mut file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&config.path)
                .map_err(|e| OutputError::WriteError {
                    message: format!(
                        "Failed to open file for append {}: {}",
                        config.path.display(),
                        e
                    ),
                })?;
            file.write_all(content.as_bytes())
                .map_err(|e| OutputError::WriteError {
                    message: format!("Failed to append to {}: {}", config.path.display(), e),
                })?;
        } else {
            fs::write(&config.path, content).map_err(|e| OutputError::WriteError {
                message: format!("Failed to write file {}: {}", config.path.display(), e),
            })?;
        }

        info!(
            "Output written to file: {} ({} bytes)",
            config.path.display(),
            content.len()
        );
        Ok(())
    }
}
