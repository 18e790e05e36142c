// ABOUTME: Configuration management for the inlay application
// ABOUTME: Handles loading and merging configuration from files and environment variables

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub default_output_dir: Option<PathBuf>,

    /// Missing context variables become render errors when set
    #[serde(default)]
    pub strict_templates: bool,

    /// Default context variables; manifest variables and CLI --var win
    #[serde(default)]
    pub template_vars: HashMap<String, String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_output_dir: None,
            strict_templates: false,
            template_vars: HashMap::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::find_config_file(),
        };

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let mut config: Config = serde_yaml::from_str(&contents)?;
            config.merge_env()?;
            Ok(config)
        } else {
            let mut config = Config::default();
            config.merge_env()?;
            Ok(config)
        }
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> PathBuf {
        let possible_paths = vec![
            PathBuf::from("inlay.yaml"),
            PathBuf::from("inlay.yml"),
            PathBuf::from(".inlay.yaml"),
            PathBuf::from(".inlay.yml"),
        ];

        // Check home directory
        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".inlay").join("config.yaml");
            if home_config.exists() {
                return home_config;
            }
        }

        // Check current directory
        for path in possible_paths {
            if path.exists() {
                return path;
            }
        }

        // Return default path (may not exist)
        PathBuf::from("inlay.yaml")
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) -> Result<()> {
        if let Ok(level) = std::env::var("INLAY_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("INLAY_LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Ok(strict) = std::env::var("INLAY_STRICT") {
            self.strict_templates = strict.parse()?;
        }
        if let Ok(dir) = std::env::var("INLAY_OUTPUT_DIR") {
            self.default_output_dir = Some(PathBuf::from(dir));
        }

        Ok(())
    }

    /// Merge additional variables into default template variables
    pub fn merge_variables(&mut self, vars: HashMap<String, String>) {
        self.template_vars.extend(vars);
    }
}
