// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and subcommands for inlay

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inlay")]
#[command(about = "Renders inline Handlebars templates in an HTML page into named containers")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Hydrate a page: render every manifest binding into its container
    Render {
        #[arg(help = "Path to the HTML page")]
        page: PathBuf,

        #[arg(short, long, help = "Path to the render manifest YAML")]
        manifest: PathBuf,

        #[arg(
            short = 'V',
            long = "var",
            help = "Override context variables (key=value)"
        )]
        vars: Vec<String>,

        #[arg(short, long, help = "Write the hydrated page here instead of stdout")]
        output: Option<PathBuf>,

        #[arg(long, help = "Continue past failing bindings")]
        keep_going: bool,

        #[arg(long, help = "Write a JSON session report to this path")]
        report: Option<PathBuf>,
    },

    /// Validate a manifest against its page without rendering
    Validate {
        #[arg(help = "Path to the render manifest YAML")]
        manifest: PathBuf,

        #[arg(long, help = "Page to validate against (defaults to the manifest's page field)")]
        page: Option<PathBuf>,
    },

    /// List the inline templates found in a page
    List {
        #[arg(help = "Path to the HTML page")]
        page: PathBuf,
    },

    /// Create a starter page and manifest pair
    Init {
        #[arg(help = "Name for the new page")]
        name: String,

        #[arg(short, long, help = "Output directory", default_value = ".")]
        output_dir: PathBuf,

        #[arg(long, help = "Starter kind", default_value = "basic")]
        template: String,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse variables from key=value format
    pub fn parse_variables(
        vars: &[String],
    ) -> anyhow::Result<std::collections::HashMap<String, String>> {
        let mut variables = std::collections::HashMap::new();

        for var in vars {
            if let Some((key, value)) = var.split_once('=') {
                variables.insert(key.to_string(), value.to_string());
            } else {
                return Err(anyhow::anyhow!(
                    "Invalid variable format '{}'. Expected 'key=value'",
                    var
                ));
            }
        }

        Ok(variables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variables() {
        let vars = vec![
            "name=adrian".to_string(),
            "occupation=super hero".to_string(),
        ];

        let parsed = Args::parse_variables(&vars).unwrap();

        assert_eq!(parsed.get("name"), Some(&"adrian".to_string()));
        assert_eq!(parsed.get("occupation"), Some(&"super hero".to_string()));
    }

    #[test]
    fn test_parse_variables_invalid() {
        let vars = vec!["invalid_format".to_string()];
        let result = Args::parse_variables(&vars);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_structure() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
