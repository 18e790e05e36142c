// ABOUTME: Render manifest data structures and parsing
// ABOUTME: Defines the YAML plan of bindings, partials, and variables for a page

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::error::{ParserError, Result};

/// The render plan for a page: which templates to render, with what data,
/// into which containers, plus partials shared by all of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Page the manifest was written for; `validate` resolves it relative
    /// to the manifest file when no page is given on the command line
    pub page: Option<PathBuf>,

    #[serde(default)]
    pub partials: IndexMap<String, String>,

    /// Overrides applied to every binding's context (CLI --var wins over these)
    #[serde(default)]
    pub variables: HashMap<String, String>,

    #[serde(default)]
    pub bindings: Vec<Binding>,
}

/// One render job: template id, data context, and target container id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Binding {
    pub template: String,
    pub target: String,
    pub description: Option<String>,

    #[serde(default)]
    pub data: serde_yaml::Value,
}

impl Manifest {
    /// Parse a manifest from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ParserError::IoError)?;
        Self::from_yaml(&content)
    }

    /// Parse a manifest from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let manifest: Manifest = serde_yaml::from_str(content).map_err(ParserError::YamlError)?;
        manifest.validate_structure()?;
        Ok(manifest)
    }

    /// Merge additional variables; existing manifest entries win
    pub fn merge_default_variables(&mut self, vars: HashMap<String, String>) {
        for (key, value) in vars {
            self.variables.entry(key).or_insert(value);
        }
    }

    /// Basic structural checks independent of any page
    fn validate_structure(&self) -> Result<()> {
        for (index, binding) in self.bindings.iter().enumerate() {
            if binding.template.trim().is_empty() {
                return Err(ParserError::MissingField(format!(
                    "bindings[{}].template",
                    index
                )));
            }
            if binding.target.trim().is_empty() {
                return Err(ParserError::MissingField(format!(
                    "bindings[{}].target",
                    index
                )));
            }
        }

        for name in self.partials.keys() {
            if name.trim().is_empty() {
                return Err(ParserError::MissingField("partial name".to_string()));
            }
        }

        Ok(())
    }
}

impl Binding {
    /// The binding's data as JSON, ready for context construction
    pub fn data_json(&self) -> Result<JsonValue> {
        serde_json::to_value(&self.data).map_err(ParserError::JsonError)
    }

    /// A human-readable label for logs and reports
    pub fn label(&self) -> String {
        format!("{} -> {}", self.template, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
page: showcase.html

partials:
  dir_entry: "{{domain}} is {{status}} for {{website}}"

variables:
  site: riotmind

bindings:
  - template: demo
    target: occupation-out
    description: intro card
    data:
      name: adrian
      occupation: super hero

  - template: members
    target: members-out
    data:
      members:
        - member: sally
          age: 29
        - member: tommy
          age: 35
"#;

    #[test]
    fn test_parse_manifest() {
        let manifest = Manifest::from_yaml(SAMPLE).unwrap();

        assert_eq!(manifest.page, Some(PathBuf::from("showcase.html")));
        assert_eq!(manifest.bindings.len(), 2);
        assert_eq!(manifest.partials.len(), 1);
        assert_eq!(manifest.variables.get("site"), Some(&"riotmind".to_string()));

        let first = &manifest.bindings[0];
        assert_eq!(first.template, "demo");
        assert_eq!(first.target, "occupation-out");
        assert_eq!(first.label(), "demo -> occupation-out");
    }

    #[test]
    fn test_binding_data_to_json() {
        let manifest = Manifest::from_yaml(SAMPLE).unwrap();
        let data = manifest.bindings[1].data_json().unwrap();

        assert_eq!(data["members"][1]["age"], 35);
        assert_eq!(data["members"][0]["member"], "sally");
    }

    #[test]
    fn test_binding_without_data() {
        let manifest = Manifest::from_yaml(
            "bindings:\n  - template: t\n    target: out\n",
        )
        .unwrap();

        let data = manifest.bindings[0].data_json().unwrap();
        assert!(data.is_null());
    }

    #[test]
    fn test_empty_template_name_rejected() {
        let result = Manifest::from_yaml("bindings:\n  - template: \"\"\n    target: out\n");
        assert!(matches!(result, Err(ParserError::MissingField(_))));
    }

    #[test]
    fn test_empty_target_rejected() {
        let result = Manifest::from_yaml("bindings:\n  - template: t\n    target: \" \"\n");
        assert!(matches!(result, Err(ParserError::MissingField(_))));
    }

    #[test]
    fn test_manifest_default_variables() {
        let mut manifest = Manifest::from_yaml(SAMPLE).unwrap();
        let mut defaults = HashMap::new();
        defaults.insert("site".to_string(), "other".to_string());
        defaults.insert("extra".to_string(), "x".to_string());

        manifest.merge_default_variables(defaults);

        // Manifest's own entry wins, new keys are filled in
        assert_eq!(manifest.variables.get("site"), Some(&"riotmind".to_string()));
        assert_eq!(manifest.variables.get("extra"), Some(&"x".to_string()));
    }
}
