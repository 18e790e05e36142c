// ABOUTME: Binding context management for template rendering
// ABOUTME: Merges a binding's data object with layered variable overrides

use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;

use super::error::{Result, TemplateError};

/// The data supplied to a single render: the binding's own data object plus
/// string variables overlaid on top (config, manifest, then CLI, later wins).
#[derive(Debug, Clone, Default)]
pub struct BindingContext {
    data: Map<String, JsonValue>,
    variables: HashMap<String, String>,
}

impl BindingContext {
    /// Create a context from a binding's data value. Accepts an object or
    /// null (a binding may carry no data at all).
    pub fn new(data: &JsonValue) -> Result<Self> {
        let data = match data {
            JsonValue::Object(map) => map.clone(),
            JsonValue::Null => Map::new(),
            other => {
                return Err(TemplateError::InvalidContext(format!(
                    "binding data must be a mapping, got {}",
                    json_type_name(other)
                )))
            }
        };

        Ok(Self {
            data,
            variables: HashMap::new(),
        })
    }

    /// Overlay a batch of variables, consuming self for builder-style use
    pub fn with_variables(mut self, vars: HashMap<String, String>) -> Self {
        self.variables.extend(vars);
        self
    }

    /// Add or update a single variable
    pub fn set_variable(&mut self, key: String, value: String) {
        self.variables.insert(key, value);
    }

    /// Get a variable value
    pub fn get_variable(&self, key: &str) -> Option<&String> {
        self.variables.get(key)
    }

    /// Add multiple variables
    pub fn extend_variables(&mut self, vars: HashMap<String, String>) {
        self.variables.extend(vars);
    }

    /// Produce the merged JSON context for rendering. Variables shadow data
    /// keys of the same name.
    pub fn to_json(&self) -> JsonValue {
        let mut merged = self.data.clone();
        for (key, value) in &self.variables {
            merged.insert(key.clone(), JsonValue::String(value.clone()));
        }
        JsonValue::Object(merged)
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "a mapping",
    }
}
