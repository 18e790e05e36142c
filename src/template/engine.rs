// ABOUTME: Main template engine implementation using Handlebars
// ABOUTME: Provides template rendering, partial registration, and syntax validation

use handlebars::Handlebars;
use serde_json::Value as JsonValue;

use super::context::BindingContext;
use super::error::{Result, TemplateError};
use super::helpers;

#[derive(Clone)]
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with all built-in helpers
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Configure handlebars. HTML escaping stays on: the output is a web
        // page, and templates opt out per expression with {{{ }}}.
        handlebars.set_strict_mode(false);
        handlebars.set_dev_mode(false);

        // Register built-in helpers
        helpers::register_helpers(&mut handlebars)
            .map_err(|e| TemplateError::SystemError(e.to_string()))?;

        Ok(Self { handlebars })
    }

    /// Toggle strict mode (missing variables become render errors)
    pub fn with_strict_mode(mut self, strict: bool) -> Self {
        self.handlebars.set_strict_mode(strict);
        self
    }

    /// Render a template string with a JSON context
    pub fn render_template(&self, template: &str, context: &JsonValue) -> Result<String> {
        self.handlebars
            .render_template(template, context)
            .map_err(TemplateError::HandlebarsError)
    }

    /// Render a template string with a binding context
    pub fn render(&self, template: &str, context: &BindingContext) -> Result<String> {
        let json_context = context.to_json();
        self.render_template(template, &json_context)
    }

    /// Register a named partial available to subsequent renders
    pub fn register_partial(&mut self, name: &str, source: &str) -> Result<()> {
        self.handlebars
            .register_partial(name, source)
            .map_err(TemplateError::DefinitionError)
    }

    /// Register a custom helper function
    pub fn register_helper<F>(&mut self, name: &str, helper: F)
    where
        F: handlebars::HelperDef + Send + Sync + 'static,
    {
        self.handlebars.register_helper(name, Box::new(helper));
    }

    /// Validate template syntax without rendering
    pub fn validate_template(&self, template: &str) -> Result<()> {
        match handlebars::Template::compile(template) {
            Ok(_) => Ok(()),
            Err(e) => Err(TemplateError::SyntaxError(e.to_string())),
        }
    }

    /// Check if a string contains template expressions
    pub fn has_templates(&self, text: &str) -> bool {
        text.contains("{{") && text.contains("}}")
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new().expect("Failed to create default template engine")
    }
}
