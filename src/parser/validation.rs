// ABOUTME: Manifest validation against a page and the template engine
// ABOUTME: Cross-checks bindings, template syntax, and partials without rendering

use serde_json::Value as JsonValue;

use super::error::{Result, ValidationError};
use super::manifest::Manifest;
use super::page::Page;
use crate::template::TemplateEngine;

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<String>,
    pub is_valid: bool,
}

impl ValidationReport {
    fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            is_valid: false,
        }
    }
}

#[derive(Default)]
pub struct ManifestValidator;

impl ManifestValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a manifest against the page it is meant to hydrate
    pub fn validate(
        &self,
        manifest: &Manifest,
        page: &Page,
        engine: &TemplateEngine,
    ) -> Result<ValidationReport> {
        let mut report = ValidationReport::new();

        self.check_partials(manifest, engine, &mut report);
        self.check_bindings(manifest, page, engine, &mut report);
        self.check_unused_templates(manifest, page, &mut report);

        if manifest.bindings.is_empty() {
            report.errors.push(ValidationError::EmptyManifest);
        }

        report.is_valid = report.errors.is_empty();
        Ok(report)
    }

    fn check_partials(
        &self,
        manifest: &Manifest,
        engine: &TemplateEngine,
        report: &mut ValidationReport,
    ) {
        for (name, source) in &manifest.partials {
            if let Err(e) = engine.validate_template(source) {
                report.errors.push(ValidationError::InvalidPartial {
                    name: name.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    fn check_bindings(
        &self,
        manifest: &Manifest,
        page: &Page,
        engine: &TemplateEngine,
        report: &mut ValidationReport,
    ) {
        for binding in &manifest.bindings {
            let label = binding.label();

            match page.template(&binding.template) {
                Some(template) => {
                    if let Err(e) = engine.validate_template(&template.body) {
                        report.errors.push(ValidationError::InvalidTemplate {
                            id: binding.template.clone(),
                            error: e.to_string(),
                        });
                    }
                }
                None => {
                    report.errors.push(ValidationError::UnknownTemplate {
                        binding: label.clone(),
                        template: binding.template.clone(),
                    });
                }
            }

            if !page.has_container(&binding.target) {
                report.errors.push(ValidationError::UnknownTarget {
                    binding: label.clone(),
                    target: binding.target.clone(),
                });
            }

            match binding.data_json() {
                Ok(JsonValue::Object(_)) | Ok(JsonValue::Null) => {}
                Ok(_) => {
                    report.errors.push(ValidationError::InvalidBindingData {
                        binding: label,
                        reason: "data must be a mapping".to_string(),
                    });
                }
                Err(e) => {
                    report.errors.push(ValidationError::InvalidBindingData {
                        binding: label,
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    fn check_unused_templates(
        &self,
        manifest: &Manifest,
        page: &Page,
        report: &mut ValidationReport,
    ) {
        for id in page.template_ids() {
            if !manifest.bindings.iter().any(|b| b.template == id) {
                report
                    .warnings
                    .push(format!("template '{}' is never rendered", id));
            }
        }
    }
}
