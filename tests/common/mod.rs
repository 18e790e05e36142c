// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides shared functionality for building test pages and manifests

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestPageBuilder {
    title: String,
    containers: Vec<String>,
    templates: Vec<(String, String)>,
}

impl TestPageBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            containers: Vec::new(),
            templates: Vec::new(),
        }
    }

    pub fn with_container(mut self, id: &str) -> Self {
        self.containers.push(id.to_string());
        self
    }

    pub fn with_template(mut self, id: &str, body: &str) -> Self {
        self.templates.push((id.to_string(), body.to_string()));
        self
    }

    pub fn generate_html(&self) -> String {
        let mut html = format!(
            "<!DOCTYPE html>\n<html>\n<head><title>{}</title></head>\n<body>\n",
            self.title
        );

        for id in &self.containers {
            html.push_str(&format!("  <div id=\"{}\"></div>\n", id));
        }

        for (id, body) in &self.templates {
            html.push_str(&format!(
                "  <script id=\"{}\" type=\"text/x-handlebars-template\">{}</script>\n",
                id, body
            ));
        }

        html.push_str("</body>\n</html>\n");
        html
    }

    pub fn write_to_file(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::write(path, self.generate_html())?;
        Ok(())
    }
}

pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn page_file(&self, name: &str) -> PathBuf {
        self.path().join(format!("{}.html", name))
    }

    pub fn manifest_file(&self, name: &str) -> PathBuf {
        self.path().join(format!("{}.yaml", name))
    }

    pub fn output_file(&self, name: &str) -> PathBuf {
        self.path().join(format!("{}_hydrated.html", name))
    }

    pub fn create_page(&self, name: &str, builder: &TestPageBuilder) -> PathBuf {
        let page_file = self.page_file(name);
        builder
            .write_to_file(&page_file)
            .expect("Failed to write page file");
        page_file
    }

    pub fn create_manifest(&self, name: &str, yaml: &str) -> PathBuf {
        let manifest_file = self.manifest_file(name);
        std::fs::write(&manifest_file, yaml).expect("Failed to write manifest file");
        manifest_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_builder() {
        let builder = TestPageBuilder::new("test")
            .with_container("out")
            .with_template("greet", "Hello {{name}}");

        let html = builder.generate_html();
        assert!(html.contains("<div id=\"out\"></div>"));
        assert!(html.contains("type=\"text/x-handlebars-template\""));
        assert!(html.contains("Hello {{name}}"));
    }

    #[test]
    fn test_environment_setup() {
        let env = TestEnvironment::new();
        assert!(env.path().exists());
        assert!(env.page_file("x").to_string_lossy().ends_with("x.html"));
    }
}
