// ABOUTME: Command implementations for the inlay CLI
// ABOUTME: Handles execution of render, validate, list, and init commands

use anyhow::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

use super::config::Config;
use crate::output::{write_output, OutputDestination};
use crate::parser::{Manifest, ManifestValidator, Page};
use crate::render::{RenderSession, SessionStatus};
use crate::template::TemplateEngine;

/// Hydrate a page from a manifest and write the result
pub fn render_page(
    page_path: PathBuf,
    manifest_path: PathBuf,
    variables: HashMap<String, String>,
    output: Option<PathBuf>,
    keep_going: bool,
    report: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    info!("Hydrating page: {}", page_path.display());

    let mut manifest = Manifest::from_file(&manifest_path)?;
    manifest.merge_default_variables(config.template_vars.clone());
    if manifest.page.is_none() {
        manifest.page = Some(page_path.clone());
    }

    let mut page = Page::from_file(&page_path)?;
    info!(
        "Loaded page with {} inline templates, manifest with {} bindings",
        page.templates().count(),
        manifest.bindings.len()
    );

    let mut session = RenderSession::new()?
        .with_keep_going(keep_going)
        .with_strict_mode(config.strict_templates);

    let result = session.run(&mut page, &manifest, &variables)?;

    let destination = match output {
        Some(path) => OutputDestination::file(resolve_output_path(path, config)),
        None => OutputDestination::stdout(),
    };
    write_output(&page.into_html(), &destination)?;

    if let Some(report_path) = report {
        let json = serde_json::to_string_pretty(&result)?;
        std::fs::write(&report_path, json)?;
        info!("Session report written to: {}", report_path.display());
    }

    match result.status {
        SessionStatus::Success => Ok(()),
        status => Err(anyhow::anyhow!(
            "render session finished with status {}: {} of {} bindings failed",
            status,
            result.summary.failed_bindings,
            result.summary.total_bindings
        )),
    }
}

/// Validate a manifest against its page without rendering
pub fn validate_manifest(
    manifest_path: PathBuf,
    page_override: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    info!("Validating manifest: {}", manifest_path.display());

    let manifest = Manifest::from_file(&manifest_path)?;
    let page_path = match page_override {
        Some(path) => path,
        None => {
            let declared = manifest.page.clone().ok_or_else(|| {
                anyhow::anyhow!("manifest has no page field; pass one with --page")
            })?;
            if declared.is_relative() {
                manifest_path
                    .parent()
                    .unwrap_or_else(|| Path::new("."))
                    .join(declared)
            } else {
                declared
            }
        }
    };

    let page = Page::from_file(&page_path)?;
    let engine = TemplateEngine::new()?.with_strict_mode(config.strict_templates);
    let report = ManifestValidator::new().validate(&manifest, &page, &engine)?;

    for warning in &report.warnings {
        println!("  warning: {}", warning);
    }

    if report.is_valid {
        println!(
            "✓ Manifest '{}' is valid for page '{}'",
            manifest_path.display(),
            page_path.display()
        );
        println!("  Bindings: {}", manifest.bindings.len());
        println!("  Partials: {}", manifest.partials.len());
        Ok(())
    } else {
        for error in &report.errors {
            println!("  error: {}", error);
        }
        Err(anyhow::anyhow!(
            "validation failed with {} error(s)",
            report.errors.len()
        ))
    }
}

/// List the inline templates found in a page
pub fn list_templates(page_path: PathBuf) -> Result<()> {
    let page = Page::from_file(&page_path)?;

    println!("Templates in {}:", page_path.display());
    if page.templates().count() == 0 {
        println!("  (none)");
    }
    for template in page.templates() {
        println!("  {} ({} bytes)", template.id, template.body.trim().len());
    }

    Ok(())
}

/// Create a starter page and manifest pair
pub fn init_page(name: String, output_dir: PathBuf, template: String) -> Result<()> {
    info!("Initializing page '{}' in {}", name, output_dir.display());

    if !output_dir.exists() {
        std::fs::create_dir_all(&output_dir)?;
    }

    let page_file = output_dir.join(format!("{}.html", name));
    let manifest_file = output_dir.join(format!("{}.yaml", name));

    for file in [&page_file, &manifest_file] {
        if file.exists() {
            return Err(anyhow::anyhow!("File already exists: {}", file.display()));
        }
    }

    let (page_content, manifest_content) = match template.as_str() {
        "basic" => (generate_basic_page(&name), generate_basic_manifest(&name)),
        "showcase" => (
            generate_showcase_page(&name),
            generate_showcase_manifest(&name),
        ),
        other => return Err(anyhow::anyhow!("Unknown starter kind: {}", other)),
    };

    std::fs::write(&page_file, page_content)?;
    std::fs::write(&manifest_file, manifest_content)?;

    info!(
        "Created {} and {}",
        page_file.display(),
        manifest_file.display()
    );

    Ok(())
}

fn resolve_output_path(path: PathBuf, config: &Config) -> PathBuf {
    match (&config.default_output_dir, path.is_relative()) {
        (Some(dir), true) => dir.join(path),
        _ => path,
    }
}

fn generate_basic_page(name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <title>{}</title>
</head>
<body>
  <div id="greeting-out"></div>

  <script id="greeting" type="text/x-handlebars-template">
    <p>Hello, {{{{name}}}}! Welcome to {{{{site}}}}.</p>
  </script>
</body>
</html>
"#,
        name
    )
}

fn generate_basic_manifest(name: &str) -> String {
    format!(
        r#"page: {}.html

bindings:
  - template: greeting
    target: greeting-out
    data:
      name: adrian
      site: {}
"#,
        name, name
    )
}

fn generate_showcase_page(name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <title>{}</title>
</head>
<body>
  <div id="greeting-out"></div>
  <div id="members-out"></div>
  <div id="dir-out"></div>

  <script id="greeting" type="text/x-handlebars-template">
    <p>Hello, {{{{name}}}}! Welcome to {{{{site}}}}.</p>
  </script>

  <script id="members" type="text/x-handlebars-template">
    <ul>
      {{{{#each members}}}}
      <li>{{{{member}}}}: {{{{membership age}}}}</li>
      {{{{/each}}}}
    </ul>
  </script>

  <script id="directory" type="text/x-handlebars-template">
    <p>{{{{> dir_entry}}}}</p>
  </script>
</body>
</html>
"#,
        name
    )
}

fn generate_showcase_manifest(name: &str) -> String {
    format!(
        r#"page: {}.html

partials:
  dir_entry: "{{{{domain}}}} is {{{{status}}}} for {{{{website}}}}"

bindings:
  - template: greeting
    target: greeting-out
    data:
      name: adrian
      site: {}

  - template: members
    target: members-out
    data:
      members:
        - member: sally
          age: 29
        - member: tommy
          age: 35
        - member: billy
          age: 38

  - template: directory
    target: dir-out
    data:
      domain: .org
      status: active
      website: {}.org
"#,
        name, name, name
    )
}
