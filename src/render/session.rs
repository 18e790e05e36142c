// ABOUTME: Sequential render session over a page and manifest
// ABOUTME: Renders each binding's template with its context and appends into containers

use std::collections::HashMap;
use tracing::{debug, info, warn};

use super::error::{RenderError, Result};
use super::result::{BindingResult, SessionResult};
use crate::parser::{Binding, Manifest, Page};
use crate::template::{BindingContext, TemplateEngine};

/// Runs a manifest's bindings against a page, in manifest order. Bindings
/// share nothing but the page itself; each context is built immediately
/// before its render and dropped after.
pub struct RenderSession {
    engine: TemplateEngine,
    keep_going: bool,
}

impl RenderSession {
    pub fn new() -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
            keep_going: false,
        })
    }

    /// Record failing bindings and continue instead of stopping at the first
    pub fn with_keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    /// Treat missing variables as render errors
    pub fn with_strict_mode(mut self, strict: bool) -> Self {
        self.engine = self.engine.with_strict_mode(strict);
        self
    }

    /// Access the engine, e.g. to register extra helpers before running
    pub fn engine_mut(&mut self) -> &mut TemplateEngine {
        &mut self.engine
    }

    /// Run every binding. Always returns a session result; the caller
    /// decides what a failed status means for the process exit code.
    pub fn run(
        &mut self,
        page: &mut Page,
        manifest: &Manifest,
        overrides: &HashMap<String, String>,
    ) -> Result<SessionResult> {
        let mut session = SessionResult::new(
            manifest
                .page
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "page".to_string()),
        );

        for (name, source) in &manifest.partials {
            self.engine.register_partial(name, source)?;
            debug!("Registered partial '{}'", name);
        }

        info!(
            run_id = %session.run_id,
            "Starting render session with {} bindings",
            manifest.bindings.len()
        );

        let mut abort = false;
        for binding in &manifest.bindings {
            let mut result = BindingResult::new(binding.template.clone(), binding.target.clone());

            if abort {
                result.mark_skipped();
                session.add_binding_result(result);
                continue;
            }

            result.mark_started();
            match self.render_binding(page, manifest, binding, overrides) {
                Ok(rendered_bytes) => {
                    debug!(
                        "Rendered '{}' into '{}' ({} bytes)",
                        binding.template, binding.target, rendered_bytes
                    );
                    result.mark_success(rendered_bytes);
                }
                Err(e) => {
                    warn!("Binding '{}' failed: {}", binding.label(), e);
                    result.mark_failed(e.to_string());
                    if !self.keep_going {
                        abort = true;
                    }
                }
            }
            session.add_binding_result(result);
        }

        session.mark_completed();
        info!(
            run_id = %session.run_id,
            status = %session.status,
            "Render session finished: {}/{} bindings succeeded",
            session.summary.successful_bindings,
            session.summary.total_bindings
        );

        Ok(session)
    }

    fn render_binding(
        &self,
        page: &mut Page,
        manifest: &Manifest,
        binding: &Binding,
        overrides: &HashMap<String, String>,
    ) -> Result<usize> {
        let template = page
            .template(&binding.template)
            .ok_or_else(|| RenderError::UnknownTemplate {
                id: binding.template.clone(),
            })?
            .clone();

        let data = binding.data_json()?;
        let context = BindingContext::new(&data)?
            .with_variables(manifest.variables.clone())
            .with_variables(overrides.clone());

        let markup = self.engine.render(&template.body, &context)?;
        page.append_to_container(&binding.target, &markup)?;

        Ok(markup.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::result::{BindingStatus, SessionStatus};

    const PAGE: &str = r#"
        <div id="occupation-out"></div>
        <div id="news-out"></div>
        <script id="demo" type="text/x-handlebars-template">My name is, {{name}} and I am a, {{occupation}}</script>
        <script id="news" type="text/x-handlebars-template">{{news1}} / {{news2}}</script>
    "#;

    const MANIFEST: &str = r#"
bindings:
  - template: demo
    target: occupation-out
    data:
      name: adrian
      occupation: super hero
  - template: news
    target: news-out
    data:
      news1: CNN
      news2: Fox
"#;

    #[test]
    fn test_session_renders_all_bindings() {
        let mut page = Page::parse(PAGE).unwrap();
        let manifest = Manifest::from_yaml(MANIFEST).unwrap();
        let mut session = RenderSession::new().unwrap();

        let result = session.run(&mut page, &manifest, &HashMap::new()).unwrap();
        assert_eq!(result.status, SessionStatus::Success);
        assert_eq!(result.summary.successful_bindings, 2);

        let html = page.into_html();
        assert!(html.contains(
            r#"<div id="occupation-out">My name is, adrian and I am a, super hero</div>"#
        ));
        assert!(html.contains(r#"<div id="news-out">CNN / Fox</div>"#));
    }

    #[test]
    fn test_overrides_shadow_binding_data() {
        let mut page = Page::parse(PAGE).unwrap();
        let manifest = Manifest::from_yaml(MANIFEST).unwrap();
        let mut session = RenderSession::new().unwrap();

        let mut overrides = HashMap::new();
        overrides.insert("name".to_string(), "mikey".to_string());

        session.run(&mut page, &manifest, &overrides).unwrap();
        assert!(page.html().contains("My name is, mikey"));
    }

    #[test]
    fn test_failure_skips_remaining_bindings() {
        let mut page = Page::parse(PAGE).unwrap();
        let manifest = Manifest::from_yaml(
            "bindings:\n  - template: missing\n    target: occupation-out\n  - template: news\n    target: news-out\n    data:\n      news1: CNN\n      news2: Fox\n",
        )
        .unwrap();
        let mut session = RenderSession::new().unwrap();

        let result = session.run(&mut page, &manifest, &HashMap::new()).unwrap();
        assert_eq!(result.status, SessionStatus::Failed);
        assert_eq!(result.bindings[0].status, BindingStatus::Failed);
        assert_eq!(result.bindings[1].status, BindingStatus::Skipped);
        assert!(!page.html().contains("CNN"));
    }

    #[test]
    fn test_keep_going_renders_remaining_bindings() {
        let mut page = Page::parse(PAGE).unwrap();
        let manifest = Manifest::from_yaml(
            "bindings:\n  - template: missing\n    target: occupation-out\n  - template: news\n    target: news-out\n    data:\n      news1: CNN\n      news2: Fox\n",
        )
        .unwrap();
        let mut session = RenderSession::new().unwrap().with_keep_going(true);

        let result = session.run(&mut page, &manifest, &HashMap::new()).unwrap();
        assert_eq!(result.status, SessionStatus::PartialSuccess);
        assert_eq!(result.summary.failed_bindings, 1);
        assert_eq!(result.summary.successful_bindings, 1);
        assert!(page.html().contains("CNN / Fox"));
    }

    #[test]
    fn test_partials_available_to_bindings() {
        let mut page = Page::parse(
            r#"<div id="dir-out"></div>
               <script id="dir" type="text/x-handlebars-template">{{> dir_entry}}</script>"#,
        )
        .unwrap();
        let manifest = Manifest::from_yaml(
            "partials:\n  dir_entry: \"{{domain}} is {{status}}\"\nbindings:\n  - template: dir\n    target: dir-out\n    data:\n      domain: .org\n      status: active\n",
        )
        .unwrap();
        let mut session = RenderSession::new().unwrap();

        session.run(&mut page, &manifest, &HashMap::new()).unwrap();
        assert!(page.html().contains(r#"<div id="dir-out">.org is active</div>"#));
    }

    #[test]
    fn test_missing_container_fails_binding() {
        let mut page = Page::parse(
            r#"<script id="demo" type="text/x-handlebars-template">hi</script>"#,
        )
        .unwrap();
        let manifest =
            Manifest::from_yaml("bindings:\n  - template: demo\n    target: nowhere\n").unwrap();
        let mut session = RenderSession::new().unwrap();

        let result = session.run(&mut page, &manifest, &HashMap::new()).unwrap();
        assert_eq!(result.status, SessionStatus::Failed);
        assert!(result.bindings[0]
            .error
            .as_deref()
            .unwrap()
            .contains("nowhere"));
    }
}
