// ABOUTME: HTML page handling: inline template extraction and container injection
// ABOUTME: Finds text/x-handlebars-template script blocks and appends markup into containers

use indexmap::IndexMap;
use regex::Regex;
use std::ops::Range;
use std::path::Path;

use super::error::{ParserError, Result};

const TEMPLATE_MIME: &str = "text/x-handlebars-template";

/// One template source block lifted out of the page
#[derive(Debug, Clone)]
pub struct InlineTemplate {
    pub id: String,
    pub body: String,
}

/// An HTML document with named inline templates and output containers.
/// The source text is preserved byte-for-byte except for appends into
/// targeted containers.
#[derive(Debug, Clone)]
pub struct Page {
    html: String,
    templates: IndexMap<String, InlineTemplate>,
}

impl Page {
    /// Load and parse a page from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ParserError::IoError)?;
        Self::parse(&content)
    }

    /// Parse a page from an HTML string, extracting every template block
    pub fn parse(html: &str) -> Result<Self> {
        let mut templates = IndexMap::new();

        for (attrs, body) in script_blocks(html) {
            let script_type = attribute(&attrs, "type");
            if script_type.as_deref().map(str::trim) != Some(TEMPLATE_MIME) {
                continue;
            }

            let id = attribute(&attrs, "id").ok_or_else(|| {
                ParserError::MissingField("template script is missing an id attribute".to_string())
            })?;

            if templates.contains_key(&id) {
                return Err(ParserError::DuplicateTemplate { id });
            }

            templates.insert(
                id.clone(),
                InlineTemplate {
                    id,
                    body: body.to_string(),
                },
            );
        }

        Ok(Self {
            html: html.to_string(),
            templates,
        })
    }

    /// Look up a template by id
    pub fn template(&self, id: &str) -> Option<&InlineTemplate> {
        self.templates.get(id)
    }

    /// Template ids in document order
    pub fn template_ids(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(|k| k.as_str())
    }

    /// All templates in document order
    pub fn templates(&self) -> impl Iterator<Item = &InlineTemplate> {
        self.templates.values()
    }

    /// Check whether an output container with the given id exists
    pub fn has_container(&self, id: &str) -> bool {
        self.find_container(id).is_some()
    }

    /// Append markup just before the container's closing tag, mirroring
    /// innerHTML-append semantics. Repeated appends accumulate in order.
    pub fn append_to_container(&mut self, id: &str, markup: &str) -> Result<()> {
        let (tag, open_end) = self
            .find_container(id)
            .ok_or_else(|| ParserError::UnknownContainer { id: id.to_string() })?;

        let close_start = find_closing_tag(&self.html, &tag, open_end).ok_or_else(|| {
            ParserError::InvalidFormat(format!("container '{}' has no closing </{}> tag", id, tag))
        })?;

        self.html.insert_str(close_start, markup);
        Ok(())
    }

    /// The current page text
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Consume the page, yielding the hydrated document
    pub fn into_html(self) -> String {
        self.html
    }

    /// Locate a container's opening tag, skipping template script blocks.
    /// Returns the tag name and the byte offset just past the opening tag.
    fn find_container(&self, id: &str) -> Option<(String, usize)> {
        // The [\s"'] anchor keeps attributes like data-id from matching
        let open_re = Regex::new(&format!(
            r#"(?i)<([a-zA-Z][\w-]*)[^>]*[\s"']id\s*=\s*["']{}["'][^>]*>"#,
            regex::escape(id)
        ))
        .expect("container pattern is valid");

        let script_spans = script_spans(&self.html);

        for caps in open_re.captures_iter(&self.html) {
            let whole = caps.get(0).expect("capture 0 always present");
            let tag = caps[1].to_lowercase();
            if tag == "script" {
                continue;
            }
            if script_spans.iter().any(|s| s.contains(&whole.start())) {
                continue;
            }
            return Some((tag, whole.end()));
        }

        None
    }
}

/// All `<script ...>body</script>` blocks as (attributes, body) pairs
fn script_blocks(html: &str) -> Vec<(String, String)> {
    let script_re = Regex::new(r"(?is)<script\b([^>]*)>(.*?)</script\s*>")
        .expect("script pattern is valid");

    script_re
        .captures_iter(html)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// Byte ranges covered by script blocks, used to keep container lookup
/// from matching markup inside template bodies
fn script_spans(html: &str) -> Vec<Range<usize>> {
    let script_re = Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>")
        .expect("script pattern is valid");

    script_re.find_iter(html).map(|m| m.range()).collect()
}

/// Extract a named attribute value from a raw attribute string
fn attribute(attrs: &str, name: &str) -> Option<String> {
    // Anchored so data-id / data-type attributes never match id / type
    let attr_re = Regex::new(&format!(
        r#"(?i)(?:^|[\s"']){}\s*=\s*(?:"([^"]*)"|'([^']*)')"#,
        regex::escape(name)
    ))
    .expect("attribute pattern is valid");

    attr_re.captures(attrs).map(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    })
}

/// Scan forward for the closing tag matching an already-consumed opening
/// tag, accounting for nested elements with the same name
fn find_closing_tag(html: &str, tag: &str, from: usize) -> Option<usize> {
    let tag_re = Regex::new(&format!(r"(?i)</?{}\b[^>]*>", regex::escape(tag)))
        .expect("tag pattern is valid");

    let mut depth = 0usize;
    for m in tag_re.find_iter(&html[from..]) {
        let text = m.as_str();
        if text.starts_with("</") {
            if depth == 0 {
                return Some(from + m.start());
            }
            depth -= 1;
        } else if !text.ends_with("/>") {
            depth += 1;
        }
    }

    None
}
