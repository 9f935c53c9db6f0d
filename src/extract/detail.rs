// src/extract/detail.rs

//! Detail-page extraction: program name, metadata block, Requirements span.

use ego_tree::NodeRef;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

use crate::error::{AppError, Result};
use crate::extract::text::{clean_fragment, collapse_ws, element_text};
use crate::models::ProgramMeta;
use crate::utils::name_from_url;

/// Everything extracted from one program's detail page.
#[derive(Debug, Clone)]
pub struct ProgramDetail {
    pub name: String,
    pub meta: ProgramMeta,
    /// Raw markup of the Requirements section, heading excluded
    pub requirements_html: String,
}

/// Extractor for program detail pages.
pub struct DetailExtractor {
    h1_selector: Selector,
    title_selector: Selector,
    heading_selector: Selector,
    hours_re: Regex,
    courses_re: Regex,
    contact_re: Regex,
}

impl Default for DetailExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailExtractor {
    pub fn new() -> Self {
        Self {
            h1_selector: Selector::parse("h1").unwrap(),
            title_selector: Selector::parse("title").unwrap(),
            heading_selector: Selector::parse("h2, h3").unwrap(),
            hours_re: meta_label_regex("Hours to Complete"),
            courses_re: meta_label_regex("Courses Required"),
            contact_re: meta_label_regex("Department Contact"),
        }
    }

    /// Extract name, metadata and the Requirements span from one page.
    ///
    /// A missing Requirements heading is the one hard failure here; name and
    /// meta degrade to fallbacks instead of failing.
    pub fn extract(&self, html: &str, source_url: &str) -> Result<ProgramDetail> {
        let document = Html::parse_document(html);

        let name = self.extract_name(&document, source_url);
        let meta = self.extract_meta(html);
        let requirements_html = self.requirements_span(&document).ok_or_else(|| {
            AppError::extract(source_url, "Could not find Requirements section")
        })?;

        Ok(ProgramDetail {
            name,
            meta,
            requirements_html,
        })
    }

    /// Program name: first `<h1>`, else `<title>`, else a URL slug, else a
    /// generic placeholder.
    fn extract_name(&self, document: &Html, source_url: &str) -> String {
        let raw = document
            .select(&self.h1_selector)
            .next()
            .or_else(|| document.select(&self.title_selector).next())
            .map(|el| element_text(&el))
            .unwrap_or_default();

        let name = tidy_name(&raw);
        if !name.is_empty() {
            return name;
        }
        name_from_url(source_url).unwrap_or_else(|| "Untitled Program".to_string())
    }

    /// Best-effort label/value scraping; `None` for anything not found.
    fn extract_meta(&self, html: &str) -> ProgramMeta {
        ProgramMeta {
            hours_to_complete: capture_meta(&self.hours_re, html),
            courses_required: capture_meta(&self.courses_re, html),
            department_contact: capture_meta(&self.contact_re, html),
        }
    }

    /// Raw markup between the "Requirements" heading and the next `<h2>`.
    fn requirements_span(&self, document: &Html) -> Option<String> {
        let heading = document
            .select(&self.heading_selector)
            .find(|el| element_text(el).eq_ignore_ascii_case("requirements"))?;

        let span = serialize_following(heading.next_sibling());
        if !span.trim().is_empty() {
            return Some(span);
        }

        // Heading wrapped in its own container: continue from the parent.
        let parent = heading.parent()?;
        let span = serialize_following(parent.next_sibling());
        Some(span)
    }
}

/// Serialize sibling nodes in order until the next `<h2>`.
fn serialize_following(first: Option<NodeRef<'_, Node>>) -> String {
    let mut out = String::new();
    let mut cursor = first;
    while let Some(node) = cursor {
        if let Some(el) = ElementRef::wrap(node) {
            if el.value().name().eq_ignore_ascii_case("h2") {
                break;
            }
            out.push_str(&el.html());
        } else if let Node::Text(text) = node.value() {
            out.push_str(text);
        }
        cursor = node.next_sibling();
    }
    out
}

/// Label text immediately followed by a closing tag, then the next run of
/// non-tag characters as the value. Deliberately fuzzy; never panics on
/// markup variants, just misses.
fn meta_label_regex(label: &str) -> Regex {
    let pattern = format!(
        r"(?is){}\s*:?\s*</[^>]*>\s*(?:<[^>]*>\s*)*([^<]+)",
        regex::escape(label)
    );
    Regex::new(&pattern).unwrap()
}

fn capture_meta(re: &Regex, html: &str) -> Option<String> {
    let value = clean_fragment(re.captures(html)?.get(1)?.as_str());
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Strip trailing "Major"/"Minor" suffixes and trailing parenthetical
/// markers like "(BA)" or "(Minor)" from a page heading.
fn tidy_name(raw: &str) -> String {
    let mut name = collapse_ws(raw);
    loop {
        let before = name.len();

        if name.ends_with(')') {
            if let Some(idx) = name.rfind('(') {
                name.truncate(idx);
                name = name.trim_end().to_string();
            }
        }

        let lower = name.to_lowercase();
        for suffix in [" major", " minor"] {
            if lower.ends_with(suffix) {
                name.truncate(name.len() - suffix.len());
                name = name.trim_end().to_string();
                break;
            }
        }

        if name.len() == before {
            break;
        }
    }
    name
}
