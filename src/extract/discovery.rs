// src/extract/discovery.rs

//! Program discovery from the catalog index page.
//!
//! Scans every anchor on the index, keeps those resolving to the known
//! major/minor path convention, classifies kind and degree from the link
//! label, and deduplicates by absolute URL.

use std::collections::HashSet;

use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use crate::extract::text::element_text;
use crate::models::{CatalogConfig, ProgramKind, ProgramVariant};
use crate::utils::resolve_url;

/// Degree abbreviations recognized in index labels.
const DEGREE_PATTERN: &str = r"\b(BA|BS|BBA|BSE|BFA)\b";

/// Extractor for program links on the catalog index page.
pub struct ProgramDiscovery {
    major_path: String,
    minor_path: String,
    anchor_selector: Selector,
    degree_re: Regex,
}

impl ProgramDiscovery {
    /// Create a discovery extractor for the configured catalog layout.
    pub fn new(catalog: &CatalogConfig) -> Self {
        Self {
            major_path: catalog.major_path.clone(),
            minor_path: catalog.minor_path.clone(),
            anchor_selector: Selector::parse("a[href]").unwrap(),
            degree_re: Regex::new(DEGREE_PATTERN).unwrap(),
        }
    }

    /// Scan the index page for program links.
    ///
    /// Repeated nav links to the same program collapse to one variant,
    /// keeping the first occurrence.
    pub fn discover(&self, index_html: &str, index_url: &Url) -> Vec<ProgramVariant> {
        let document = Html::parse_document(index_html);

        let mut seen_urls: HashSet<String> = HashSet::new();
        let mut variants = Vec::new();

        for anchor in document.select(&self.anchor_selector) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let Some(resolved) = resolve_url(index_url, href) else {
                continue;
            };
            if !self.is_program_path(resolved.path()) {
                continue;
            }

            let label = element_text(&anchor);
            let Some(kind) = self.classify_kind(&label, resolved.path()) else {
                continue;
            };
            let degree = self.extract_degree(&label);

            let source_url = resolved.to_string();
            if seen_urls.insert(source_url.clone()) {
                variants.push(ProgramVariant {
                    name: String::new(),
                    kind,
                    degree,
                    source_url,
                });
            }
        }

        variants
    }

    /// A program detail page lives under the major or minor path prefix and
    /// ends in `.html` (query/fragment already stripped by the URL parser).
    fn is_program_path(&self, path: &str) -> bool {
        if !path.ends_with(".html") {
            return false;
        }
        path.starts_with(self.major_path.as_str()) || path.starts_with(self.minor_path.as_str())
    }

    /// Classify kind from the label, falling back to the URL path segment.
    fn classify_kind(&self, label: &str, path: &str) -> Option<ProgramKind> {
        let upper = label.to_uppercase();
        if upper.contains("MINOR") {
            return Some(ProgramKind::Minor);
        }
        if upper.contains("MAJOR") {
            return Some(ProgramKind::Major);
        }
        if path.starts_with(self.minor_path.as_str()) {
            return Some(ProgramKind::Minor);
        }
        if path.starts_with(self.major_path.as_str()) {
            return Some(ProgramKind::Major);
        }
        None
    }

    fn extract_degree(&self, label: &str) -> Option<String> {
        let upper = label.to_uppercase();
        self.degree_re
            .captures(&upper)
            .map(|caps| caps[1].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogConfig;

    fn discovery() -> ProgramDiscovery {
        ProgramDiscovery::new(&CatalogConfig::default())
    }

    fn index_url() -> Url {
        Url::parse("https://example.edu/academics/concentrations/index.html").unwrap()
    }

    #[test]
    fn test_discovers_major_and_minor() {
        let html = r#"
            <a href="/academics/concentrations/majors/biology.html">Biology Major (BS)</a>
            <a href="majors/chemistry.html">Chemistry</a>
            <a href="/academics/concentrations/minors/dance.html">Dance Minor</a>
        "#;
        let variants = discovery().discover(html, &index_url());
        assert_eq!(variants.len(), 3);

        assert_eq!(variants[0].kind, ProgramKind::Major);
        assert_eq!(variants[0].degree.as_deref(), Some("BS"));
        assert_eq!(
            variants[0].source_url,
            "https://example.edu/academics/concentrations/majors/biology.html"
        );

        // Kind inferred from the path segment when the label has no marker.
        assert_eq!(variants[1].kind, ProgramKind::Major);
        assert_eq!(variants[1].degree, None);

        assert_eq!(variants[2].kind, ProgramKind::Minor);
    }

    #[test]
    fn test_dedup_by_absolute_url() {
        let html = r#"
            <a href="/academics/concentrations/majors/biology.html">Biology Major</a>
            <a href="https://example.edu/academics/concentrations/majors/biology.html">Biology</a>
            <a href="majors/biology.html?nav=1">Biology again</a>
        "#;
        let variants = discovery().discover(html, &index_url());
        // The query-string link resolves to the same path but a different
        // absolute URL, so only the first two collapse.
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].name, "");
    }

    #[test]
    fn test_ignores_links_outside_convention() {
        let html = r#"
            <a href="/academics/calendar.html">Calendar</a>
            <a href="/academics/concentrations/majors/list.pdf">Majors PDF</a>
            <a href="/academics/concentrations/majors/">Majors home</a>
        "#;
        let variants = discovery().discover(html, &index_url());
        assert!(variants.is_empty());
    }

    #[test]
    fn test_program_path_must_be_prefix() {
        // The convention path appearing mid-URL is not a program page.
        let html = r#"
            <a href="/mirror/academics/concentrations/majors/biology.html">Biology Major</a>
            <a href="/archive/academics/concentrations/minors/dance.html">Dance Minor</a>
        "#;
        let variants = discovery().discover(html, &index_url());
        assert!(variants.is_empty());
    }

    #[test]
    fn test_minor_label_wins_over_major_path() {
        let html =
            r#"<a href="/academics/concentrations/majors/econ.html">Economics Minor</a>"#;
        let variants = discovery().discover(html, &index_url());
        assert_eq!(variants[0].kind, ProgramKind::Minor);
    }

    #[test]
    fn test_degree_tokens() {
        let d = discovery();
        assert_eq!(d.extract_degree("Music Major (BA)").as_deref(), Some("BA"));
        assert_eq!(d.extract_degree("Engineering (BSE)").as_deref(), Some("BSE"));
        assert_eq!(d.extract_degree("Business (bba)").as_deref(), Some("BBA"));
        assert_eq!(d.extract_degree("Sociology"), None);
    }
}
