//! Utility functions and helpers.

pub mod http;

use url::Url;

/// Resolve a potentially relative href against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> Option<Url> {
    base.join(href).ok()
}

/// Derive a human-readable name from the last path segment of a URL.
///
/// `https://example.edu/majors/computer-science.html` becomes
/// "Computer Science". Returns `None` for URLs with no usable segment.
pub fn name_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed
        .path_segments()?
        .filter(|s| !s.is_empty())
        .next_back()?;
    let stem = segment.strip_suffix(".html").unwrap_or(segment);

    let words: Vec<String> = stem
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();

    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://example.edu/academics/index.html").unwrap();
        assert_eq!(
            resolve_url(&base, "majors/cs.html").unwrap().as_str(),
            "https://example.edu/academics/majors/cs.html"
        );
        assert_eq!(
            resolve_url(&base, "/minors/math.html").unwrap().as_str(),
            "https://example.edu/minors/math.html"
        );
        assert_eq!(
            resolve_url(&base, "https://other.edu/x.html").unwrap().as_str(),
            "https://other.edu/x.html"
        );
    }

    #[test]
    fn test_name_from_url() {
        assert_eq!(
            name_from_url("https://example.edu/majors/computer-science.html"),
            Some("Computer Science".to_string())
        );
        assert_eq!(
            name_from_url("https://example.edu/majors/art_history.html"),
            Some("Art History".to_string())
        );
        assert_eq!(name_from_url("https://example.edu/"), None);
    }
}
