// src/extract/text.rs

//! Tag-stripping text normalization.
//!
//! Lossy by design: output preserves no structure beyond word order, which
//! is why structure (headings vs. list items) is captured at the block
//! level before normalization.

use ego_tree::iter::Edge;
use scraper::{ElementRef, Html, Node};

/// Tags whose boundaries separate words. Inline tags (b, i, a, span...)
/// concatenate directly so trailing punctuation stays attached.
const BLOCK_TAGS: &[&str] = &[
    "br", "p", "div", "li", "ul", "ol", "dt", "dd", "h1", "h2", "h3", "h4", "h5", "h6",
];

fn is_block(name: &str) -> bool {
    BLOCK_TAGS.contains(&name)
}

/// Collapse runs of whitespace to single spaces and trim.
pub fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize an HTML fragment into clean, collapsed plain text.
///
/// Entity decoding and tag removal come from the parser; block-tag edges
/// become whitespace so adjacent blocks never glue words together.
pub fn clean_fragment(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    element_text(&fragment.root_element())
}

/// Normalized text content of an already-parsed element.
pub fn element_text(el: &ElementRef) -> String {
    let mut out = String::new();
    for edge in el.traverse() {
        match edge {
            Edge::Open(node) => match node.value() {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) if is_block(element.name()) => out.push('\n'),
                _ => {}
            },
            Edge::Close(node) => {
                if let Node::Element(element) = node.value() {
                    if is_block(element.name()) {
                        out.push('\n');
                    }
                }
            }
        }
    }
    collapse_ws(&out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_ws() {
        assert_eq!(collapse_ws("  a \n\t b  c "), "a b c");
        assert_eq!(collapse_ws(""), "");
    }

    #[test]
    fn test_clean_fragment_strips_inline_tags() {
        assert_eq!(
            clean_fragment("Take <b>ten</b> courses in the <i>subject</i>."),
            "Take ten courses in the subject."
        );
    }

    #[test]
    fn test_clean_fragment_decodes_entities() {
        assert_eq!(
            clean_fragment("Fish&nbsp;&amp;&nbsp;Chips &#39;daily&#39;"),
            "Fish & Chips 'daily'"
        );
    }

    #[test]
    fn test_clean_fragment_block_boundaries_keep_words_apart() {
        assert_eq!(
            clean_fragment("<p>one</p><p>two</p><br>three"),
            "one two three"
        );
    }

    #[test]
    fn test_clean_fragment_empty_markup() {
        assert_eq!(clean_fragment("<div><span>  </span></div>"), "");
    }
}
