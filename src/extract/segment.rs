// src/extract/segment.rs

//! Requirement-node segmentation.
//!
//! Splits the Requirements span into an ordered sequence of typed nodes by
//! walking the DOM in document order. A captured block's subtree is not
//! re-entered, so nested list text folds into its outer item.

use scraper::{ElementRef, Html};

use crate::extract::text::{clean_fragment, element_text};
use crate::models::{NodeType, RequirementNode};

/// Segment a Requirements span into ordered nodes.
///
/// Blocks with empty normalized text are skipped. If no `h3/h4/p/li` block
/// matches at all, the whole span's normalized text becomes one paragraph
/// node, so every program with a Requirements section yields at least one
/// node (unless the span itself is blank).
pub fn segment_requirements(requirements_html: &str) -> Vec<RequirementNode> {
    let fragment = Html::parse_fragment(requirements_html);

    let mut nodes = Vec::new();
    walk(fragment.root_element(), &mut nodes);

    if nodes.is_empty() {
        let text = clean_fragment(requirements_html);
        if !text.is_empty() {
            nodes.push(RequirementNode::paragraph(text));
        }
    }

    nodes
}

fn walk(el: ElementRef<'_>, out: &mut Vec<RequirementNode>) {
    for child in el.children() {
        let Some(child_el) = ElementRef::wrap(child) else {
            continue;
        };

        let node_type = match child_el.value().name() {
            "h3" | "h4" => Some(NodeType::Heading),
            "p" => Some(NodeType::Paragraph),
            "li" => Some(NodeType::ListItem),
            _ => None,
        };

        match node_type {
            Some(node_type) => {
                let text = element_text(&child_el);
                if !text.is_empty() {
                    out.push(RequirementNode {
                        node_type,
                        text,
                        list_level: match node_type {
                            NodeType::ListItem => Some(0),
                            _ => None,
                        },
                    });
                }
                // Captured: do not descend further.
            }
            None => walk(child_el, out),
        }
    }
}
