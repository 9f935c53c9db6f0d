//! Requirement node structures and content hashing.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Structural classification of one requirement node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Heading,
    Paragraph,
    ListItem,
}

impl NodeType {
    /// Stable storage string for this node type.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Heading => "heading",
            NodeType::Paragraph => "paragraph",
            NodeType::ListItem => "list_item",
        }
    }

    /// Inverse of [`NodeType::as_str`], for rows read back from storage.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "heading" => Some(NodeType::Heading),
            "paragraph" => Some(NodeType::Paragraph),
            "list_item" => Some(NodeType::ListItem),
            _ => None,
        }
    }
}

/// One structurally distinct unit of a program's Requirements section.
///
/// Sequence order is significant: it is the document reading order and is
/// persisted as a 0-based `ord` column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequirementNode {
    pub node_type: NodeType,

    /// Normalized text, never empty
    pub text: String,

    /// Nesting flag, only meaningful for list items
    pub list_level: Option<i64>,
}

impl RequirementNode {
    pub fn heading(text: impl Into<String>) -> Self {
        Self {
            node_type: NodeType::Heading,
            text: text.into(),
            list_level: None,
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            node_type: NodeType::Paragraph,
            text: text.into(),
            list_level: None,
        }
    }

    pub fn list_item(text: impl Into<String>, level: i64) -> Self {
        Self {
            node_type: NodeType::ListItem,
            text: text.into(),
            list_level: Some(level),
        }
    }
}

/// Content fingerprint of an ordered node sequence.
///
/// Canonical form is `"{type}:{text}"` per node, joined by newlines, hashed
/// with SHA-256. Any change to text, type, or order changes the hash.
pub fn requirements_hash(nodes: &[RequirementNode]) -> String {
    let canonical = nodes
        .iter()
        .map(|n| format!("{}:{}", n.node_type.as_str(), n.text))
        .collect::<Vec<_>>()
        .join("\n");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_type_round_trips_through_storage_string() {
        for t in [NodeType::Heading, NodeType::Paragraph, NodeType::ListItem] {
            assert_eq!(NodeType::parse(t.as_str()), Some(t));
        }
        assert_eq!(NodeType::parse("bullet"), None);
    }

    #[test]
    fn test_hash_is_stable() {
        let nodes = vec![
            RequirementNode::heading("Core"),
            RequirementNode::list_item("CS 170", 0),
        ];
        assert_eq!(requirements_hash(&nodes), requirements_hash(&nodes));
    }

    #[test]
    fn test_hash_changes_on_text() {
        let a = vec![RequirementNode::paragraph("Take CS 170.")];
        let b = vec![RequirementNode::paragraph("Take CS 171.")];
        assert_ne!(requirements_hash(&a), requirements_hash(&b));
    }

    #[test]
    fn test_hash_changes_on_type() {
        let a = vec![RequirementNode::paragraph("Core courses")];
        let b = vec![RequirementNode::heading("Core courses")];
        assert_ne!(requirements_hash(&a), requirements_hash(&b));
    }

    #[test]
    fn test_hash_changes_on_order() {
        let a = vec![
            RequirementNode::list_item("CS 170", 0),
            RequirementNode::list_item("CS 171", 0),
        ];
        let mut b = a.clone();
        b.reverse();
        assert_ne!(requirements_hash(&a), requirements_hash(&b));
    }

    #[test]
    fn test_hash_ignores_list_level() {
        // Only type and text participate in the canonical form.
        let a = vec![RequirementNode::list_item("CS 170", 0)];
        let b = vec![RequirementNode::list_item("CS 170", 1)];
        assert_eq!(requirements_hash(&a), requirements_hash(&b));
    }
}
