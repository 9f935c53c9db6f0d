//! Program data structures.

use serde::{Deserialize, Serialize};

/// Whether a program is a major or a minor concentration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgramKind {
    Major,
    Minor,
}

impl ProgramKind {
    /// Stable storage string for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramKind::Major => "major",
            ProgramKind::Minor => "minor",
        }
    }
}

/// A candidate program discovered on the catalog index page.
///
/// Identity is `source_url`; the name is left empty at discovery time and
/// resolved from the detail page, because index labels are not reliably
/// clean program names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgramVariant {
    /// Display name (empty until the detail page is extracted)
    pub name: String,

    /// Major or minor
    pub kind: ProgramKind,

    /// Degree abbreviation from the index label, e.g. "BA", "BS"
    pub degree: Option<String>,

    /// Absolute URL of the program's detail page
    pub source_url: String,
}

/// Best-effort metadata scraped from a program detail page.
///
/// Every field is optional; missing labels never fail the program.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgramMeta {
    pub hours_to_complete: Option<String>,
    pub courses_required: Option<String>,
    pub department_contact: Option<String>,
}

/// A fully extracted program, ready for persistence.
#[derive(Debug, Clone)]
pub struct ProgramRecord {
    pub name: String,
    pub kind: ProgramKind,
    pub degree: Option<String>,
    pub source_url: String,
    pub meta: ProgramMeta,
    pub requirements_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_storage_string() {
        assert_eq!(ProgramKind::Major.as_str(), "major");
        assert_eq!(ProgramKind::Minor.as_str(), "minor");
    }

    #[test]
    fn test_kind_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&ProgramKind::Minor).unwrap(),
            "\"minor\""
        );
    }
}
