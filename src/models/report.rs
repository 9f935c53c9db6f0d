//! Run summary returned to the caller.

use serde::{Deserialize, Serialize};

/// One failed program in a sync run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncFailure {
    pub source_url: String,
    pub error: String,
}

/// Summary of a sync run.
///
/// This is the unit of observability handed back to the job runner; field
/// names serialize camelCase to match the call contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    /// Programs whose detail page was fetched successfully
    pub fetched_programs: usize,

    /// Programs whose row was inserted or refreshed
    pub upserted_programs: usize,

    /// Programs whose requirement nodes were replaced
    pub updated_requirements: usize,

    /// Programs skipped because the content hash was unchanged
    pub skipped_unchanged: usize,

    /// Per-program failures, keyed by source URL
    pub errors: Vec<SyncFailure>,
}

impl SyncReport {
    /// Whether every discovered program synced without error.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serializes_camel_case() {
        let report = SyncReport {
            fetched_programs: 2,
            upserted_programs: 2,
            updated_requirements: 1,
            skipped_unchanged: 1,
            errors: vec![SyncFailure {
                source_url: "https://example.edu/majors/cs.html".into(),
                error: "timeout".into(),
            }],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["fetchedPrograms"], 2);
        assert_eq!(json["skippedUnchanged"], 1);
        assert_eq!(
            json["errors"][0]["sourceUrl"],
            "https://example.edu/majors/cs.html"
        );
    }
}
