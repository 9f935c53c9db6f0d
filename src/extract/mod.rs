// src/extract/mod.rs

//! HTML extraction pipeline: discovery, detail, segmentation, inference.

mod detail;
mod discovery;
mod infer;
mod segment;
mod text;

pub use detail::{DetailExtractor, ProgramDetail};
pub use discovery::ProgramDiscovery;
pub use infer::{infer_rules, CourseRules};
pub use segment::segment_requirements;
pub use text::{clean_fragment, collapse_ws, element_text};
