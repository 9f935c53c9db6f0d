// src/pipeline/mod.rs

//! Sync pipeline orchestration.

mod sync;

pub use sync::{extract_program, run_sync, ExtractedProgram};
