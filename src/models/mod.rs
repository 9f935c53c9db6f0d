// src/models/mod.rs

//! Domain models for the sync application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod program;
mod report;
mod requirement;

// Re-export all public types
pub use config::{CatalogConfig, Config, DatabaseConfig, HttpConfig};
pub use program::{ProgramKind, ProgramMeta, ProgramRecord, ProgramVariant};
pub use report::{SyncFailure, SyncReport};
pub use requirement::{requirements_hash, NodeType, RequirementNode};
