// src/pipeline/sync.rs

//! Sync orchestrator.
//!
//! Fetches the catalog index, iterates discovered programs sequentially,
//! and drives extraction, inference, hashing and persistence per program.
//! One bad program never aborts the run; only an index fetch failure is
//! fatal.

use std::time::Duration;

use url::Url;

use crate::error::Result;
use crate::extract::{
    infer_rules, segment_requirements, CourseRules, DetailExtractor, ProgramDiscovery,
};
use crate::models::{
    requirements_hash, Config, ProgramRecord, ProgramVariant, RequirementNode, SyncFailure,
    SyncReport,
};
use crate::storage::{ProgramStore, SyncDisposition};
use crate::utils::http;

/// A fully processed program, ready for the store.
#[derive(Debug, Clone)]
pub struct ExtractedProgram {
    pub record: ProgramRecord,
    pub nodes: Vec<RequirementNode>,
    pub rules: CourseRules,
}

/// Run one full sync pass.
///
/// `delay_override` replaces the configured inter-fetch delay when set.
/// Returns the stats summary; per-program failures are collected in it
/// rather than propagated.
pub async fn run_sync(
    config: &Config,
    store: &ProgramStore,
    delay_override: Option<u64>,
) -> Result<SyncReport> {
    let client = http::create_client(&config.http)?;
    let index_url = Url::parse(&config.catalog.index_url)?;

    // Failure here aborts the run: there is nothing to iterate without the
    // index.
    let index_html = http::fetch_text(&client, index_url.as_str()).await?;
    let discovery = ProgramDiscovery::new(&config.catalog);
    let variants = discovery.discover(&index_html, &index_url);
    log::info!("Discovered {} candidate programs", variants.len());

    let extractor = DetailExtractor::new();
    let delay =
        Duration::from_millis(delay_override.unwrap_or(config.http.request_delay_ms));

    let mut report = SyncReport::default();
    for (i, variant) in variants.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let html = match http::fetch_text(&client, &variant.source_url).await {
            Ok(html) => {
                report.fetched_programs += 1;
                html
            }
            Err(error) => {
                log::warn!("Fetch failed for {}: {}", variant.source_url, error);
                report.errors.push(SyncFailure {
                    source_url: variant.source_url.clone(),
                    error: error.to_string(),
                });
                continue;
            }
        };

        match process_program(&extractor, store, variant, &html).await {
            Ok(disposition) => {
                report.upserted_programs += 1;
                match disposition {
                    SyncDisposition::Inserted | SyncDisposition::Updated => {
                        report.updated_requirements += 1;
                    }
                    SyncDisposition::Unchanged => report.skipped_unchanged += 1,
                }
            }
            Err(error) => {
                log::warn!("Sync failed for {}: {}", variant.source_url, error);
                report.errors.push(SyncFailure {
                    source_url: variant.source_url.clone(),
                    error: error.to_string(),
                });
            }
        }
    }

    log::info!(
        "Sync pass complete: {} fetched, {} updated, {} unchanged, {} errors",
        report.fetched_programs,
        report.updated_requirements,
        report.skipped_unchanged,
        report.errors.len()
    );
    Ok(report)
}

/// Extract, segment, infer and hash one program's page.
pub fn extract_program(
    extractor: &DetailExtractor,
    variant: &ProgramVariant,
    html: &str,
) -> Result<ExtractedProgram> {
    let detail = extractor.extract(html, &variant.source_url)?;
    let nodes = segment_requirements(&detail.requirements_html);

    let node_text = nodes
        .iter()
        .map(|n| n.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let rules = infer_rules(&node_text);

    let record = ProgramRecord {
        name: detail.name,
        kind: variant.kind,
        degree: variant.degree.clone(),
        source_url: variant.source_url.clone(),
        meta: detail.meta,
        requirements_hash: requirements_hash(&nodes),
    };

    Ok(ExtractedProgram {
        record,
        nodes,
        rules,
    })
}

async fn process_program(
    extractor: &DetailExtractor,
    store: &ProgramStore,
    variant: &ProgramVariant,
    html: &str,
) -> Result<SyncDisposition> {
    let extracted = extract_program(extractor, variant, html)?;
    log::debug!(
        "{}: {} nodes, {} course codes, floor {:?}",
        extracted.record.source_url,
        extracted.nodes.len(),
        extracted.rules.course_codes.len(),
        extracted.rules.elective_level_floor
    );
    store
        .sync_program(&extracted.record, &extracted.nodes, &extracted.rules)
        .await
}
