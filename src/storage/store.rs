// src/storage/store.rs

//! Program persistence with content-hash diffing.
//!
//! Each program syncs inside one transaction: the program row is upserted
//! on its `source_url`, and the derived node/code/subject rows are replaced
//! wholesale only when the requirements hash changed. Readers therefore see
//! either the fully-old or fully-new derived set, never a mix.

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::error::{AppError, Result};
use crate::extract::CourseRules;
use crate::models::{NodeType, ProgramRecord, RequirementNode};

/// Outcome of syncing one program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncDisposition {
    /// First sight of this source URL
    Inserted,
    /// Known program, requirements hash changed, derived rows replaced
    Updated,
    /// Known program, hash unchanged, derived rows untouched
    Unchanged,
}

/// Store for programs and their derived requirement tables.
#[derive(Clone)]
pub struct ProgramStore {
    pool: SqlitePool,
}

impl ProgramStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Underlying pool, for ad hoc queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Sync one extracted program inside a single transaction.
    ///
    /// `last_synced_at` and `is_active` refresh on every call; requirement
    /// nodes, course codes and subject codes are deleted and reinserted only
    /// on hash change. The elective rule row refreshes on every call.
    pub async fn sync_program(
        &self,
        record: &ProgramRecord,
        nodes: &[RequirementNode],
        rules: &CourseRules,
    ) -> Result<SyncDisposition> {
        let now = Utc::now().timestamp();
        let mut tx = self.pool.begin().await?;

        let existing: Option<(i64, String)> =
            sqlx::query_as("SELECT id, requirements_hash FROM programs WHERE source_url = ?")
                .bind(&record.source_url)
                .fetch_optional(&mut *tx)
                .await?;

        sqlx::query(
            r#"
            INSERT INTO programs (
                name, kind, degree, source_url,
                hours_to_complete, courses_required, department_contact,
                requirements_hash, last_synced_at, is_active
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 1)
            ON CONFLICT(source_url) DO UPDATE SET
                name = excluded.name,
                kind = excluded.kind,
                degree = excluded.degree,
                hours_to_complete = excluded.hours_to_complete,
                courses_required = excluded.courses_required,
                department_contact = excluded.department_contact,
                requirements_hash = excluded.requirements_hash,
                last_synced_at = excluded.last_synced_at,
                is_active = 1
            "#,
        )
        .bind(&record.name)
        .bind(record.kind.as_str())
        .bind(&record.degree)
        .bind(&record.source_url)
        .bind(&record.meta.hours_to_complete)
        .bind(&record.meta.courses_required)
        .bind(&record.meta.department_contact)
        .bind(&record.requirements_hash)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let program_id: i64 = match &existing {
            Some((id, _)) => *id,
            None => {
                sqlx::query_scalar("SELECT id FROM programs WHERE source_url = ?")
                    .bind(&record.source_url)
                    .fetch_one(&mut *tx)
                    .await?
            }
        };

        let unchanged = existing
            .as_ref()
            .is_some_and(|(_, hash)| *hash == record.requirements_hash);

        let disposition = if unchanged {
            // Floor may legitimately be recomputed even when the node hash
            // is unchanged, so the rule row still refreshes.
            upsert_elective_rule(&mut tx, program_id, rules.elective_level_floor, now).await?;
            SyncDisposition::Unchanged
        } else {
            replace_derived_rows(&mut tx, program_id, nodes, rules, now).await?;
            if existing.is_some() {
                SyncDisposition::Updated
            } else {
                SyncDisposition::Inserted
            }
        };

        tx.commit().await?;
        Ok(disposition)
    }

    /// Number of program rows.
    pub async fn program_count(&self) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM programs")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Requirement nodes for one program in document order.
    ///
    /// Empty when the source URL is unknown.
    pub async fn nodes_for_program(&self, source_url: &str) -> Result<Vec<RequirementNode>> {
        let rows: Vec<(String, String, Option<i64>)> = sqlx::query_as(
            r#"
            SELECT n.node_type, n.text, n.list_level
            FROM program_requirement_nodes n
            JOIN programs p ON p.id = n.program_id
            WHERE p.source_url = ?
            ORDER BY n.ord
            "#,
        )
        .bind(source_url)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(node_type, text, list_level)| {
                let node_type = NodeType::parse(&node_type).ok_or_else(|| {
                    AppError::validation(format!("Unknown node type in storage: {node_type}"))
                })?;
                Ok(RequirementNode {
                    node_type,
                    text,
                    list_level,
                })
            })
            .collect()
    }
}

/// Delete and reinsert every derived row for one program.
async fn replace_derived_rows(
    tx: &mut Transaction<'_, Sqlite>,
    program_id: i64,
    nodes: &[RequirementNode],
    rules: &CourseRules,
    now: i64,
) -> Result<()> {
    sqlx::query("DELETE FROM program_requirement_nodes WHERE program_id = ?")
        .bind(program_id)
        .execute(&mut **tx)
        .await?;
    sqlx::query("DELETE FROM program_course_codes WHERE program_id = ?")
        .bind(program_id)
        .execute(&mut **tx)
        .await?;
    sqlx::query("DELETE FROM program_subject_codes WHERE program_id = ?")
        .bind(program_id)
        .execute(&mut **tx)
        .await?;

    for (ord, node) in nodes.iter().enumerate() {
        sqlx::query(
            "INSERT INTO program_requirement_nodes (program_id, ord, node_type, text, list_level)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(program_id)
        .bind(ord as i64)
        .bind(node.node_type.as_str())
        .bind(&node.text)
        .bind(node.list_level)
        .execute(&mut **tx)
        .await?;
    }

    for code in &rules.course_codes {
        sqlx::query("INSERT INTO program_course_codes (program_id, course_code) VALUES (?, ?)")
            .bind(program_id)
            .bind(code)
            .execute(&mut **tx)
            .await?;
    }

    for subject in &rules.subject_codes {
        sqlx::query("INSERT INTO program_subject_codes (program_id, subject_code) VALUES (?, ?)")
            .bind(program_id)
            .bind(subject)
            .execute(&mut **tx)
            .await?;
    }

    upsert_elective_rule(tx, program_id, rules.elective_level_floor, now).await
}

async fn upsert_elective_rule(
    tx: &mut Transaction<'_, Sqlite>,
    program_id: i64,
    level_floor: Option<i64>,
    now: i64,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO program_elective_rules (program_id, level_floor, updated_at)
        VALUES (?, ?, ?)
        ON CONFLICT(program_id) DO UPDATE SET
            level_floor = excluded.level_floor,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(program_id)
    .bind(level_floor)
    .bind(now)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
