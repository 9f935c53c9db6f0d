// src/storage/schema.rs

//! Idempotent schema migrations.

use sqlx::SqlitePool;

use crate::error::Result;

/// Create the program tables if they do not exist yet.
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS programs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            kind TEXT NOT NULL,
            degree TEXT,
            source_url TEXT NOT NULL UNIQUE,
            hours_to_complete TEXT,
            courses_required TEXT,
            department_contact TEXT,
            requirements_hash TEXT NOT NULL,
            last_synced_at INTEGER NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 1
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS program_requirement_nodes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            program_id INTEGER NOT NULL,
            ord INTEGER NOT NULL,
            node_type TEXT NOT NULL,
            text TEXT NOT NULL,
            list_level INTEGER,
            UNIQUE(program_id, ord),
            FOREIGN KEY (program_id) REFERENCES programs(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS program_course_codes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            program_id INTEGER NOT NULL,
            course_code TEXT NOT NULL,
            UNIQUE(program_id, course_code),
            FOREIGN KEY (program_id) REFERENCES programs(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS program_subject_codes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            program_id INTEGER NOT NULL,
            subject_code TEXT NOT NULL,
            UNIQUE(program_id, subject_code),
            FOREIGN KEY (program_id) REFERENCES programs(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS program_elective_rules (
            program_id INTEGER PRIMARY KEY,
            level_floor INTEGER,
            updated_at INTEGER NOT NULL,
            FOREIGN KEY (program_id) REFERENCES programs(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_requirement_nodes_program
         ON program_requirement_nodes(program_id)",
    )
    .execute(pool)
    .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_course_codes_program
         ON program_course_codes(program_id)",
    )
    .execute(pool)
    .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_subject_codes_program
         ON program_subject_codes(program_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
