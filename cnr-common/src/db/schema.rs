//! Store schema
//!
//! The store schema is owned by the election data service; these statements
//! describe the contract the restore tool reads and writes. They are
//! idempotent (`IF NOT EXISTS`) and never alter an existing table.

use crate::Result;
use sqlx::SqlitePool;
use tracing::debug;

/// Create the districts, constituencies and candidates tables if missing
pub async fn initialize_schema(pool: &SqlitePool) -> Result<()> {
    create_districts_table(pool).await?;
    create_constituencies_table(pool).await?;
    create_candidates_table(pool).await?;

    debug!("Store schema initialized (districts, constituencies, candidates)");
    Ok(())
}

async fn create_districts_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS districts (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_constituencies_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS constituencies (
            id INTEGER PRIMARY KEY,
            district_id INTEGER NOT NULL REFERENCES districts(id),
            name TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_constituencies_district ON constituencies(district_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_candidates_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS candidates (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            party_name TEXT NOT NULL,
            constituency_id INTEGER NOT NULL REFERENCES constituencies(id),
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
