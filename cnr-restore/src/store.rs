//! Record store access
//!
//! The reconciler only needs four store operations. They sit behind
//! `CandidateStore` so the core can run against any backend; `SqliteStore`
//! is the production implementation.
//!
//! Every query that returns constituencies orders by id, so "first row"
//! always means the lowest id.

use crate::index::CandidateKey;
use async_trait::async_trait;
use cnr_common::db::{Constituency, NewCandidate};
use cnr_common::Result;
use sqlx::SqlitePool;

/// Store operations consumed by the reconciler
#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// Constituencies of a district whose name contains `ordinal`
    /// (case-insensitive)
    async fn constituencies_matching(
        &self,
        district_id: i64,
        ordinal: &str,
    ) -> Result<Vec<Constituency>>;

    /// All constituencies of a district
    async fn constituencies_in_district(&self, district_id: i64) -> Result<Vec<Constituency>>;

    /// Identity projection of every stored candidate
    async fn candidate_keys(&self) -> Result<Vec<CandidateKey>>;

    /// Insert a candidate, returning the store-assigned id
    async fn insert_candidate(&self, candidate: &NewCandidate) -> Result<i64>;
}

/// SQLite-backed store
#[derive(Clone)]
pub struct SqliteStore {
    db: SqlitePool,
}

impl SqliteStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db
    }
}

/// Escape LIKE wildcards so the ordinal is matched literally
fn like_pattern(ordinal: &str) -> String {
    let escaped = ordinal
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl CandidateStore for SqliteStore {
    async fn constituencies_matching(
        &self,
        district_id: i64,
        ordinal: &str,
    ) -> Result<Vec<Constituency>> {
        let rows = sqlx::query_as::<_, Constituency>(
            r#"
            SELECT id, district_id, name
            FROM constituencies
            WHERE district_id = ? AND name LIKE ? ESCAPE '\'
            ORDER BY id
            "#,
        )
        .bind(district_id)
        .bind(like_pattern(ordinal))
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    async fn constituencies_in_district(&self, district_id: i64) -> Result<Vec<Constituency>> {
        let rows = sqlx::query_as::<_, Constituency>(
            "SELECT id, district_id, name FROM constituencies WHERE district_id = ? ORDER BY id",
        )
        .bind(district_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    async fn candidate_keys(&self) -> Result<Vec<CandidateKey>> {
        let rows = sqlx::query_as::<_, (String, String, i64)>(
            "SELECT name, party_name, constituency_id FROM candidates",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(name, party_name, constituency_id)| CandidateKey {
                name,
                party_name,
                constituency_id,
            })
            .collect())
    }

    async fn insert_candidate(&self, candidate: &NewCandidate) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO candidates (name, party_name, constituency_id) VALUES (?, ?, ?)",
        )
        .bind(&candidate.name)
        .bind(&candidate.party_name)
        .bind(candidate.constituency_id)
        .execute(&self.db)
        .await?;

        Ok(result.last_insert_rowid())
    }
}
