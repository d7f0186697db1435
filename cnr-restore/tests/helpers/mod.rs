//! Shared fixtures for cnr-restore integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use cnr_common::db::{Constituency, NewCandidate};
use cnr_common::{Error, Result};
use cnr_restore::index::CandidateKey;
use cnr_restore::{CandidateStore, SqliteStore};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

pub const HEADER: &str = "क्र.सं.,जिल्ला,क्षेत्र नं.,दल,उम्मेदवारको नाम";

pub const KATHMANDU: &str = "काठमाडौं";
pub const JHAPA: &str = "झापा";
pub const KASKI: &str = "कास्की";

/// Candidate present in the seeded store (Kathmandu 3)
pub const EXISTING_NAME: &str = "राम बहादुर थापा";
pub const EXISTING_PARTY: &str = "नेपाली काँग्रेस";
pub const EXISTING_CONSTITUENCY: i64 = 303;

/// Create a file-backed store with the schema and a small seed
///
/// Returns (TempDir, path, store) - TempDir must be kept alive for the test.
pub async fn create_test_store() -> (TempDir, PathBuf, SqliteStore) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("cnr_test.db");

    let pool = cnr_common::db::init_database(&db_path).await.unwrap();
    seed(&pool).await;

    (temp_dir, db_path, SqliteStore::new(pool))
}

async fn seed(pool: &SqlitePool) {
    sqlx::query("INSERT INTO districts (id, name) VALUES (30, ?), (4, ?), (40, ?)")
        .bind(KATHMANDU)
        .bind(JHAPA)
        .bind(KASKI)
        .execute(pool)
        .await
        .unwrap();

    sqlx::query(
        r#"
        INSERT INTO constituencies (id, district_id, name) VALUES
            (301, 30, 'काठमाडौं निर्वाचन क्षेत्र नं. 1'),
            (302, 30, 'काठमाडौं निर्वाचन क्षेत्र नं. 2'),
            (303, 30, 'काठमाडौं निर्वाचन क्षेत्र नं. 3'),
            (41, 4, 'झापा निर्वाचन क्षेत्र नं. 1'),
            (45, 4, 'झापा निर्वाचन क्षेत्र नं. 5'),
            (403, 40, 'निर्वाचन क्षेत्र नं. 3')
        "#,
    )
    .execute(pool)
    .await
    .unwrap();

    sqlx::query("INSERT INTO candidates (name, party_name, constituency_id) VALUES (?, ?, ?)")
        .bind(EXISTING_NAME)
        .bind(EXISTING_PARTY)
        .bind(EXISTING_CONSTITUENCY)
        .execute(pool)
        .await
        .unwrap();
}

/// Export text: header plus the given data lines
pub fn export(lines: &[&str]) -> String {
    let mut text = String::from(HEADER);
    for line in lines {
        text.push('\n');
        text.push_str(line);
    }
    text.push('\n');
    text
}

pub async fn candidate_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM candidates")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn candidates_named(pool: &SqlitePool, name: &str) -> Vec<(String, i64)> {
    sqlx::query_as("SELECT party_name, constituency_id FROM candidates WHERE name = ? ORDER BY id")
        .bind(name)
        .fetch_all(pool)
        .await
        .unwrap()
}

/// How the wrapped direct constituency query behaves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectQuery {
    Delegate,
    NoRows,
    Fail,
}

/// Store wrapper that injects read/write failures
pub struct ScriptedStore {
    pub inner: SqliteStore,
    pub direct: DirectQuery,
    pub fail_scan: bool,
    pub fail_candidate_keys: bool,
    pub fail_inserts_for: Option<String>,
    insert_attempts: AtomicUsize,
    direct_queries: AtomicUsize,
}

impl ScriptedStore {
    pub fn new(inner: SqliteStore) -> Self {
        Self {
            inner,
            direct: DirectQuery::Delegate,
            fail_scan: false,
            fail_candidate_keys: false,
            fail_inserts_for: None,
            insert_attempts: AtomicUsize::new(0),
            direct_queries: AtomicUsize::new(0),
        }
    }

    pub fn insert_attempts(&self) -> usize {
        self.insert_attempts.load(Ordering::SeqCst)
    }

    pub fn direct_queries(&self) -> usize {
        self.direct_queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CandidateStore for ScriptedStore {
    async fn constituencies_matching(
        &self,
        district_id: i64,
        ordinal: &str,
    ) -> Result<Vec<Constituency>> {
        self.direct_queries.fetch_add(1, Ordering::SeqCst);
        match self.direct {
            DirectQuery::Delegate => self.inner.constituencies_matching(district_id, ordinal).await,
            DirectQuery::NoRows => Ok(Vec::new()),
            DirectQuery::Fail => Err(Error::Internal("direct query unavailable".to_string())),
        }
    }

    async fn constituencies_in_district(&self, district_id: i64) -> Result<Vec<Constituency>> {
        if self.fail_scan {
            return Err(Error::Internal("scan unavailable".to_string()));
        }
        self.inner.constituencies_in_district(district_id).await
    }

    async fn candidate_keys(&self) -> Result<Vec<CandidateKey>> {
        if self.fail_candidate_keys {
            return Err(Error::Internal("candidates unavailable".to_string()));
        }
        self.inner.candidate_keys().await
    }

    async fn insert_candidate(&self, candidate: &NewCandidate) -> Result<i64> {
        self.insert_attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_inserts_for.as_deref() == Some(candidate.name.as_str()) {
            return Err(Error::Internal("insert rejected".to_string()));
        }
        self.inner.insert_candidate(candidate).await
    }
}
