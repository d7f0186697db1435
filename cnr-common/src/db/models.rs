//! Database models

use serde::{Deserialize, Serialize};

/// District row (read-only for the restore tool)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct District {
    pub id: i64,
    pub name: String,
}

/// Constituency row
///
/// `name` is nullable in the store; a constituency without a name never
/// matches an ordinal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Constituency {
    pub id: i64,
    pub district_id: i64,
    pub name: Option<String>,
}

/// Candidate row as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Candidate {
    pub id: i64,
    pub name: String,
    pub party_name: String,
    pub constituency_id: i64,
}

/// Candidate to be inserted (id assigned by the store)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCandidate {
    pub name: String,
    pub party_name: String,
    pub constituency_id: i64,
}
