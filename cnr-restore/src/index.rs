//! In-memory index of candidates already in the store
//!
//! Built once per run, then kept current by the reconciler after each
//! successful insert so duplicates later in the same export are caught
//! without another store round-trip.

use crate::store::CandidateStore;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{info, warn};

/// Candidate identity: exact match on all three fields
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateKey {
    pub name: String,
    pub party_name: String,
    pub constituency_id: i64,
}

impl CandidateKey {
    pub fn new(name: impl Into<String>, party_name: impl Into<String>, constituency_id: i64) -> Self {
        Self {
            name: name.into(),
            party_name: party_name.into(),
            constituency_id,
        }
    }
}

/// Set of known candidate identities
#[derive(Debug, Default)]
pub struct CandidateIndex {
    keys: HashSet<CandidateKey>,
}

impl CandidateIndex {
    /// Load every candidate identity from the store
    ///
    /// A read failure leaves the index empty; the run continues and relies
    /// on the store to accept or reject each insert.
    pub async fn build<S: CandidateStore + ?Sized>(store: &S) -> Self {
        match store.candidate_keys().await {
            Ok(keys) => {
                let index: Self = keys.into_iter().collect();
                info!(existing = index.len(), "Loaded existing candidates");
                index
            }
            Err(e) => {
                warn!(error = %e, "Failed to load existing candidates, starting with an empty index");
                Self::default()
            }
        }
    }

    pub fn contains(&self, key: &CandidateKey) -> bool {
        self.keys.contains(key)
    }

    /// Record a key; returns `false` if it was already present
    pub fn add(&mut self, key: CandidateKey) -> bool {
        self.keys.insert(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<CandidateKey> for CandidateIndex {
    fn from_iter<I: IntoIterator<Item = CandidateKey>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}
