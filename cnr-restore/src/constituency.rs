//! Constituency resolution from a district id and an ordinal
//!
//! Constituency names embed descriptive text around the ordinal
//! (e.g. "काठमाडौं निर्वाचन क्षेत्र नं. 3"), so lookup is by substring:
//!
//! 1. **Direct query**: constituencies of the district whose name contains
//!    the ordinal, first row wins.
//! 2. **Fallback scan**: when the direct query returns nothing or fails,
//!    every constituency of the district is scanned for the bare ordinal or
//!    the ordinal prefixed with `नं.`; first match wins.
//!
//! Matching is approximate on purpose and can over-match: ordinal "1" also
//! matches "नं. 10". Rows come back ordered by id, so the lowest id wins.

use crate::store::CandidateStore;
use cnr_common::db::Constituency;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Marker that precedes the ordinal in constituency names
pub const ORDINAL_MARKER: &str = "नं.";

/// Two-phase constituency resolver with a per-run cache
#[derive(Debug, Default)]
pub struct ConstituencyResolver {
    cache: HashMap<(i64, String), i64>,
}

impl ConstituencyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `ordinal` within `district_id`
    ///
    /// Store failures are logged and treated as "no match".
    pub async fn resolve<S: CandidateStore + ?Sized>(
        &mut self,
        store: &S,
        district_id: i64,
        ordinal: &str,
    ) -> Option<i64> {
        let cache_key = (district_id, ordinal.to_string());
        if let Some(id) = self.cache.get(&cache_key) {
            return Some(*id);
        }

        let resolved = match Self::direct_lookup(store, district_id, ordinal).await {
            Some(id) => Some(id),
            None => Self::fallback_scan(store, district_id, ordinal).await,
        };

        if let Some(id) = resolved {
            self.cache.insert(cache_key, id);
        }
        resolved
    }

    async fn direct_lookup<S: CandidateStore + ?Sized>(
        store: &S,
        district_id: i64,
        ordinal: &str,
    ) -> Option<i64> {
        match store.constituencies_matching(district_id, ordinal).await {
            Ok(rows) => {
                let id = rows.first().map(|row| row.id);
                if let Some(id) = id {
                    debug!(district_id, ordinal, constituency_id = id, "Constituency matched by query");
                }
                id
            }
            Err(e) => {
                warn!(district_id, ordinal, error = %e, "Constituency query failed, falling back to scan");
                None
            }
        }
    }

    async fn fallback_scan<S: CandidateStore + ?Sized>(
        store: &S,
        district_id: i64,
        ordinal: &str,
    ) -> Option<i64> {
        match store.constituencies_in_district(district_id).await {
            Ok(rows) => {
                let id = scan_for_ordinal(&rows, ordinal);
                if let Some(id) = id {
                    debug!(district_id, ordinal, constituency_id = id, "Constituency matched by scan");
                }
                id
            }
            Err(e) => {
                warn!(district_id, ordinal, error = %e, "Constituency scan failed");
                None
            }
        }
    }
}

/// First constituency whose name contains the ordinal or `नं. {ordinal}`
///
/// Rows without a name never match.
pub fn scan_for_ordinal(rows: &[Constituency], ordinal: &str) -> Option<i64> {
    let marked = format!("{} {}", ORDINAL_MARKER, ordinal);

    rows.iter()
        .find(|row| {
            row.name
                .as_deref()
                .is_some_and(|name| name.contains(ordinal) || name.contains(&marked))
        })
        .map(|row| row.id)
}
