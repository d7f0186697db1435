//! Restore run driver
//!
//! Streams the export line by line, strictly in file order, one line in
//! flight at a time:
//!
//! 1. Blank or short line → Ignored
//! 2. District name not in the table → Errored
//! 3. No constituency for the ordinal → Errored
//! 4. Identity already known → Skipped
//! 5. Insert; failure → Errored (identity not recorded), success → Restored
//!
//! Per-line failures never abort the run. Only a failure to read the export
//! itself is fatal. Inserts are independent: nothing is rolled back if the
//! run stops early, and a failed insert is not retried within the run.

use crate::constituency::ConstituencyResolver;
use crate::district::DistrictTable;
use crate::error::{Error, LineError, Result};
use crate::index::{CandidateIndex, CandidateKey};
use crate::parser::{parse_line, SourceReader, SourceRecord};
use crate::stats::{LineOutcome, RestoreSummary};
use crate::store::CandidateStore;
use cnr_common::db::NewCandidate;
use tokio::io::AsyncBufRead;
use tracing::{debug, info, warn};

/// Run options
#[derive(Debug, Clone, Copy, Default)]
pub struct RestoreOptions {
    /// Resolve and diff only; never insert
    pub dry_run: bool,
}

/// Reconciles a nomination export against a candidate store
pub struct Reconciler<S> {
    store: S,
    districts: DistrictTable,
    constituencies: ConstituencyResolver,
    options: RestoreOptions,
}

impl<S: CandidateStore> Reconciler<S> {
    pub fn new(store: S, districts: DistrictTable) -> Self {
        Self {
            store,
            districts,
            constituencies: ConstituencyResolver::new(),
            options: RestoreOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RestoreOptions) -> Self {
        self.options = options;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reconcile every line of `source` (header line first)
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, source: R) -> Result<RestoreSummary> {
        let mut summary = RestoreSummary::new(self.options.dry_run);
        info!(
            run_id = %summary.run_id,
            dry_run = self.options.dry_run,
            districts = self.districts.len(),
            "Starting restore run"
        );

        let mut index = CandidateIndex::build(&self.store).await;
        let mut reader = SourceReader::new(source);

        loop {
            let line = match reader.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(source) => {
                    return Err(Error::SourceRead {
                        line: reader.lines_read(),
                        source,
                    })
                }
            };

            let fields = parse_line(&line.text);
            let (candidate, outcome) = match SourceRecord::from_fields(&fields) {
                Some(record) => {
                    let outcome = self.process_record(&mut index, &record).await;
                    (record.name, outcome)
                }
                None => (String::new(), LineOutcome::Ignored),
            };

            log_outcome(line.line_number, &candidate, &outcome);
            summary.record(line.line_number, &candidate, &outcome);
        }

        summary.finish();
        info!(
            run_id = %summary.run_id,
            restored = summary.restored,
            skipped = summary.skipped,
            errors = summary.errors,
            ignored = summary.ignored,
            "{}",
            summary.display_string()
        );

        Ok(summary)
    }

    /// Take one parsed record to its terminal state
    pub async fn process_record(
        &mut self,
        index: &mut CandidateIndex,
        record: &SourceRecord,
    ) -> LineOutcome {
        let Some(district_id) = self.districts.resolve(&record.district) else {
            return LineOutcome::Errored(LineError::UnknownDistrict(record.district.clone()));
        };

        let Some(constituency_id) = self
            .constituencies
            .resolve(&self.store, district_id, &record.ordinal)
            .await
        else {
            return LineOutcome::Errored(LineError::UnresolvedConstituency {
                district_id,
                ordinal: record.ordinal.clone(),
            });
        };

        let key = CandidateKey::new(record.name.clone(), record.party_name.clone(), constituency_id);
        if index.contains(&key) {
            return LineOutcome::Skipped;
        }

        if self.options.dry_run {
            index.add(key);
            return LineOutcome::Restored { candidate_id: None };
        }

        let candidate = NewCandidate {
            name: key.name.clone(),
            party_name: key.party_name.clone(),
            constituency_id,
        };

        match self.store.insert_candidate(&candidate).await {
            Ok(id) => {
                index.add(key);
                LineOutcome::Restored {
                    candidate_id: Some(id),
                }
            }
            Err(e) => LineOutcome::Errored(LineError::StoreWrite(e.to_string())),
        }
    }
}

fn log_outcome(line: usize, candidate: &str, outcome: &LineOutcome) {
    match outcome {
        LineOutcome::Restored { candidate_id } => match candidate_id {
            Some(id) => info!(line, candidate, candidate_id = id, "Restored"),
            None => info!(line, candidate, "Would restore"),
        },
        LineOutcome::Skipped => debug!(line, candidate, "Skipped, already present"),
        LineOutcome::Ignored => debug!(line, "Ignored blank or short line"),
        LineOutcome::Errored(err) => warn!(line, candidate, error = %err, "Line not restored"),
    }
}
