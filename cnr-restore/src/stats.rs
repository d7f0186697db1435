//! Restore run statistics
//!
//! Only the three counters (restored, skipped, errors) are load-bearing;
//! the rest of the summary is for operators.

use crate::error::LineError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Terminal state of one source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Inserted (or, in a dry run, would have been inserted)
    Restored { candidate_id: Option<i64> },
    /// Already present in the store or earlier in the export
    Skipped,
    /// Could not be restored
    Errored(LineError),
    /// Blank or too short to be a candidate line
    Ignored,
}

/// One line that ended in `Errored`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineFailure {
    pub line_number: usize,
    pub candidate: String,
    pub reason: String,
}

/// Summary of a restore run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub dry_run: bool,
    pub restored: usize,
    pub skipped: usize,
    pub errors: usize,
    pub ignored: usize,
    pub failures: Vec<LineFailure>,
}

impl RestoreSummary {
    pub fn new(dry_run: bool) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            dry_run,
            restored: 0,
            skipped: 0,
            errors: 0,
            ignored: 0,
            failures: Vec::new(),
        }
    }

    /// Count one line's outcome
    pub fn record(&mut self, line_number: usize, candidate: &str, outcome: &LineOutcome) {
        match outcome {
            LineOutcome::Restored { .. } => self.restored += 1,
            LineOutcome::Skipped => self.skipped += 1,
            LineOutcome::Ignored => self.ignored += 1,
            LineOutcome::Errored(err) => {
                self.errors += 1;
                self.failures.push(LineFailure {
                    line_number,
                    candidate: candidate.to_string(),
                    reason: err.to_string(),
                });
            }
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Lines that reached a terminal state other than Ignored
    pub fn processed(&self) -> usize {
        self.restored + self.skipped + self.errors
    }

    pub fn display_string(&self) -> String {
        let verb = if self.dry_run { "Would restore" } else { "Restored" };
        format!(
            "{} {}, skipped {}, errors {} ({} lines ignored)",
            verb, self.restored, self.skipped, self.errors, self.ignored
        )
    }
}
