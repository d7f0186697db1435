//! cnr-restore library interface
//!
//! Reconciles a candidate nomination export (CSV) against the election
//! store: candidates present in the export but missing from the store are
//! inserted, candidates already present are left untouched.
//!
//! Pipeline per source line:
//! parser → district table → constituency resolver → candidate index → insert

pub mod constituency;
pub mod district;
pub mod error;
pub mod index;
pub mod parser;
pub mod reconcile;
pub mod stats;
pub mod store;

pub use crate::error::{Error, LineError, Result};
pub use crate::reconcile::{Reconciler, RestoreOptions};
pub use crate::stats::{LineOutcome, RestoreSummary};
pub use crate::store::{CandidateStore, SqliteStore};
