//! Error types for cnr-restore
//!
//! `Error` is fatal for a run. `LineError` is local to one source line and is
//! only ever counted, never propagated.

use thiserror::Error;

/// Run-level error
#[derive(Debug, Error)]
pub enum Error {
    /// The nomination export could not be read
    #[error("Source read failed after line {line}: {source}")]
    SourceRead {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// cnr-common error (configuration, store access)
    #[error(transparent)]
    Common(#[from] cnr_common::Error),
}

/// Result type for run-level operations
pub type Result<T> = std::result::Result<T, Error>;

/// Why a single source line could not be restored
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    /// District display name absent from the district table
    #[error("Unknown district: {0}")]
    UnknownDistrict(String),

    /// Neither the direct query nor the fallback scan found a constituency
    #[error("No constituency matching '{ordinal}' in district {district_id}")]
    UnresolvedConstituency { district_id: i64, ordinal: String },

    /// Store rejected the insert
    #[error("Insert failed: {0}")]
    StoreWrite(String),
}
