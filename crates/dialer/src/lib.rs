//! Call-record correlation
//!
//! Features:
//! - Merge-upsert call-record store (field-level last-write-wins, fields
//!   never cleared by absence)
//! - Webhook correlator that funnels unordered, possibly duplicated
//!   provider callbacks into one canonical record per call
//! - Manual outcome recording against the most recent call for a
//!   (prospect, caller) pair

pub mod correlator;
pub mod outcome;
pub mod store;

pub use correlator::{CallContext, CallRecordCorrelator, RecordingCallback, StatusCallback};
pub use outcome::{OutcomeRecorder, OutcomeRequest};
pub use store::{CallRecordStore, InMemoryCallRecordStore};

use thiserror::Error;

/// Dialer errors
#[derive(Error, Debug)]
pub enum DialerError {
    /// No initiated call exists for the pair; outcomes cannot be recorded
    /// ad hoc. A business-rule failure, not a storage defect.
    #[error("No call history for prospect {prospect_id} and caller {caller_id}")]
    NoCallHistory {
        prospect_id: String,
        caller_id: String,
    },

    /// Transient failure reaching the call-record store; safe to retry
    /// since upserts are idempotent.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Failure in the prospect/field-rep directory
    #[error("Directory error: {0}")]
    Directory(String),
}

impl From<fieldcall_core::Error> for DialerError {
    fn from(err: fieldcall_core::Error) -> Self {
        DialerError::Directory(err.to_string())
    }
}
