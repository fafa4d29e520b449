//! Core types and traits for the field-rep calling engine
//!
//! This crate provides foundational types used across all other crates:
//! - Prospect, field rep and coordinate entities
//! - Call records, statuses and the merge-upsert patch type
//! - Directory traits for the external persistence layer
//! - Shared error types

pub mod call;
pub mod error;
pub mod prospect;
pub mod traits;

pub use call::{
    CallRecord, CallRecordPatch, CallStatus, OUTCOME_COMPLETED, OUTCOME_IN_PROGRESS,
};
pub use error::{Error, Result};
pub use prospect::{Coordinates, FieldRep, Prospect, ScoredProspect};
pub use traits::{FieldRepDirectory, ProspectDirectory};
