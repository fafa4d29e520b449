//! Manual outcome recording

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use fieldcall_core::{CallRecord, CallRecordPatch, ProspectDirectory};

use crate::store::CallRecordStore;
use crate::DialerError;

/// Manual outcome submission
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeRequest {
    pub prospect_id: String,
    pub caller_id: String,
    pub outcome: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Attaches a human-entered outcome to the most recent call for a
/// (prospect, caller) pair and mirrors the result onto the prospect
///
/// An outcome can only be attached to a call that went through the dialer;
/// with no call history the request fails as a business-rule error before
/// any write happens. The record update and the prospect mirror are two
/// separate writes: a failure between them leaves the outcome on the call
/// record but not on the prospect, and a retry of the same request
/// converges because both writes set absolute values.
pub struct OutcomeRecorder {
    store: Arc<dyn CallRecordStore>,
    directory: Arc<dyn ProspectDirectory>,
}

impl OutcomeRecorder {
    pub fn new(store: Arc<dyn CallRecordStore>, directory: Arc<dyn ProspectDirectory>) -> Self {
        Self { store, directory }
    }

    /// Record an outcome as of `now`
    pub async fn record(
        &self,
        request: OutcomeRequest,
        now: DateTime<Utc>,
    ) -> Result<CallRecord, DialerError> {
        let latest = self
            .store
            .latest_for_pair(&request.prospect_id, &request.caller_id)
            .await?;

        let record = match latest {
            Some(record) if !record.call_key.is_empty() => record,
            _ => {
                return Err(DialerError::NoCallHistory {
                    prospect_id: request.prospect_id,
                    caller_id: request.caller_id,
                })
            }
        };

        let mut patch = CallRecordPatch::new().outcome(request.outcome.clone());
        if let Some(notes) = request.notes {
            patch = patch.notes(notes);
        }
        let updated = self.store.upsert(&record.call_key, patch).await?;

        tracing::info!(
            call_key = %updated.call_key,
            prospect_id = %request.prospect_id,
            outcome = %request.outcome,
            "Outcome recorded"
        );

        // Second, non-atomic step: mirror onto the prospect. A failure
        // here leaves the call record updated; the caller retries.
        if let Err(err) = self
            .directory
            .record_contact(&request.prospect_id, &request.outcome, now)
            .await
        {
            tracing::warn!(
                prospect_id = %request.prospect_id,
                error = %err,
                "Outcome saved but prospect mirror failed"
            );
            return Err(err.into());
        }

        Ok(updated)
    }
}
