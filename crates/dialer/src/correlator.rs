//! Provider webhook correlation
//!
//! Telephony callbacks arrive unordered, duplicated and sometimes split
//! across call legs. The correlator resolves each event to a correlation
//! key and applies it through the store's merge-upsert, so a recording
//! that lands before its "completed" status is never lost and a retried
//! delivery changes nothing.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use fieldcall_core::{CallRecord, CallRecordPatch, CallStatus, OUTCOME_COMPLETED};

use crate::store::CallRecordStore;
use crate::DialerError;

/// Provider status callback, field-exact wire shape
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatusCallback {
    /// Primary call identifier
    pub call_sid: String,

    /// Outer call leg, present when this leg was relayed/bridged
    #[serde(default)]
    pub parent_call_sid: Option<String>,

    /// Provider-reported status, kept verbatim
    pub call_status: String,

    /// Dialed number
    pub to: String,

    /// Seconds elapsed, reported on terminal statuses
    #[serde(default)]
    pub duration: Option<u32>,
}

impl StatusCallback {
    /// The correlation key: the parent leg when present, else the primary
    /// identifier. Both legs of a relayed call converge on one record.
    pub fn correlation_key(&self) -> &str {
        self.parent_call_sid.as_deref().unwrap_or(&self.call_sid)
    }
}

/// Provider recording callback, field-exact wire shape
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordingCallback {
    /// Call the recording belongs to
    pub call_sid: String,

    /// Stable URL of the processed recording
    pub recording_url: String,

    /// Recording length in seconds
    #[serde(default)]
    pub recording_duration: Option<u32>,
}

/// Business identity delivered alongside a webhook (query side channel),
/// linking the provider call to a prospect and the agent who dialed
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallContext {
    #[serde(default)]
    pub prospect_id: Option<String>,

    #[serde(default)]
    pub caller_id: Option<String>,
}

/// Maps inbound provider events to call-record keys and applies them
pub struct CallRecordCorrelator {
    store: Arc<dyn CallRecordStore>,
    storage_timeout: Duration,
}

impl CallRecordCorrelator {
    pub fn new(store: Arc<dyn CallRecordStore>, storage_timeout: Duration) -> Self {
        Self {
            store,
            storage_timeout,
        }
    }

    /// Apply a status callback
    pub async fn apply_status(
        &self,
        callback: StatusCallback,
        context: CallContext,
    ) -> Result<CallRecord, DialerError> {
        let key = callback.correlation_key().to_string();

        tracing::info!(
            call_key = %key,
            call_sid = %callback.call_sid,
            status = %callback.call_status,
            to = %callback.to,
            "Status callback"
        );

        let mut patch = CallRecordPatch::new().status(CallStatus::from(callback.call_status));
        if let Some(prospect_id) = context.prospect_id {
            patch = patch.prospect_id(prospect_id);
        }
        if let Some(caller_id) = context.caller_id {
            patch = patch.caller_id(caller_id);
        }

        self.upsert_bounded(&key, patch).await
    }

    /// Apply a recording callback
    pub async fn apply_recording(
        &self,
        callback: RecordingCallback,
    ) -> Result<CallRecord, DialerError> {
        tracing::info!(
            call_key = %callback.call_sid,
            duration = ?callback.recording_duration,
            "Recording callback"
        );

        let mut patch = CallRecordPatch::new()
            .recording_url(callback.recording_url)
            .outcome(OUTCOME_COMPLETED);
        if let Some(duration) = callback.recording_duration {
            patch = patch.duration_seconds(duration);
        }

        self.upsert_bounded(&callback.call_sid, patch).await
    }

    /// Look up a record for read-side snapshots
    pub async fn get(&self, key: &str) -> Result<Option<CallRecord>, DialerError> {
        tokio::time::timeout(self.storage_timeout, self.store.get(key))
            .await
            .map_err(|_| DialerError::Storage("call-record lookup timed out".to_string()))?
    }

    /// Upsert with the bounded storage timeout; a timeout surfaces as a
    /// storage failure so the provider retries the delivery.
    async fn upsert_bounded(
        &self,
        key: &str,
        patch: CallRecordPatch,
    ) -> Result<CallRecord, DialerError> {
        tokio::time::timeout(self.storage_timeout, self.store.upsert(key, patch))
            .await
            .map_err(|_| {
                tracing::warn!(call_key = %key, "Call-record upsert timed out");
                DialerError::Storage("call-record upsert timed out".to_string())
            })?
    }
}
