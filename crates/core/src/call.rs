//! Call records and the merge-upsert patch type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome label a record is created with before any event lands
pub const OUTCOME_IN_PROGRESS: &str = "Call in progress";

/// Outcome label set when a recording arrives
pub const OUTCOME_COMPLETED: &str = "Call completed";

/// Call status as reported by the telephony provider
///
/// Providers can send statuses outside the known set and retries can
/// replay old ones, so the store accepts any transition and keeps the
/// provider's spelling verbatim (`Other` round-trips unchanged).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CallStatus {
    Pending,
    Initiated,
    Ringing,
    Answered,
    Completed,
    Failed,
    /// Provider-defined status outside the known set, stored verbatim
    Other(String),
}

impl CallStatus {
    pub fn as_str(&self) -> &str {
        match self {
            CallStatus::Pending => "pending",
            CallStatus::Initiated => "initiated",
            CallStatus::Ringing => "ringing",
            CallStatus::Answered => "answered",
            CallStatus::Completed => "completed",
            CallStatus::Failed => "failed",
            CallStatus::Other(s) => s,
        }
    }

    /// True once the provider reports the call finished, successfully or not
    pub fn is_terminal(&self) -> bool {
        matches!(self, CallStatus::Completed | CallStatus::Failed)
    }
}

impl From<String> for CallStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => CallStatus::Pending,
            "initiated" => CallStatus::Initiated,
            "ringing" => CallStatus::Ringing,
            "answered" => CallStatus::Answered,
            "completed" => CallStatus::Completed,
            "failed" => CallStatus::Failed,
            _ => CallStatus::Other(s),
        }
    }
}

impl From<&str> for CallStatus {
    fn from(s: &str) -> Self {
        CallStatus::from(s.to_string())
    }
}

impl From<CallStatus> for String {
    fn from(status: CallStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for CallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The canonical record a call's webhook events merge into
///
/// Uniquely addressed by `call_key`; at most one record exists per key.
/// Fields set by one event are never cleared by a later event that omits
/// them. Records are kept as call history and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    /// Correlation identity derived from the provider call identifier
    pub call_key: String,

    /// Latest provider-reported status
    pub status: CallStatus,

    /// Linked prospect, once known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prospect_id: Option<String>,

    /// Agent identity who placed or owns the call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller_id: Option<String>,

    /// Human- or system-assigned result label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,

    /// Free-form notes attached with a manual outcome
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Stable URL of the processed recording
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording_url: Option<String>,

    /// Call duration reported with the recording
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,

    /// Set when the record is first created, never overwritten
    pub attempted_at: DateTime<Utc>,
}

impl CallRecord {
    /// A freshly-attempted call: pending status, in-progress outcome
    pub fn attempted(call_key: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            call_key: call_key.into(),
            status: CallStatus::Pending,
            prospect_id: None,
            caller_id: None,
            outcome: Some(OUTCOME_IN_PROGRESS.to_string()),
            notes: None,
            recording_url: None,
            duration_seconds: None,
            attempted_at: at,
        }
    }

    /// Apply a patch: every field the patch carries overwrites the stored
    /// value; fields the patch omits are left untouched.
    pub fn apply(&mut self, patch: CallRecordPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(prospect_id) = patch.prospect_id {
            self.prospect_id = Some(prospect_id);
        }
        if let Some(caller_id) = patch.caller_id {
            self.caller_id = Some(caller_id);
        }
        if let Some(outcome) = patch.outcome {
            self.outcome = Some(outcome);
        }
        if let Some(notes) = patch.notes {
            self.notes = Some(notes);
        }
        if let Some(recording_url) = patch.recording_url {
            self.recording_url = Some(recording_url);
        }
        if let Some(duration_seconds) = patch.duration_seconds {
            self.duration_seconds = Some(duration_seconds);
        }
    }
}

/// A partial update to a call record
///
/// `None` means "this event says nothing about the field", not "clear it";
/// the distinction is the whole merge-upsert contract, so it lives in the
/// type rather than in caller convention.
#[derive(Debug, Clone, Default)]
pub struct CallRecordPatch {
    pub status: Option<CallStatus>,
    pub prospect_id: Option<String>,
    pub caller_id: Option<String>,
    pub outcome: Option<String>,
    pub notes: Option<String>,
    pub recording_url: Option<String>,
    pub duration_seconds: Option<u32>,
}

impl CallRecordPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: CallStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn prospect_id(mut self, id: impl Into<String>) -> Self {
        self.prospect_id = Some(id.into());
        self
    }

    pub fn caller_id(mut self, id: impl Into<String>) -> Self {
        self.caller_id = Some(id.into());
        self
    }

    pub fn outcome(mut self, outcome: impl Into<String>) -> Self {
        self.outcome = Some(outcome.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn recording_url(mut self, url: impl Into<String>) -> Self {
        self.recording_url = Some(url.into());
        self
    }

    pub fn duration_seconds(mut self, seconds: u32) -> Self {
        self.duration_seconds = Some(seconds);
        self
    }

    /// True when the patch carries no fields at all
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.prospect_id.is_none()
            && self.caller_id.is_none()
            && self.outcome.is_none()
            && self.notes.is_none()
            && self.recording_url.is_none()
            && self.duration_seconds.is_none()
    }
}
