//! Call-record storage
//!
//! The store is the one shared mutable resource in the engine. All
//! mutation funnels through the merge-upsert contract; concurrent upserts
//! to the same key serialize at that key, upserts to different keys do not
//! contend.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use fieldcall_core::{CallRecord, CallRecordPatch};

use crate::DialerError;

/// Keyed storage of call records
///
/// Implementations must guarantee at most one record per key even when
/// two upserts for a previously-unseen key race, and must never let one
/// upsert's fields overwrite another's concurrently-written fields
/// (no lost updates).
#[async_trait]
pub trait CallRecordStore: Send + Sync {
    /// Merge-upsert: create the record with defaults if the key is new,
    /// then overwrite exactly the fields the patch carries.
    async fn upsert(&self, key: &str, patch: CallRecordPatch) -> Result<CallRecord, DialerError>;

    /// Point lookup by call key
    async fn get(&self, key: &str) -> Result<Option<CallRecord>, DialerError>;

    /// Most recent record for a (prospect, caller) pair, by attempt time
    async fn latest_for_pair(
        &self,
        prospect_id: &str,
        caller_id: &str,
    ) -> Result<Option<CallRecord>, DialerError>;

    /// All records for a prospect, most recent attempt first
    async fn list_for_prospect(&self, prospect_id: &str) -> Result<Vec<CallRecord>, DialerError>;
}

struct StoredRecord {
    record: CallRecord,
    /// Creation order; breaks attempted_at ties in latest-record queries
    seq: u64,
}

/// In-memory reference implementation
///
/// The dashmap entry API holds the key's shard lock for the whole
/// read-merge-write, so same-key upserts serialize and a racing pair of
/// first-inserts resolves to one create plus one merge. Records are
/// retained as call history and never deleted.
#[derive(Default)]
pub struct InMemoryCallRecordStore {
    records: DashMap<String, StoredRecord>,
    next_seq: AtomicU64,
}

impl InMemoryCallRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held
    pub fn count(&self) -> usize {
        self.records.len()
    }
}

#[async_trait]
impl CallRecordStore for InMemoryCallRecordStore {
    async fn upsert(&self, key: &str, patch: CallRecordPatch) -> Result<CallRecord, DialerError> {
        let mut entry = self.records.entry(key.to_string()).or_insert_with(|| {
            tracing::debug!(call_key = %key, "Creating call record");
            StoredRecord {
                record: CallRecord::attempted(key, Utc::now()),
                seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
            }
        });
        entry.record.apply(patch);
        Ok(entry.record.clone())
    }

    async fn get(&self, key: &str) -> Result<Option<CallRecord>, DialerError> {
        Ok(self.records.get(key).map(|e| e.record.clone()))
    }

    async fn latest_for_pair(
        &self,
        prospect_id: &str,
        caller_id: &str,
    ) -> Result<Option<CallRecord>, DialerError> {
        let mut latest: Option<(chrono::DateTime<Utc>, u64, CallRecord)> = None;
        for entry in self.records.iter() {
            let record = &entry.record;
            if record.prospect_id.as_deref() != Some(prospect_id)
                || record.caller_id.as_deref() != Some(caller_id)
            {
                continue;
            }
            let candidate = (record.attempted_at, entry.seq);
            if latest
                .as_ref()
                .map_or(true, |(at, seq, _)| candidate > (*at, *seq))
            {
                latest = Some((record.attempted_at, entry.seq, record.clone()));
            }
        }
        Ok(latest.map(|(_, _, record)| record))
    }

    async fn list_for_prospect(&self, prospect_id: &str) -> Result<Vec<CallRecord>, DialerError> {
        let mut matches: Vec<(chrono::DateTime<Utc>, u64, CallRecord)> = self
            .records
            .iter()
            .filter(|e| e.record.prospect_id.as_deref() == Some(prospect_id))
            .map(|e| (e.record.attempted_at, e.seq, e.record.clone()))
            .collect();
        matches.sort_by(|a, b| (b.0, b.1).cmp(&(a.0, a.1)));
        Ok(matches.into_iter().map(|(_, _, record)| record).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldcall_core::{CallStatus, OUTCOME_IN_PROGRESS};

    #[tokio::test]
    async fn test_first_upsert_creates_with_defaults() {
        let store = InMemoryCallRecordStore::new();

        let record = store
            .upsert("CA1", CallRecordPatch::new().status(CallStatus::Initiated))
            .await
            .unwrap();

        assert_eq!(record.call_key, "CA1");
        assert_eq!(record.status, CallStatus::Initiated);
        assert_eq!(record.outcome.as_deref(), Some(OUTCOME_IN_PROGRESS));
        assert_eq!(store.count(), 1);
    }

    #[tokio::test]
    async fn test_upsert_is_idempotent() {
        let store = InMemoryCallRecordStore::new();
        let patch = || {
            CallRecordPatch::new()
                .status(CallStatus::Completed)
                .recording_url("https://rec/1")
        };

        let once = store.upsert("CA1", patch()).await.unwrap();
        let twice = store.upsert("CA1", patch()).await.unwrap();

        assert_eq!(once.status, twice.status);
        assert_eq!(once.recording_url, twice.recording_url);
        assert_eq!(once.attempted_at, twice.attempted_at);
        assert_eq!(store.count(), 1);
    }

    #[tokio::test]
    async fn test_merge_never_clears_by_absence() {
        let store = InMemoryCallRecordStore::new();

        store
            .upsert("CA1", CallRecordPatch::new().recording_url("https://rec/x"))
            .await
            .unwrap();
        let record = store
            .upsert("CA1", CallRecordPatch::new().status(CallStatus::Completed))
            .await
            .unwrap();

        assert_eq!(record.recording_url.as_deref(), Some("https://rec/x"));
        assert_eq!(record.status, CallStatus::Completed);
    }

    #[tokio::test]
    async fn test_attempted_at_never_overwritten() {
        let store = InMemoryCallRecordStore::new();

        let created = store.upsert("CA1", CallRecordPatch::new()).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let updated = store
            .upsert("CA1", CallRecordPatch::new().status(CallStatus::Ringing))
            .await
            .unwrap();

        assert_eq!(created.attempted_at, updated.attempted_at);
    }

    #[tokio::test]
    async fn test_latest_for_pair_orders_by_attempt() {
        let store = InMemoryCallRecordStore::new();

        store
            .upsert("CA-old", CallRecordPatch::new().prospect_id("p-1").caller_id("u-1"))
            .await
            .unwrap();
        store
            .upsert("CA-new", CallRecordPatch::new().prospect_id("p-1").caller_id("u-1"))
            .await
            .unwrap();
        store
            .upsert("CA-other", CallRecordPatch::new().prospect_id("p-2").caller_id("u-1"))
            .await
            .unwrap();

        let latest = store.latest_for_pair("p-1", "u-1").await.unwrap().unwrap();
        assert_eq!(latest.call_key, "CA-new");

        let none = store.latest_for_pair("p-1", "u-9").await.unwrap();
        assert!(none.is_none());
    }

    #[tokio::test]
    async fn test_list_for_prospect_most_recent_first() {
        let store = InMemoryCallRecordStore::new();
        for key in ["CA1", "CA2", "CA3"] {
            store
                .upsert(key, CallRecordPatch::new().prospect_id("p-1"))
                .await
                .unwrap();
        }

        let history = store.list_for_prospect("p-1").await.unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].call_key, "CA3");
        assert_eq!(history[2].call_key, "CA1");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_upserts_one_record_no_lost_fields() {
        use std::sync::Arc;

        let store = Arc::new(InMemoryCallRecordStore::new());

        // Simultaneous status and recording callbacks for one unseen key
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let patch = if i % 2 == 0 {
                    CallRecordPatch::new().status(CallStatus::Completed)
                } else {
                    CallRecordPatch::new().recording_url("https://rec/1")
                };
                store.upsert("CA-race", patch).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.count(), 1);
        let record = store.get("CA-race").await.unwrap().unwrap();
        assert_eq!(record.status, CallStatus::Completed);
        assert_eq!(record.recording_url.as_deref(), Some("https://rec/1"));
    }
}
