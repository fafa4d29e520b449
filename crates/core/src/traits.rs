//! Directory traits for the out-of-scope persistence layer
//!
//! The engine consumes prospects and field reps through these seams and
//! mirrors call outcomes back through them. Durable backends live outside
//! this workspace; `fieldcall-server` ships in-memory reference
//! implementations for development and tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::prospect::{FieldRep, Prospect};

/// Read/write access to the prospect pool
///
/// # Example
///
/// ```ignore
/// let directory: Arc<dyn ProspectDirectory> = Arc::new(InMemoryDirectory::new());
/// let pool = directory.list_by_territory("north").await?;
/// ```
#[async_trait]
pub trait ProspectDirectory: Send + Sync {
    /// All prospects in a territory
    async fn list_by_territory(&self, territory: &str) -> Result<Vec<Prospect>>;

    /// Look up a single prospect
    async fn get(&self, id: &str) -> Result<Option<Prospect>>;

    /// Mirror a recorded call outcome onto the prospect: sets
    /// `last_contact_date` to `at` and `last_call_outcome` to `outcome`.
    ///
    /// Writes absolute values, so the call is idempotent and safe to retry.
    async fn record_contact(&self, id: &str, outcome: &str, at: DateTime<Utc>) -> Result<()>;
}

/// Read access to field representatives
#[async_trait]
pub trait FieldRepDirectory: Send + Sync {
    /// Look up a field rep
    async fn get(&self, id: &str) -> Result<Option<FieldRep>>;
}
