//! In-memory directory implementations
//!
//! Reference backends for the core directory traits, used in development
//! and tests. Production deployments point the same traits at the real
//! persistence layer, which lives outside this workspace.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use fieldcall_core::{Error, FieldRep, FieldRepDirectory, Prospect, ProspectDirectory, Result};

/// In-memory prospect pool
#[derive(Default)]
pub struct InMemoryProspectDirectory {
    prospects: RwLock<HashMap<String, Prospect>>,
}

impl InMemoryProspectDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a prospect
    pub fn insert(&self, prospect: Prospect) {
        self.prospects
            .write()
            .insert(prospect.id.clone(), prospect);
    }

    /// Number of prospects held
    pub fn count(&self) -> usize {
        self.prospects.read().len()
    }
}

#[async_trait]
impl ProspectDirectory for InMemoryProspectDirectory {
    async fn list_by_territory(&self, territory: &str) -> Result<Vec<Prospect>> {
        Ok(self
            .prospects
            .read()
            .values()
            .filter(|p| p.territory == territory)
            .cloned()
            .collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Prospect>> {
        Ok(self.prospects.read().get(id).cloned())
    }

    async fn record_contact(&self, id: &str, outcome: &str, at: DateTime<Utc>) -> Result<()> {
        let mut prospects = self.prospects.write();
        let prospect = prospects
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(format!("prospect {id}")))?;
        prospect.last_contact_date = Some(at);
        prospect.last_call_outcome = Some(outcome.to_string());
        Ok(())
    }
}

/// In-memory field-rep roster
#[derive(Default)]
pub struct InMemoryFieldRepDirectory {
    reps: RwLock<HashMap<String, FieldRep>>,
}

impl InMemoryFieldRepDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field rep
    pub fn insert(&self, rep: FieldRep) {
        self.reps.write().insert(rep.id.clone(), rep);
    }
}

#[async_trait]
impl FieldRepDirectory for InMemoryFieldRepDirectory {
    async fn get(&self, id: &str) -> Result<Option<FieldRep>> {
        Ok(self.reps.read().get(id).cloned())
    }
}
