//! Development seed data
//!
//! The in-memory directories start empty; `FIELDCALL_SEED` points at a
//! JSON file of prospects and field reps to load at startup. Production
//! deployments use real directory backends and never set it.

use serde::Deserialize;

use fieldcall_core::{FieldRep, Prospect};
use fieldcall_server::{InMemoryFieldRepDirectory, InMemoryProspectDirectory};

#[derive(Debug, Deserialize)]
struct SeedData {
    #[serde(default)]
    prospects: Vec<Prospect>,
    #[serde(default)]
    field_reps: Vec<FieldRep>,
}

/// Load a seed file into the in-memory directories
pub fn load_seed(
    path: &str,
    prospects: &InMemoryProspectDirectory,
    field_reps: &InMemoryFieldRepDirectory,
) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(path)?;
    let seed: SeedData = serde_json::from_str(&raw)?;

    let prospect_count = seed.prospects.len();
    let rep_count = seed.field_reps.len();

    for prospect in seed.prospects {
        prospects.insert(prospect);
    }
    for rep in seed.field_reps {
        field_reps.insert(rep);
    }

    tracing::info!(
        prospects = prospect_count,
        field_reps = rep_count,
        %path,
        "Seed data loaded"
    );

    Ok(())
}
