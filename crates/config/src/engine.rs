//! Scoring, routing and storage tuning
//!
//! Every default equals the constant the engine shipped with, so an empty
//! configuration file reproduces the stock behavior exactly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Priority scoring parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Score every prospect starts from
    #[serde(default = "default_base_score")]
    pub base_score: u32,

    /// Points added per day since last contact
    #[serde(default = "default_points_per_day")]
    pub points_per_day: u32,

    /// Cap on the recency term; never-contacted prospects get the full cap
    #[serde(default = "default_recency_cap")]
    pub recency_cap: u32,

    /// Points for a specialty missing from the weight table
    #[serde(default = "default_unknown_specialty")]
    pub unknown_specialty_weight: u32,

    /// Hard ceiling on the final score
    #[serde(default = "default_max_score")]
    pub max_score: u32,

    /// Specialty label -> weight
    #[serde(default = "default_specialty_weights")]
    pub specialty_weights: HashMap<String, u32>,
}

fn default_base_score() -> u32 {
    100
}

fn default_points_per_day() -> u32 {
    2
}

fn default_recency_cap() -> u32 {
    50
}

fn default_unknown_specialty() -> u32 {
    15
}

fn default_max_score() -> u32 {
    300
}

fn default_specialty_weights() -> HashMap<String, u32> {
    HashMap::from([
        ("Chiropractor".to_string(), 30),
        ("Medical".to_string(), 28),
        ("Dental".to_string(), 25),
        ("Physical Therapy".to_string(), 22),
        ("Dermatology".to_string(), 20),
    ])
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: default_base_score(),
            points_per_day: default_points_per_day(),
            recency_cap: default_recency_cap(),
            unknown_specialty_weight: default_unknown_specialty(),
            max_score: default_max_score(),
            specialty_weights: default_specialty_weights(),
        }
    }
}

impl ScoringConfig {
    /// Weight for a specialty label, falling back to the unknown weight
    pub fn specialty_weight(&self, specialty: Option<&str>) -> u32 {
        specialty
            .and_then(|s| self.specialty_weights.get(s).copied())
            .unwrap_or(self.unknown_specialty_weight)
    }
}

/// Calling-list sizing and routing parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Maximum prospects in a generated calling list
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,

    /// Number of geographic groups the list is split into
    #[serde(default = "default_cluster_count")]
    pub cluster_count: usize,
}

fn default_list_limit() -> usize {
    50
}

fn default_cluster_count() -> usize {
    3
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            list_limit: default_list_limit(),
            cluster_count: default_cluster_count(),
        }
    }
}

/// Call-record storage boundary tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Upper bound on a single store operation, in milliseconds.
    /// A timed-out operation is reported to the webhook sender as a
    /// storage failure so the provider retries it.
    #[serde(default = "default_upsert_timeout_ms")]
    pub upsert_timeout_ms: u64,
}

fn default_upsert_timeout_ms() -> u64 {
    5_000
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upsert_timeout_ms: default_upsert_timeout_ms(),
        }
    }
}
