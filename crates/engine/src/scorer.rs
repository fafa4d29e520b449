//! Prospect priority scoring

use chrono::{DateTime, Utc};

use fieldcall_config::ScoringConfig;
use fieldcall_core::{Prospect, ScoredProspect};

/// Scores prospects for calling priority
///
/// Pure and deterministic given `now`: base score plus a recency term
/// (never-contacted prospects count as maximally stale) plus a specialty
/// weight, capped at the configured ceiling. With the stock configuration
/// every score lands in `[100, 300]`.
#[derive(Debug, Clone)]
pub struct PriorityScorer {
    config: ScoringConfig,
}

impl PriorityScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Score a prospect as of `now`
    pub fn score(&self, prospect: &Prospect, now: DateTime<Utc>) -> u32 {
        let recency = match prospect.days_since_contact(now) {
            // Never contacted is the most urgent case
            None => self.config.recency_cap,
            Some(days) => {
                let days = days.max(0) as u32;
                (days.saturating_mul(self.config.points_per_day)).min(self.config.recency_cap)
            }
        };

        let specialty = self.config.specialty_weight(prospect.specialty.as_deref());

        (self.config.base_score + recency + specialty).min(self.config.max_score)
    }

    /// Score a batch, keeping each prospect with its score
    pub fn score_all(&self, prospects: Vec<Prospect>, now: DateTime<Utc>) -> Vec<ScoredProspect> {
        prospects
            .into_iter()
            .map(|p| {
                let score = self.score(&p, now);
                ScoredProspect::new(p, score)
            })
            .collect()
    }
}
