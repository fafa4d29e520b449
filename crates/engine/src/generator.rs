//! Calling-list generation

use chrono::{DateTime, Utc};

use fieldcall_config::{RoutingConfig, ScoringConfig};
use fieldcall_core::{FieldRep, Prospect};

use crate::partition::partition;
use crate::route::sequence;
use crate::scorer::PriorityScorer;

/// Builds a field rep's prioritized, route-ordered calling list
///
/// Pipeline: territory filter -> priority scoring -> top-N cut ->
/// geographic partition -> per-group route from the rep's home base.
/// Reps without a usable home base get the priority-ordered list with no
/// routing applied; that is the designed fallback, not a failure.
#[derive(Debug, Clone)]
pub struct CallingListGenerator {
    scorer: PriorityScorer,
    routing: RoutingConfig,
}

impl CallingListGenerator {
    pub fn new(scoring: ScoringConfig, routing: RoutingConfig) -> Self {
        Self {
            scorer: PriorityScorer::new(scoring),
            routing,
        }
    }

    /// Generate the calling list for `rep` from the full prospect pool
    pub fn generate(
        &self,
        all_prospects: Vec<Prospect>,
        rep: &FieldRep,
        now: DateTime<Utc>,
    ) -> Vec<Prospect> {
        let territory_pool: Vec<Prospect> = all_prospects
            .into_iter()
            .filter(|p| p.territory == rep.territory)
            .collect();

        let mut scored = self.scorer.score_all(territory_pool, now);
        // Stable sort keeps the incoming order for equal scores
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(self.routing.list_limit);

        let top: Vec<Prospect> = scored.into_iter().map(|s| s.prospect).collect();

        let origin = match rep.routing_origin() {
            Some(origin) => origin,
            None => {
                tracing::debug!(
                    rep_id = %rep.id,
                    count = top.len(),
                    "No home base; returning priority order without routing"
                );
                return top;
            }
        };

        let groups = partition(top, self.routing.cluster_count);
        let mut list = Vec::new();
        for group in groups {
            // Every group routes independently from the same home base
            list.extend(sequence(origin, group));
        }

        tracing::debug!(
            rep_id = %rep.id,
            territory = %rep.territory,
            count = list.len(),
            "Calling list generated"
        );

        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn generator() -> CallingListGenerator {
        CallingListGenerator::new(ScoringConfig::default(), RoutingConfig::default())
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    /// Build prospects whose scores come out as given, using recency:
    /// score = 100 + min(days * 2, 50) + 15 (no specialty).
    fn prospect_scoring(id: &str, days_ago: i64) -> Prospect {
        Prospect::new(id, "north").last_contacted(now() - Duration::days(days_ago))
    }

    #[test]
    fn test_priority_order_without_home_base() {
        // Recency spread of 0, 25 and 10 days scores 115, 165 and 135
        let pool = vec![
            prospect_scoring("fresh", 0),
            prospect_scoring("stale", 25),
            prospect_scoring("mid", 10),
        ];
        let rep = FieldRep::new("r-1", "north");

        let list = generator().generate(pool, &rep, now());
        let ids: Vec<&str> = list.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["stale", "mid", "fresh"]);
    }

    #[test]
    fn test_filters_to_rep_territory() {
        let pool = vec![
            Prospect::new("mine", "north"),
            Prospect::new("theirs", "south"),
            Prospect::new("also-mine", "north"),
        ];
        let rep = FieldRep::new("r-1", "north");

        let list = generator().generate(pool, &rep, now());
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|p| p.territory == "north"));
    }

    #[test]
    fn test_caps_at_list_limit() {
        let pool: Vec<Prospect> = (0..80)
            .map(|i| Prospect::new(format!("p{i}"), "north"))
            .collect();
        let rep = FieldRep::new("r-1", "north");

        let list = generator().generate(pool, &rep, now());
        assert_eq!(list.len(), 50);
    }

    #[test]
    fn test_stable_sort_keeps_tie_order() {
        // Identical prospects score identically; input order must survive
        let pool = vec![
            Prospect::new("first", "north"),
            Prospect::new("second", "north"),
            Prospect::new("third", "north"),
        ];
        let rep = FieldRep::new("r-1", "north");

        let list = generator().generate(pool, &rep, now());
        let ids: Vec<&str> = list.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_routing_applied_with_home_base() {
        // Nine geocoded prospects across a latitude spread; with a home
        // base the list is partitioned into 3 groups and each group is
        // routed, so the result is a permutation of the same nine.
        let pool: Vec<Prospect> = (0..9)
            .map(|i| {
                Prospect::new(format!("p{i}"), "north").at(40.0 + i as f64 * 0.1, -87.0)
            })
            .collect();
        let rep = FieldRep::new("r-1", "north").home(40.0, -87.0);

        let list = generator().generate(pool, &rep, now());
        assert_eq!(list.len(), 9);
        let mut ids: Vec<String> = list.iter().map(|p| p.id.clone()).collect();
        ids.sort();
        let mut expected: Vec<String> = (0..9).map(|i| format!("p{i}")).collect();
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_groups_concatenated_in_partition_order() {
        // Six prospects at ascending latitude, all scoring the same.
        // Partition deals latitudes [1..6] into groups {1,4}, {2,5}, {3,6};
        // each group routes nearest-first from home at latitude 0, so the
        // concatenation is 1,4 then 2,5 then 3,6.
        let pool: Vec<Prospect> = (1..=6)
            .map(|i| Prospect::new(format!("p{i}"), "north").at(i as f64, 0.0))
            .collect();
        let rep = FieldRep::new("r-1", "north").home(0.0, 0.1);

        let list = generator().generate(pool, &rep, now());
        let ids: Vec<&str> = list.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p4", "p2", "p5", "p3", "p6"]);
    }

    #[test]
    fn test_null_island_home_means_no_routing() {
        let pool = vec![
            prospect_scoring("stale", 25),
            prospect_scoring("fresh", 0),
        ];
        let rep = FieldRep::new("r-1", "north").home(0.0, 0.0);

        let list = generator().generate(pool, &rep, now());
        let ids: Vec<&str> = list.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["stale", "fresh"]);
    }

    #[test]
    fn test_empty_pool_yields_empty_list() {
        let rep = FieldRep::new("r-1", "north").home(40.0, -87.0);
        let list = generator().generate(Vec::new(), &rep, now());
        assert!(list.is_empty());
    }
}
