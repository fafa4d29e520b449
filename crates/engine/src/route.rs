//! Greedy nearest-neighbor route sequencing

use fieldcall_core::{Coordinates, Prospect};

/// Order prospects into a visiting sequence from `origin`.
///
/// Greedy nearest-neighbor on planar degree distance: from a moving
/// current position (starting at the origin), repeatedly pick the closest
/// unvisited prospect, first-seen winning ties, and advance to it. The
/// result is always a permutation of the input; prospects without
/// coordinates are treated as sitting at (0, 0), matching the
/// partitioner's missing-latitude rule. O(k²) in the group size, which the
/// list limit keeps small.
pub fn sequence(origin: Coordinates, prospects: Vec<Prospect>) -> Vec<Prospect> {
    if prospects.len() <= 1 {
        return prospects;
    }

    let mut remaining = prospects;
    let mut ordered = Vec::with_capacity(remaining.len());
    let mut position = origin;

    while !remaining.is_empty() {
        let mut best: Option<(usize, f64)> = None;
        for (i, candidate) in remaining.iter().enumerate() {
            let location = candidate
                .coordinates
                .unwrap_or(Coordinates::new(0.0, 0.0));
            let distance = position.planar_distance(&location);
            // Strict less-than keeps the first-seen candidate on ties
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((i, distance));
            }
        }

        match best {
            Some((i, distance)) if distance.is_finite() => {
                let next = remaining.remove(i);
                position = next.coordinates.unwrap_or(Coordinates::new(0.0, 0.0));
                ordered.push(next);
            }
            // NaN coordinates leave no finite candidate; flush the rest in
            // input order so the output stays a permutation
            _ => {
                ordered.append(&mut remaining);
            }
        }
    }

    ordered
}
