//! Geographic partitioning of a prioritized list
//!
//! This is a latitude-band round-robin, not spatial clustering: the list is
//! sorted by latitude and dealt into groups by index modulo. Group sizes
//! come out even, but two prospects sharing a latitude band can land in
//! different groups and distant prospects can share one. Downstream
//! consumers depend on this exact assignment, so it is kept as-is rather
//! than replaced with a real clustering pass.

use fieldcall_core::Prospect;

/// Split prospects into exactly `groups` groups by latitude order.
///
/// Element at ascending-latitude position `i` goes to group `i % groups`;
/// prospects without coordinates sort as latitude 0. Groups may be empty
/// when the input is smaller than `groups`. The latitude sort is stable,
/// so equal latitudes keep their incoming order.
pub fn partition(prospects: Vec<Prospect>, groups: usize) -> Vec<Vec<Prospect>> {
    if groups == 0 {
        return Vec::new();
    }

    let mut sorted = prospects;
    sorted.sort_by(|a, b| a.latitude_or_zero().total_cmp(&b.latitude_or_zero()));

    let mut out: Vec<Vec<Prospect>> = (0..groups).map(|_| Vec::new()).collect();
    for (i, prospect) in sorted.into_iter().enumerate() {
        out[i % groups].push(prospect);
    }
    out
}
