use log::debug;

use crate::types::{Direction, TileVariation};

/// Derives the per-direction adjacency lists for a finalized variation list.
///
/// For every variation and every direction, the full list is scanned in index
/// order and candidate `j` is recorded when the candidate's opposite-facing
/// edge is compatible with the variation's own edge (the candidate's facing
/// edge is the left operand of the check — the order matters for asymmetric
/// labels). A variation may be adjacent to itself.
///
/// Must run against the exact list the returned indices will address:
/// [`crate::TileSet::build`] is the only caller, after rotation expansion and
/// deduplication are done.
pub(crate) fn derive_adjacency(variations: &[TileVariation]) -> Vec<[Vec<usize>; 4]> {
    let mut all = Vec::with_capacity(variations.len());
    for variation in variations {
        let mut lists: [Vec<usize>; 4] = Default::default();
        for direction in Direction::ALL {
            let own_edge = variation.edge(direction);
            let list = &mut lists[direction.index()];
            for (index, candidate) in variations.iter().enumerate() {
                if candidate.edge(direction.opposite()).compatible(own_edge) {
                    list.push(index);
                }
            }
        }
        all.push(lists);
    }
    debug!(
        "derived adjacency for {} variations ({} allowed pairings)",
        variations.len(),
        all.iter()
            .flat_map(|lists| lists.iter())
            .map(Vec::len)
            .sum::<usize>()
    );
    all
}
