use std::collections::HashMap;

use serde::Deserialize;

use crate::generator;

/// An opaque connection socket token for one side of a tile.
///
/// Labels are normalized to strings at ingestion so the compatibility check
/// stays monomorphic: tile files may write edges as integers (`0`, `1`) or
/// strings (`"ABA"`), and both end up here in string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "RawEdgeLabel")]
pub struct EdgeLabel(String);

/// Ingestion-side shape of an edge label: integer or string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEdgeLabel {
    Number(i64),
    Text(String),
}

impl From<RawEdgeLabel> for EdgeLabel {
    fn from(raw: RawEdgeLabel) -> Self {
        match raw {
            RawEdgeLabel::Number(n) => Self(n.to_string()),
            RawEdgeLabel::Text(s) => Self(s),
        }
    }
}

impl From<&str> for EdgeLabel {
    fn from(label: &str) -> Self {
        Self(label.to_owned())
    }
}

impl From<String> for EdgeLabel {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl From<i64> for EdgeLabel {
    fn from(label: i64) -> Self {
        Self(label.to_string())
    }
}

impl EdgeLabel {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks whether this label may abut `other` face-to-face.
    ///
    /// True iff `self` equals the character-reversal of `other`. Two mirrored
    /// sockets meeting read each other backwards, so `"AAB"` connects to
    /// `"BAA"` and a palindrome like `"ABA"` connects to itself. For
    /// single-character labels this degenerates to plain equality. Note the
    /// check is NOT symmetric in general: `"AB"` accepts `"BA"` but not
    /// another `"AB"`.
    pub fn compatible(&self, other: &Self) -> bool {
        self.0.chars().eq(other.0.chars().rev())
    }
}

/// The four grid directions, in edge-array order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Position of this direction's edge in a tile's edge array.
    pub const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Right => 1,
            Self::Down => 2,
            Self::Left => 3,
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Coordinate offset of the neighboring cell in this direction.
    /// Rows grow downward, so Up is `(0, -1)`.
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }
}

/// One orientation of a tile: four directional edge labels, an optional
/// render identifier, and the number of quarter-turns applied relative to
/// the base tile.
///
/// The adjacency lists are derived by [`TileSet::build`] once the full
/// variation list is finalized; they index into that exact list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileVariation {
    source_id: Option<String>,
    edges: [EdgeLabel; 4],
    rotations: u8,
    adjacency: [Vec<usize>; 4],
}

impl TileVariation {
    /// Creates a base (unrotated) variation. An empty `source_id` is
    /// normalized to `None`, meaning "render nothing".
    pub fn new<E: Into<EdgeLabel>>(source_id: Option<String>, edges: [E; 4]) -> Self {
        let source_id = source_id.filter(|id| !id.is_empty());
        Self {
            source_id,
            edges: edges.map(Into::into),
            rotations: 0,
            adjacency: Default::default(),
        }
    }

    /// Render identifier for the presentation layer; `None` means blank.
    pub fn source_id(&self) -> Option<&str> {
        self.source_id.as_deref()
    }

    /// Quarter-turns applied relative to the base tile (0..3).
    pub fn rotations(&self) -> u8 {
        self.rotations
    }

    pub fn edges(&self) -> &[EdgeLabel; 4] {
        &self.edges
    }

    pub fn edge(&self, direction: Direction) -> &EdgeLabel {
        &self.edges[direction.index()]
    }

    /// Returns a copy of this variation rotated clockwise by `steps`
    /// quarter-turns. The receiver is untouched; the copy's adjacency is
    /// empty until the owning tileset is analyzed.
    pub fn rotated(&self, steps: u8) -> Self {
        let steps = steps % 4;
        let edges = std::array::from_fn(|i| {
            let from = (i as isize - isize::from(steps)).rem_euclid(4) as usize;
            self.edges[from].clone()
        });
        Self {
            source_id: self.source_id.clone(),
            edges,
            rotations: steps,
            adjacency: Default::default(),
        }
    }

    /// Indices of every variation in the owning tileset that may sit on the
    /// `direction` side of this one. Empty until analyzed.
    pub fn compatible(&self, direction: Direction) -> &[usize] {
        &self.adjacency[direction.index()]
    }

    pub(crate) fn set_adjacency(&mut self, adjacency: [Vec<usize>; 4]) {
        self.adjacency = adjacency;
    }
}

/// The canonical, deduplicated, order-stable collection of tile variations
/// used for one solve session. Immutable after [`TileSet::build`]: the
/// adjacency lists reference positions in this exact list, so it must never
/// be reordered or mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileSet {
    variations: Vec<TileVariation>,
}

impl TileSet {
    /// Builds a finalized tileset from base variations.
    ///
    /// Pipeline: append the three rotated copies of every base tile,
    /// deduplicate by edge signature (an entry with a `source_id` beats a
    /// blank one holding the same signature), then derive adjacency for every
    /// survivor against the full surviving list. An empty base list yields an
    /// empty set, which makes every cell unsolvable by construction.
    pub fn build(base: Vec<TileVariation>) -> Self {
        let mut variations = base;
        let base_len = variations.len();
        for i in 0..base_len {
            for steps in 1..4u8 {
                let rotated = variations[i].rotated(steps);
                variations.push(rotated);
            }
        }

        let mut variations = dedup_variations(variations);

        let adjacency = generator::derive_adjacency(&variations);
        for (variation, lists) in variations.iter_mut().zip(adjacency) {
            variation.set_adjacency(lists);
        }

        Self { variations }
    }

    /// Number of variations in the finalized set.
    pub fn len(&self) -> usize {
        self.variations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TileVariation> {
        self.variations.get(index)
    }

    pub fn variations(&self) -> &[TileVariation] {
        &self.variations
    }

    /// Adjacency lookup: variations allowed on the `direction` side of
    /// variation `index`. Out-of-range indices allow nothing.
    pub fn compatible(&self, index: usize, direction: Direction) -> &[usize] {
        self.variations
            .get(index)
            .map_or(&[], |variation| variation.compatible(direction))
    }
}

/// Removes variations sharing an edge signature, keeping the first survivor's
/// position. A renderable entry replaces a blank one in place.
fn dedup_variations(variations: Vec<TileVariation>) -> Vec<TileVariation> {
    let mut position_by_edges: HashMap<[EdgeLabel; 4], usize> = HashMap::new();
    let mut unique: Vec<TileVariation> = Vec::with_capacity(variations.len());
    for variation in variations {
        match position_by_edges.get(variation.edges()) {
            None => {
                position_by_edges.insert(variation.edges().clone(), unique.len());
                unique.push(variation);
            }
            Some(&at) => {
                if unique[at].source_id.is_none() && variation.source_id.is_some() {
                    unique[at] = variation;
                }
            }
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn label(s: &str) -> EdgeLabel {
        EdgeLabel::from(s)
    }

    #[test]
    fn reversal_compatibility() {
        assert!(label("AB").compatible(&label("BA")));
        assert!(!label("AB").compatible(&label("AB")));
        assert!(label("ABA").compatible(&label("ABA")));
        assert!(label("AAB").compatible(&label("BAA")));
    }

    #[test]
    fn numeric_labels_degenerate_to_equality() {
        assert!(EdgeLabel::from(0).compatible(&EdgeLabel::from(0)));
        assert!(!EdgeLabel::from(0).compatible(&EdgeLabel::from(1)));
    }

    #[test]
    fn rotation_shifts_edges() {
        let tile = TileVariation::new(Some("t".to_owned()), ["U", "R", "D", "L"]);
        let once = tile.rotated(1);
        assert_eq!(once.edges(), &[label("L"), label("U"), label("R"), label("D")]);
        assert_eq!(once.rotations(), 1);

        let twice = tile.rotated(2);
        assert_eq!(twice.edges(), &[label("D"), label("L"), label("U"), label("R")]);
    }

    #[test]
    fn four_step_rotation_is_identity() {
        let tile = TileVariation::new(Some("t".to_owned()), ["A", "BB", "CCC", "D"]);
        assert_eq!(tile.rotated(4).edges(), tile.edges());
        assert_eq!(tile.rotated(0).edges(), tile.edges());
    }

    #[test]
    fn build_expands_and_dedups_rotations() {
        // A tile with four identical edges has only one distinct orientation.
        let base = vec![TileVariation::new(
            Some("blank".to_owned()),
            ["AAA", "AAA", "AAA", "AAA"],
        )];
        let set = TileSet::build(base);
        assert_eq!(set.len(), 1);

        // One asymmetric tile keeps all four orientations.
        let base = vec![TileVariation::new(Some("down".to_owned()), ["0", "1", "1", "1"])];
        let set = TileSet::build(base);
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn dedup_prefers_renderable_source() {
        let base = vec![
            TileVariation::new(None::<String>, ["0", "0", "0", "0"]),
            TileVariation::new(Some("real".to_owned()), ["0", "0", "0", "0"]),
        ];
        let set = TileSet::build(base);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(0).and_then(TileVariation::source_id), Some("real"));
    }

    #[test]
    fn empty_source_id_is_blank() {
        let tile = TileVariation::new(Some(String::new()), ["0", "0", "0", "0"]);
        assert_eq!(tile.source_id(), None);
    }

    #[test]
    fn adjacency_of_self_compatible_tile_includes_itself() {
        let set = TileSet::build(vec![TileVariation::new(
            Some("blank".to_owned()),
            ["AAA", "AAA", "AAA", "AAA"],
        )]);
        for direction in Direction::ALL {
            assert_eq!(set.compatible(0, direction), &[0]);
        }
    }

    #[test]
    fn adjacency_out_of_range_allows_nothing() {
        let set = TileSet::build(vec![TileVariation::new(
            Some("blank".to_owned()),
            ["0", "0", "0", "0"],
        )]);
        assert!(set.compatible(99, Direction::Up).is_empty());
    }

    #[test]
    fn incompatible_everywhere_yields_empty_adjacency() {
        // "AB" never matches anything here: its reversal "BA" appears on no
        // edge of the set.
        let set = TileSet::build(vec![TileVariation::new(
            Some("loner".to_owned()),
            ["AB", "AB", "AB", "AB"],
        )]);
        assert_eq!(set.len(), 1);
        for direction in Direction::ALL {
            assert!(set.compatible(0, direction).is_empty());
        }
    }

    proptest! {
        #[test]
        fn rotation_round_trip(edges in proptest::array::uniform4("[A-D]{0,3}")) {
            let tile = TileVariation::new(Some("t".to_owned()), edges.clone());
            for steps in 0u8..4 {
                let rotated = tile.rotated(steps);
                for i in 0..4 {
                    let from = (i as isize - isize::from(steps)).rem_euclid(4) as usize;
                    prop_assert_eq!(rotated.edges()[i].as_str(), edges[from].as_str());
                }
            }
            let full_turn = tile.rotated(4);
            prop_assert_eq!(full_turn.edges(), tile.edges());
        }

        #[test]
        fn build_is_idempotent(all_edges in proptest::collection::vec(proptest::array::uniform4("[A-C]{1,2}"), 1..5)) {
            let base: Vec<TileVariation> = all_edges
                .iter()
                .enumerate()
                .map(|(i, edges)| TileVariation::new(Some(format!("tile{i}")), edges.clone()))
                .collect();
            let first = TileSet::build(base.clone());
            let second = TileSet::build(base);
            prop_assert_eq!(first, second);
        }
    }
}
