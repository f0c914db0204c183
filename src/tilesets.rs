//! Built-in demo tilesets.
//!
//! Edge arrays are ordered Up, Right, Down, Left. The labels are arbitrary
//! socket keys, only ever compared against each other: simple sets get away
//! with 0/1, asymmetric tiles read better with keys like "ABA" or "BCB".

use crate::config::BuiltinTileset;
use weave_tiles::TileVariation;

/// Base variations for the chosen built-in tileset; rotations and adjacency
/// come from `TileSet::build`.
pub fn base_tiles(which: BuiltinTileset) -> Vec<TileVariation> {
    match which {
        BuiltinTileset::Basic => basic(),
        BuiltinTileset::Rail => rail(),
        BuiltinTileset::Circuit => circuit(),
    }
}

fn tile(source: &str, edges: [&str; 4]) -> TileVariation {
    TileVariation::new(Some(source.to_owned()), edges)
}

fn basic() -> Vec<TileVariation> {
    vec![
        tile("basic/blank", ["0", "0", "0", "0"]),
        tile("basic/down", ["0", "1", "1", "1"]),
    ]
}

fn rail() -> Vec<TileVariation> {
    vec![
        tile("rail/tile0", ["AAA", "AAA", "AAA", "AAA"]),
        tile("rail/tile1", ["ABA", "ABA", "ABA", "AAA"]),
        tile("rail/tile2", ["BAA", "AAB", "AAA", "AAA"]),
        tile("rail/tile3", ["BAA", "AAA", "BAA", "AAA"]),
        tile("rail/tile4", ["ABA", "ABA", "AAA", "AAA"]),
        tile("rail/tile5", ["ABA", "AAA", "ABA", "AAA"]),
        tile("rail/tile6", ["ABA", "ABA", "ABA", "ABA"]),
    ]
}

fn circuit() -> Vec<TileVariation> {
    vec![
        tile("circuit/0", ["AAA", "AAA", "AAA", "AAA"]),
        tile("circuit/1", ["BBB", "BBB", "BBB", "BBB"]),
        tile("circuit/2", ["BBB", "BCB", "BBB", "BBB"]),
        tile("circuit/3", ["BBB", "BDB", "BBB", "BDB"]),
        tile("circuit/4", ["ABB", "BCB", "BBA", "AAA"]),
        tile("circuit/5", ["ABB", "BBB", "BBB", "BBA"]),
        tile("circuit/6", ["BBB", "BCB", "BBB", "BCB"]),
        tile("circuit/7", ["BDB", "BCB", "BDB", "BCB"]),
        tile("circuit/8", ["BDB", "BBB", "BCB", "BBB"]),
        tile("circuit/9", ["BCB", "BCB", "BBB", "BCB"]),
        tile("circuit/10", ["BCB", "BCB", "BCB", "BCB"]),
        tile("circuit/11", ["BCB", "BCB", "BBB", "BBB"]),
        tile("circuit/12", ["BBB", "BCB", "BBB", "BCB"]),
    ]
}
