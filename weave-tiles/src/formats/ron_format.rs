use log::warn;
use serde::Deserialize;

use crate::formats::FormatParser;
use crate::types::{EdgeLabel, TileSet, TileVariation};
use crate::LoadError;

/// A parser for tile files in RON (Rusty Object Notation) format.
///
/// Expected shape:
///
/// ```ron
/// (
///     tiles: [
///         (source: Some("rail/tile1"), edges: ["ABA", "ABA", "ABA", "AAA"]),
///         (edges: [0, 1, 1, 1]),
///     ],
/// )
/// ```
///
/// Edges are listed Up, Right, Down, Left and may be strings or integers.
#[derive(Default)]
pub struct RonFormatParser;

impl RonFormatParser {
    pub fn new() -> Self {
        Self
    }
}

// --- Structs mirroring the RON format ---

#[derive(Debug, Clone, Deserialize)]
struct RonTileData {
    /// Opaque render identifier; omitted or `None` means a blank tile.
    #[serde(default)]
    source: Option<String>,
    /// Directional edge labels, Up, Right, Down, Left.
    edges: Vec<EdgeLabel>,
}

/// Top-level structure of a RON tile file.
#[derive(Debug, Clone, Deserialize)]
struct RonTileFile {
    tiles: Vec<RonTileData>,
}

impl FormatParser for RonFormatParser {
    fn format_name(&self) -> &'static str {
        "Rusty Object Notation (RON)"
    }

    fn parse(&self, content: &str) -> Result<TileSet, LoadError> {
        let tile_file: RonTileFile = ron::from_str(content)
            .map_err(|e| LoadError::Parse(format!("RON deserialization failed: {e}")))?;

        if tile_file.tiles.is_empty() {
            // Legal but unsolvable; the attempt counter will climb forever.
            warn!("tile file defines no tiles; the resulting tileset is empty");
        }

        let mut base = Vec::with_capacity(tile_file.tiles.len());
        for (index, tile) in tile_file.tiles.into_iter().enumerate() {
            let edge_count = tile.edges.len();
            let edges: [EdgeLabel; 4] = tile.edges.try_into().map_err(|_| {
                LoadError::InvalidData(format!(
                    "tile {index} defines {edge_count} edges, expected 4 (Up, Right, Down, Left)"
                ))
            })?;
            base.push(TileVariation::new(tile.source, edges));
        }

        Ok(TileSet::build(base))
    }
}

/// Parses tile definitions from a RON string.
pub fn parse_ron_tiles(content: &str) -> Result<TileSet, LoadError> {
    RonFormatParser::new().parse(content)
}
