use crate::{LoadError, TileSet};

/// Trait defining the interface for format-specific tile file parsers.
///
/// Implementors parse base tile definitions from a particular file format
/// and hand back a finalized [`TileSet`] (rotation expansion, deduplication
/// and adjacency analysis already applied).
pub trait FormatParser {
    /// Parses tile file content into a finalized tileset.
    fn parse(&self, content: &str) -> Result<TileSet, LoadError>;

    /// Descriptive name for this format, for logging and error messages.
    fn format_name(&self) -> &'static str;
}
