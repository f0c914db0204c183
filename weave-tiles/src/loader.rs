use std::ffi::OsStr;
use std::path::Path;

use log::{debug, info};

use crate::formats::ron_format::RonFormatParser;
use crate::formats::FormatParser;
use crate::{LoadError, TileSet};

/// Loads a finalized tileset from a tile definition file.
///
/// The parser is selected by file extension before the file is read;
/// currently only `.ron` is supported.
pub fn load_from_file(path: &Path) -> Result<TileSet, LoadError> {
    let extension = path
        .extension()
        .and_then(OsStr::to_str)
        .unwrap_or_default()
        .to_ascii_lowercase();
    let parser: Box<dyn FormatParser> = match extension.as_str() {
        "ron" => Box::new(RonFormatParser::new()),
        other => {
            return Err(LoadError::UnsupportedFormat(format!(
                "no parser for '.{other}' files (expected .ron): {}",
                path.display()
            )))
        }
    };

    debug!(
        "reading tile file {} as {}",
        path.display(),
        parser.format_name()
    );
    let content = std::fs::read_to_string(path)?;
    let tiles = parser.parse(&content)?;
    info!(
        "loaded {} tile variations from {}",
        tiles.len(),
        path.display()
    );
    Ok(tiles)
}
