//! Terminal rendering and text output for solved grids.

use anyhow::{bail, Context, Result};
use colored::{Color, Colorize};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use weave_core::PossibilityGrid;
use weave_tiles::TileSet;

const PALETTE: [Color; 7] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::White,
];

/// Renders the grid as colored glyphs, one per cell. Collapsed cells show
/// their variation index in base 36, colored by index; unresolved cells show
/// a dim placeholder.
pub fn render_grid(grid: &PossibilityGrid, tiles: &TileSet) -> String {
    let mut out = String::new();
    for y in 0..grid.dimension {
        for x in 0..grid.dimension {
            let chosen = grid.get(x, y).and_then(|cell| cell.chosen);
            match chosen {
                Some(index) => {
                    let glyph = glyph_for(tiles, index).to_string();
                    let color = PALETTE[index % PALETTE.len()];
                    out.push_str(&glyph.as_str().color(color).to_string());
                }
                None => out.push_str(&"·".dimmed().to_string()),
            }
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

fn glyph_for(tiles: &TileSet, index: usize) -> char {
    // Blank tiles render as space; everything else gets its index in base 36
    // so small tilesets stay readable.
    if tiles.get(index).and_then(|t| t.source_id()).is_none() {
        return ' ';
    }
    char::from_digit((index % 36) as u32, 36).unwrap_or('#')
}

/// Saves the final collapsed grid to a file in a simple text format:
/// space-separated variation indices along X, newline per row.
pub fn save_grid_to_file(grid: &PossibilityGrid, output_path: &Path) -> Result<()> {
    log::info!("Attempting to save grid to {:?}...", output_path);

    let file = File::create(output_path)
        .with_context(|| format!("Failed to create output file: {:?}", output_path))?;
    let mut writer = io::BufWriter::new(file);

    for y in 0..grid.dimension {
        let mut line = String::new();
        for x in 0..grid.dimension {
            let cell = grid.get(x, y).ok_or_else(|| {
                anyhow::anyhow!("Internal error: Failed to access grid cell ({}, {})", x, y)
            })?;

            let index = match cell.chosen {
                Some(index) => index,
                None if cell.entropy() == 0 => {
                    bail!(
                        "Grid cell ({}, {}) has a contradiction (0 possibilities), cannot save.",
                        x,
                        y
                    );
                }
                None => {
                    bail!(
                        "Grid cell ({}, {}) is not fully collapsed ({} possibilities), cannot save.",
                        x,
                        y,
                        cell.entropy()
                    );
                }
            };

            if x > 0 {
                line.push(' ');
            }
            line.push_str(&index.to_string());
        }
        writeln!(writer, "{}", line)
            .with_context(|| format!("Failed to write line for row {}", y))?;
    }

    writer
        .flush()
        .context("Failed to flush writer for output file")?;
    log::info!("Successfully saved grid to {:?}", output_path);

    Ok(())
}
