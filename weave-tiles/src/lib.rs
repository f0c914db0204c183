//! Tile definitions and edge-compatibility rule derivation for the
//! tile-weave solver.
//!
//! A tileset starts as a small list of base [`TileVariation`]s. Building a
//! [`TileSet`] expands the base list with its quarter-turn rotations,
//! deduplicates the result by edge signature, and derives the per-direction
//! adjacency lists the solver consumes.

use thiserror::Error;

pub mod formats;
pub mod loader;
pub mod types;

mod generator;

pub use types::{Direction, EdgeLabel, TileSet, TileVariation};

/// Errors that can occur while loading tile definitions from a file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error reading tile file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tile file: {0}")]
    Parse(String),
    #[error("invalid tile data: {0}")]
    InvalidData(String),
    #[error("unsupported tile file format: {0}")]
    UnsupportedFormat(String),
}
