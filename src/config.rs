use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Represents the different visualization modes available.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VisualizationMode {
    /// No intermediate output; only the final grid is printed.
    #[default]
    None,
    /// Redraw the grid in the terminal after every solver step.
    Terminal,
}

/// Built-in demo tilesets, used when no tile file is given.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BuiltinTileset {
    /// Two tiles: blank and a T-piece, edges 0/1.
    #[default]
    Basic,
    /// Seven rail tiles with "AAA"/"ABA"-style edges.
    Rail,
    /// Thirteen circuit-board tiles.
    Circuit,
}

/// Configuration for the tile-weave solver CLI.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct AppConfig {
    /// Path to a RON tile file defining the base tile variations.
    /// Falls back to a built-in tileset when omitted.
    #[arg(short, long, value_name = "FILE")]
    pub tile_file: Option<PathBuf>,

    /// Built-in demo tileset to solve when no tile file is given.
    #[arg(long, value_enum, default_value_t = BuiltinTileset::Basic)]
    pub tileset: BuiltinTileset,

    /// Grid dimension (the board is dimension x dimension).
    #[arg(short, long, default_value_t = 10)]
    pub dimension: usize,

    /// Optional seed for the random number generator.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum number of solve attempts before giving up.
    /// Unbounded when omitted.
    #[arg(long)]
    pub max_attempts: Option<u64>,

    /// Delay between solver steps (e.g. "50ms"); pairs well with terminal
    /// visualization.
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    pub step_delay: Option<Duration>,

    /// Report solve progress every specified interval (e.g. "1s", "500ms").
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    pub report_progress_interval: Option<Duration>,

    /// Choose the visualization mode.
    #[arg(long, value_enum, default_value_t = VisualizationMode::None)]
    pub visualization_mode: VisualizationMode,

    /// Path to save the solved grid as text.
    #[arg(short, long, value_name = "FILE")]
    pub output_path: Option<PathBuf>,
}
