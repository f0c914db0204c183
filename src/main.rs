mod config;
mod output;
mod tilesets;

use anyhow::{Context, Result};
use clap::Parser;
use config::{AppConfig, VisualizationMode};
use std::time::Instant;
use weave_core::{Solver, SolverConfig, StepOutcome};
use weave_tiles::{loader, TileSet};

fn main() -> Result<()> {
    // Initialize logging (using env_logger)
    env_logger::init();

    // Parse command-line arguments
    let config = AppConfig::parse();

    log::info!("tile-weave starting");
    log::debug!("Loaded Config: {:?}", config);

    // Build the tileset: from a file when given, otherwise a built-in set.
    let tiles = match &config.tile_file {
        Some(path) => loader::load_from_file(path)
            .with_context(|| format!("failed to load tile file {}", path.display()))?,
        None => {
            log::info!("using built-in tileset {:?}", config.tileset);
            TileSet::build(tilesets::base_tiles(config.tileset))
        }
    };
    log::info!("tileset ready: {} variations", tiles.len());

    let mut solver_config = SolverConfig::builder();
    if let Some(seed) = config.seed {
        solver_config = solver_config.seed(seed);
    }
    if let Some(cap) = config.max_attempts {
        solver_config = solver_config.max_attempts(cap);
    }
    let mut solver = Solver::new(tiles, config.dimension, solver_config.build());

    let start_time = Instant::now();
    let mut last_report = Instant::now();

    // Drive the solver one step per loop iteration, exactly the way an
    // external render tick would.
    loop {
        match solver.step() {
            Ok(StepOutcome::Done) => break,
            Ok(StepOutcome::Contradiction) => {
                log::debug!("restarted after contradiction (attempt {})", solver.attempts());
            }
            Ok(StepOutcome::Collapsed { .. }) => {}
            Err(err) => {
                log::error!("solve failed: {}", err);
                return Err(err.into());
            }
        }

        if config.visualization_mode == VisualizationMode::Terminal {
            // Clear the screen and redraw the board in place.
            print!("\x1B[2J\x1B[H{}", output::render_grid(solver.grid(), solver.tiles()));
        }

        if let Some(interval) = config.report_progress_interval {
            if last_report.elapsed() >= interval {
                let progress = solver.progress();
                log::info!(
                    "Progress: Collapsed {}/{} cells, attempt {}",
                    progress.collapsed_cells,
                    progress.total_cells,
                    progress.attempts
                );
                last_report = Instant::now();
            }
        }

        if let Some(delay) = config.step_delay {
            std::thread::sleep(delay);
        }
    }

    log::info!(
        "solved {}x{} grid in {:?} after {} attempt(s)",
        config.dimension,
        config.dimension,
        start_time.elapsed(),
        solver.attempts()
    );

    println!("{}", output::render_grid(solver.grid(), solver.tiles()));
    println!("Number of attempts to solve: {}", solver.attempts());

    if let Some(path) = &config.output_path {
        output::save_grid_to_file(solver.grid(), path)?;
    }

    log::info!("tile-weave finished");
    Ok(())
}
