use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use weave_tiles::{TileSet, TileVariation};

use crate::entropy::{CountEntropyCalculator, EntropyCalculator};
use crate::grid::PossibilityGrid;
use crate::propagator::{ConstraintPropagator, WorklistPropagator};
use crate::{SolveState, WfcError};

/// Configuration options for a [`Solver`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SolverConfig {
    /// Seed for the random number generator; `None` draws from OS entropy.
    /// Fixing the seed makes the whole solve reproducible.
    pub seed: Option<u64>,
    /// Maximum number of solve attempts before [`WfcError::Unsolvable`] is
    /// returned. `None` restarts forever, which on a degenerate tileset
    /// means the attempt counter climbs without bound.
    pub max_attempts: Option<u64>,
}

impl SolverConfig {
    /// Creates a new builder for `SolverConfig`.
    pub fn builder() -> SolverConfigBuilder {
        SolverConfigBuilder::default()
    }
}

/// Builder for `SolverConfig`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolverConfigBuilder {
    seed: Option<u64>,
    max_attempts: Option<u64>,
}

impl SolverConfigBuilder {
    /// Sets the seed for the random number generator.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the maximum number of solve attempts allowed.
    pub fn max_attempts(mut self, max: u64) -> Self {
        self.max_attempts = Some(max);
        self
    }

    /// Builds the `SolverConfig` instance.
    pub fn build(self) -> SolverConfig {
        SolverConfig {
            seed: self.seed,
            max_attempts: self.max_attempts,
        }
    }
}

/// A saved grid state, captured before each random choice.
///
/// The solver itself never restores one — restart-on-contradiction rebuilds
/// from scratch — but exposing the pre-choice state lets a backtracking
/// strategy be layered on without touching the propagation core.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolveCheckpoint {
    /// Grid state before the tie-break and collapse choices were made.
    pub grid: PossibilityGrid,
    /// Attempt counter at capture time.
    pub attempts: u64,
}

/// Summary of how far a solve has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveProgress {
    /// Cells resolved to a single variation.
    pub collapsed_cells: usize,
    /// Total cells in the grid.
    pub total_cells: usize,
    /// Attempts spent so far, counting the current one.
    pub attempts: u64,
}

/// What a single [`Solver::step`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A cell was collapsed and its constraints propagated.
    Collapsed {
        /// Flat index of the collapsed cell.
        cell: usize,
        /// The variation it resolved to.
        tile: usize,
    },
    /// A contradiction was found; the grid was discarded and rebuilt at
    /// full entropy, and the attempt counter incremented.
    Contradiction,
    /// Every cell is collapsed; nothing left to do.
    Done,
}

/// The step-driven Wave Function Collapse solver.
///
/// Owns the finalized tileset, the possibility grid and the RNG for the
/// duration of a solve session; an external driver calls [`Solver::step`]
/// once per tick (and nothing here ever blocks). Each step performs one
/// "select, collapse, propagate to fixed point" unit, or recovers from a
/// contradiction by rebuilding the whole grid.
#[derive(Debug)]
pub struct Solver {
    tiles: TileSet,
    grid: PossibilityGrid,
    rng: StdRng,
    attempts: u64,
    state: SolveState,
    checkpoint: Option<SolveCheckpoint>,
    entropy: CountEntropyCalculator,
    propagator: WorklistPropagator,
    config: SolverConfig,
}

impl Solver {
    /// Creates a solver over a `dimension` x `dimension` grid.
    pub fn new(tiles: TileSet, dimension: usize, config: SolverConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        info!(
            "solver ready: {}x{} grid, {} tile variations, seed {:?}",
            dimension,
            dimension,
            tiles.len(),
            config.seed
        );
        let grid = PossibilityGrid::new(dimension, tiles.len());
        Self {
            tiles,
            grid,
            rng,
            attempts: 1,
            state: SolveState::Running,
            checkpoint: None,
            entropy: CountEntropyCalculator::new(),
            propagator: WorklistPropagator::new(),
            config,
        }
    }

    /// Advances the solve by one unit: select the lowest-entropy cell,
    /// collapse it, propagate. A contradiction discards the grid, bumps the
    /// attempt counter and reports [`StepOutcome::Contradiction`]; it only
    /// becomes an error once the configured attempt cap is exceeded.
    pub fn step(&mut self) -> Result<StepOutcome, WfcError> {
        if self.state == SolveState::Done {
            return Ok(StepOutcome::Done);
        }

        // 1. Select: lowest entropy among non-collapsed cells, random tie-break.
        let cell_index = match self
            .entropy
            .select_lowest_entropy_cell(&self.grid, &mut self.rng)
        {
            Some(index) => index,
            None => {
                info!(
                    "all {} cells collapsed after {} attempt(s)",
                    self.grid.len(),
                    self.attempts
                );
                self.state = SolveState::Done;
                return Ok(StepOutcome::Done);
            }
        };

        // Snapshot before any random choice so a future backtracking
        // strategy has a restore point.
        self.checkpoint = Some(SolveCheckpoint {
            grid: self.grid.clone(),
            attempts: self.attempts,
        });

        // 2. Collapse: uniform random pick among the remaining options.
        let rng = &mut self.rng;
        let picked = match self.grid.get_index_mut(cell_index) {
            Some(cell) => cell.collapse(rng),
            None => None,
        };

        match picked {
            Some(tile) => {
                // 3. Propagate the new constraint out to a fixed point.
                let reductions =
                    self.propagator
                        .propagate(&mut self.grid, &self.tiles, vec![cell_index]);
                debug!(
                    "collapsed cell {cell_index} to variation {tile}; {reductions} option sets reduced"
                );
                Ok(StepOutcome::Collapsed {
                    cell: cell_index,
                    tile,
                })
            }
            None => {
                // Contradiction: no options left to pick from. Restart the
                // whole attempt from a fresh board; there is no backtracking.
                self.attempts += 1;
                warn!(
                    "contradiction at cell {cell_index}; restarting (attempt {})",
                    self.attempts
                );
                if let Some(cap) = self.config.max_attempts {
                    if self.attempts > cap {
                        return Err(WfcError::Unsolvable(self.attempts));
                    }
                }
                self.rebuild_grid();
                Ok(StepOutcome::Contradiction)
            }
        }
    }

    /// Steps until the grid is solved. Only bounded by `max_attempts`; on a
    /// degenerate tileset with no cap configured this will not return.
    pub fn run_to_completion(&mut self) -> Result<SolveProgress, WfcError> {
        loop {
            if self.step()? == StepOutcome::Done {
                return Ok(self.progress());
            }
        }
    }

    /// Re-initializes the grid at the current dimension for a fresh solve
    /// session, without rebuilding the tileset.
    pub fn reset(&mut self) {
        self.rebuild_grid();
        self.attempts = 1;
        self.state = SolveState::Running;
    }

    /// Rebuilds the tileset from new base definitions, then resets.
    pub fn retileset(&mut self, base: Vec<TileVariation>) {
        self.tiles = TileSet::build(base);
        info!("switched tileset: {} variations", self.tiles.len());
        self.reset();
    }

    /// Discards the grid and rebuilds it at full entropy. The replacement is
    /// wholesale: readers only ever see the old grid or the new one.
    fn rebuild_grid(&mut self) {
        self.grid = PossibilityGrid::new(self.grid.dimension, self.tiles.len());
        self.checkpoint = None;
    }

    /// The grid as of the last completed step.
    pub fn grid(&self) -> &PossibilityGrid {
        &self.grid
    }

    /// The finalized tileset, for mapping chosen indices back to source ids.
    pub fn tiles(&self) -> &TileSet {
        &self.tiles
    }

    /// Attempts spent so far, starting at 1 and incremented per contradiction.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn state(&self) -> SolveState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == SolveState::Done
    }

    /// Grid snapshot captured before the last step's random choices, if any.
    pub fn last_checkpoint(&self) -> Option<&SolveCheckpoint> {
        self.checkpoint.as_ref()
    }

    pub fn progress(&self) -> SolveProgress {
        SolveProgress {
            collapsed_cells: self.grid.collapsed_count(),
            total_cells: self.grid.len(),
            attempts: self.attempts,
        }
    }
}
