//! Core library for the step-driven Wave Function Collapse tile solver.
//! Defines the grid/cell possibility model and the solve loop primitives.

use thiserror::Error;

/// Entropy calculation logic and traits.
pub mod entropy;
/// 2D grid of possibility-set cells.
pub mod grid;
/// Constraint propagation logic and traits.
pub mod propagator;
/// The step-driven solver state machine.
pub mod solver;

// Re-export core public items

pub use crate::entropy::{CountEntropyCalculator, EntropyCalculator};
pub use crate::grid::{Cell, Grid, PossibilityGrid};
pub use crate::propagator::{ConstraintPropagator, WorklistPropagator};
pub use crate::solver::{
    SolveCheckpoint, SolveProgress, Solver, SolverConfig, SolverConfigBuilder, StepOutcome,
};

/// Errors that can occur while driving the solver.
///
/// Contradictions are not errors: the solver recovers from them by resetting
/// the grid and bumping its attempt counter. The only failure surfaced as an
/// `Err` is exhausting the configured attempt cap.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WfcError {
    /// The configured maximum number of solve attempts was exceeded.
    /// Carries the attempt count at the moment the cap tripped.
    #[error("grid was not solved within {0} attempts")]
    Unsolvable(u64),
}

/// Lifecycle state of one solve session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolveState {
    /// Cells remain to collapse; stepping makes progress.
    #[default]
    Running,
    /// Every cell is collapsed. Leaving this state requires an explicit
    /// reset or tileset switch.
    Done,
}
