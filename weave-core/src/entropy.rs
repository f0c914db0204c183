use rand::seq::SliceRandom;
use rand::RngCore;

use crate::grid::PossibilityGrid;

/// Trait defining the interface for entropy-based cell selection strategies.
pub trait EntropyCalculator {
    /// Picks the next cell to collapse: the non-collapsed cell with the
    /// fewest remaining options, ties broken uniformly at random with the
    /// provided RNG. Returns `None` when every cell is collapsed.
    fn select_lowest_entropy_cell(
        &self,
        grid: &PossibilityGrid,
        rng: &mut dyn RngCore,
    ) -> Option<usize>;
}

/// Count-based entropy: a cell's entropy is simply how many options remain.
///
/// With uniform tile selection this orders cells the same way Shannon
/// entropy would, without the floating point. A cell whose options were
/// emptied by propagation has entropy 0 and therefore wins the scan — that
/// is how deferred contradictions surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountEntropyCalculator;

impl CountEntropyCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl EntropyCalculator for CountEntropyCalculator {
    fn select_lowest_entropy_cell(
        &self,
        grid: &PossibilityGrid,
        rng: &mut dyn RngCore,
    ) -> Option<usize> {
        // First pass: find the minimum entropy among non-collapsed cells.
        let mut min_entropy = usize::MAX;
        for cell in grid.cells() {
            if !cell.collapsed {
                min_entropy = min_entropy.min(cell.entropy());
            }
        }
        if min_entropy == usize::MAX {
            return None; // Fully collapsed.
        }

        // Second pass: collect every cell tied at the minimum, then pick one.
        let ties: Vec<usize> = grid
            .cells()
            .enumerate()
            .filter(|(_, cell)| !cell.collapsed && cell.entropy() == min_entropy)
            .map(|(index, _)| index)
            .collect();
        ties.choose(rng).copied()
    }
}
