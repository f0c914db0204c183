use bitvec::prelude::*;
use log::trace;
use weave_tiles::{Direction, TileSet};

use crate::grid::PossibilityGrid;

/// Trait defining the interface for a constraint propagation algorithm.
///
/// Implementors update the grid in place after one or more cells' option
/// sets changed, removing neighbor options that no remaining option can
/// support.
pub trait ConstraintPropagator {
    /// Propagates constraints to a fixed point starting from the cells in
    /// `seeds` (flat indices). Returns the number of option-set reductions
    /// performed.
    ///
    /// A cell driven to zero options is NOT reported here: contradiction
    /// detection is deferred to collapse time, when the entropy scan hands
    /// the emptied cell to the solver.
    fn propagate(&mut self, grid: &mut PossibilityGrid, tiles: &TileSet, seeds: Vec<usize>)
        -> usize;
}

/// Worklist-based arc-consistency propagation.
///
/// Keeps an explicit stack of cells whose options changed and must broadcast
/// to their neighbors; no recursion, so grids of any dimension propagate in
/// constant stack space. Terminates because option counts are monotonically
/// non-increasing and bounded below by zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorklistPropagator;

impl WorklistPropagator {
    pub fn new() -> Self {
        Self
    }
}

impl ConstraintPropagator for WorklistPropagator {
    fn propagate(
        &mut self,
        grid: &mut PossibilityGrid,
        tiles: &TileSet,
        seeds: Vec<usize>,
    ) -> usize {
        let dimension = grid.dimension;
        let num_tiles = tiles.len();
        let mut worklist = seeds;
        let mut reductions = 0;

        while let Some(index) = worklist.pop() {
            let (x, y) = grid.coords(index);
            // Clone the source cell's options so neighbors can be mutated
            // while the allowed sets are built from it.
            let options = match grid.get_index(index) {
                Some(cell) => cell.options.clone(),
                None => continue,
            };

            for direction in Direction::ALL {
                let (dx, dy) = direction.offset();
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                // Bounds are checked before any index mapping happens.
                if nx < 0 || ny < 0 || nx >= dimension as isize || ny >= dimension as isize {
                    continue;
                }
                let neighbor_index = nx as usize + ny as usize * dimension;

                // Union of every remaining option's adjacency list for this
                // direction: everything the source cell still supports there.
                let mut allowed = bitvec![0; num_tiles];
                for option in options.iter_ones() {
                    for &candidate in tiles.compatible(option, direction) {
                        allowed.set(candidate, true);
                    }
                }

                let neighbor = match grid.get_index_mut(neighbor_index) {
                    Some(cell) => cell,
                    None => continue,
                };
                if neighbor.restrict(&allowed) {
                    reductions += 1;
                    trace!(
                        "cell {index} reduced neighbor {neighbor_index} ({direction:?}) to {} options",
                        neighbor.entropy()
                    );
                    if !worklist.contains(&neighbor_index) {
                        worklist.push(neighbor_index);
                    }
                }
            }
        }

        reductions
    }
}
