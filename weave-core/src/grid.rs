use bitvec::prelude::*;
use rand::seq::SliceRandom;
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One grid position's state: the set of still-possible tile variation
/// indices plus the collapse outcome once resolved.
///
/// Invariants (held between solver steps, transiently violated inside
/// propagation): `collapsed` iff exactly one option remains, and `chosen`
/// is `Some` exactly when collapsed. Options only ever shrink until the
/// cell collapses or the grid is reset.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    /// Bitset over tile variation indices; a set bit means that variation
    /// is still possible here.
    pub options: BitVec,
    /// Whether this cell has been resolved to a single variation.
    pub collapsed: bool,
    /// The resolved variation index; `Some` exactly when collapsed.
    pub chosen: Option<usize>,
}

impl Cell {
    /// Creates a cell at maximum entropy: all `tile_count` variations
    /// possible. A one-variation tileset leaves nothing to decide, so the
    /// cell is born collapsed.
    pub fn new(tile_count: usize) -> Self {
        let options = bitvec![1; tile_count];
        let collapsed = tile_count == 1;
        Self {
            options,
            collapsed,
            chosen: collapsed.then_some(0),
        }
    }

    /// Number of remaining candidate variations. "Lowest entropy" means the
    /// smallest such count among unresolved cells.
    pub fn entropy(&self) -> usize {
        self.options.count_ones()
    }

    /// Collapses this cell to one of its remaining options, chosen uniformly
    /// at random. Returns `None` when no options remain — the contradiction
    /// case the solver recovers from with a full restart.
    pub(crate) fn collapse(&mut self, rng: &mut dyn RngCore) -> Option<usize> {
        let candidates: Vec<usize> = self.options.iter_ones().collect();
        let &pick = candidates.choose(rng)?;
        self.options.fill(false);
        self.options.set(pick, true);
        self.collapsed = true;
        self.chosen = Some(pick);
        Some(pick)
    }

    /// Intersects the option set with `allowed`, returning whether anything
    /// was removed. May leave the cell with zero options; that contradiction
    /// is discovered at collapse time, not here.
    pub(crate) fn restrict(&mut self, allowed: &BitSlice<usize, Lsb0>) -> bool {
        let mut changed = false;
        for index in 0..self.options.len() {
            if self.options[index] && !allowed[index] {
                self.options.set(index, false);
                changed = true;
            }
        }
        changed
    }
}

/// A square 2D grid backed by flat row-major storage.
///
/// The flat index of `(x, y)` is `x + y * dimension`; rows grow downward.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid<T> {
    pub dimension: usize,
    pub(crate) data: Vec<T>,
}

impl<T> Grid<T> {
    /// Returns an immutable reference to the element at the given
    /// coordinates, or None if the coordinates are out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        self.flat_index(x, y).and_then(|idx| self.data.get(idx))
    }

    /// Returns a mutable reference to the element at the given coordinates,
    /// or None if the coordinates are out of bounds.
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        self.flat_index(x, y)
            .and_then(move |idx| self.data.get_mut(idx))
    }

    /// Element access by flat index.
    pub fn get_index(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut T> {
        self.data.get_mut(index)
    }

    /// Calculates the flat index for the given coordinates.
    /// Returns None if the coordinates are out of bounds.
    pub fn flat_index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.dimension && y < self.dimension {
            Some(x + y * self.dimension)
        } else {
            None
        }
    }

    /// Inverse of [`Grid::flat_index`].
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.dimension, index / self.dimension)
    }

    /// Total number of cells (`dimension * dimension`).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn cells(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

// Type alias for the possibilities grid
pub type PossibilityGrid = Grid<Cell>;

impl Grid<Cell> {
    /// Creates a grid of `dimension * dimension` cells, each at maximum
    /// entropy over `tile_count` variations.
    pub fn new(dimension: usize, tile_count: usize) -> Self {
        let data = (0..dimension * dimension)
            .map(|_| Cell::new(tile_count))
            .collect();
        Self { dimension, data }
    }

    /// Number of collapsed cells.
    pub fn collapsed_count(&self) -> usize {
        self.data.iter().filter(|cell| cell.collapsed).count()
    }
}
