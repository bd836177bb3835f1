//! Dense position sets backed by a bit vector

use bitvec::prelude::*;
use std::fmt;

use crate::spatial::{Grid, Position};

/// Fixed-size set of grid positions
///
/// One bit per cell in row-major order. Membership tests and inserts are O(1)
/// and iteration yields positions in ascending `(row, col)` order. Positions
/// outside the grid are never members.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionSet {
    bits: BitVec,
    rows: usize,
    cols: usize,
}

impl PositionSet {
    /// Create an empty set for a `rows x cols` grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            bits: bitvec![0; rows * cols],
            rows,
            cols,
        }
    }

    /// Create an empty set sized for `grid`
    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.rows(), grid.cols())
    }

    fn index(&self, position: Position) -> Option<usize> {
        (position.row < self.rows && position.col < self.cols)
            .then(|| position.linear_index(self.cols))
    }

    /// Insert a position, returning true if it was not already present
    pub fn insert(&mut self, position: Position) -> bool {
        match self.index(position) {
            Some(index) => !self.bits.replace(index, true),
            None => false,
        }
    }

    /// Test position membership
    pub fn contains(&self, position: Position) -> bool {
        self.index(position)
            .and_then(|index| self.bits.get(index).as_deref().copied())
            .unwrap_or(false)
    }

    /// Test if every member is also in `other`
    pub fn is_subset(&self, other: &Self) -> bool {
        self.bits
            .iter_ones()
            .all(|index| other.bits.get(index).as_deref() == Some(&true))
    }

    /// Test if no positions are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count positions in the set
    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate members in ascending `(row, col)` order
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        let cols = self.cols;
        self.bits
            .iter_ones()
            .map(move |index| Position::from_linear_index(index, cols))
    }

    /// Smallest member in `(row, col)` order
    pub fn first(&self) -> Option<Position> {
        self.bits
            .first_one()
            .map(|index| Position::from_linear_index(index, self.cols))
    }

    /// Extract all members as a sorted vector
    pub fn to_vec(&self) -> Vec<Position> {
        self.iter().collect()
    }
}

impl Extend<Position> for PositionSet {
    fn extend<I: IntoIterator<Item = Position>>(&mut self, iter: I) {
        for position in iter {
            self.insert(position);
        }
    }
}

impl fmt::Display for PositionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PositionSet({} positions: [", self.len())?;
        for (i, position) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{position}")?;
        }
        write!(f, "])")
    }
}
