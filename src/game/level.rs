//! A generated level: the restorable snapshot of a game

use std::collections::BTreeSet;

use crate::io::error::{Result, invalid_parameter};
use crate::spatial::{CellType, Grid, Position};

/// Initial cells, ball start and trap region of a playable level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    grid: Grid,
    ball: Position,
    stuck_area: BTreeSet<Position>,
    stuck_area_gems: Vec<Position>,
}

impl Level {
    /// Assemble a level from its parts
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the ball or a stuck-area position lies
    /// outside the grid
    pub fn new(
        grid: Grid,
        ball: Position,
        stuck_area: BTreeSet<Position>,
        mut stuck_area_gems: Vec<Position>,
    ) -> Result<Self> {
        if !grid.contains(ball) {
            return Err(invalid_parameter(
                "ball",
                &ball,
                &"ball must start inside the grid",
            ));
        }
        if let Some(outside) = stuck_area
            .iter()
            .chain(&stuck_area_gems)
            .find(|&&position| !grid.contains(position))
        {
            return Err(invalid_parameter(
                "stuck_area",
                outside,
                &"stuck area positions must lie inside the grid",
            ));
        }
        stuck_area_gems.sort_unstable();

        Ok(Self {
            grid,
            ball,
            stuck_area,
            stuck_area_gems,
        })
    }

    /// Initial cells
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Ball start
    pub const fn ball(&self) -> Position {
        self.ball
    }

    /// Resting positions from which return is not guaranteed
    pub const fn stuck_area(&self) -> &BTreeSet<Position> {
        &self.stuck_area
    }

    /// Gems reachable from inside the stuck area, sorted
    pub fn stuck_area_gems(&self) -> &[Position] {
        &self.stuck_area_gems
    }

    /// Dimensions as (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }

    /// Gem positions of the initial cells, row-major
    pub fn gems(&self) -> Vec<Position> {
        self.grid.positions_of(CellType::Gem)
    }

    /// Number of gems to collect
    pub fn gems_count(&self) -> usize {
        self.grid.count_of(CellType::Gem)
    }
}
