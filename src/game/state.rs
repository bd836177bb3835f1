//! Live game context
//!
//! Owns the level snapshot and the mutable play state derived from it. Every
//! engine operation borrows this context explicitly; nothing is global.

use std::collections::BTreeSet;

use crate::algorithm::pathfinder::HintRequest;
use crate::algorithm::slide::slide;
use crate::game::level::Level;
use crate::io::error::{Result, invalid_parameter};
use crate::math::geometry::euclidean_distance;
use crate::spatial::{CellType, Direction, Grid, Position};

/// Mutable state of a game in progress
#[derive(Debug, Clone)]
pub struct GameState {
    level: Level,
    cells: Grid,
    ball: Position,
    gems: Vec<Position>,
    remaining_gems: usize,
    hint_candidates: BTreeSet<Position>,
}

/// Snapshot of a game in progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedGame {
    /// The level being played
    pub level: Level,
    /// Current ball position
    pub ball: Position,
    /// Current cells
    pub cells: Grid,
}

impl GameState {
    /// Start a fresh game on `level`
    pub fn new(level: Level) -> Self {
        let cells = level.grid().clone();
        let ball = level.ball();
        let mut state = Self {
            level,
            cells,
            ball,
            gems: Vec::new(),
            remaining_gems: 0,
            hint_candidates: BTreeSet::new(),
        };
        state.derive_gems();
        state
    }

    /// Resume a saved game
    ///
    /// Remaining gems are derived from the saved cells. A `Waiting` cell is
    /// a gem already collected.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the saved cells or ball do not fit the level
    pub fn from_saved(saved: SavedGame) -> Result<Self> {
        if saved.cells.dimensions() != saved.level.dimensions() {
            let (rows, cols) = saved.cells.dimensions();
            return Err(invalid_parameter(
                "cells",
                &format!("{rows}x{cols}"),
                &"saved cells do not match the level dimensions",
            ));
        }
        if !saved.cells.contains(saved.ball) {
            return Err(invalid_parameter(
                "ball",
                &saved.ball,
                &"saved ball lies outside the grid",
            ));
        }

        let mut state = Self {
            level: saved.level,
            cells: saved.cells,
            ball: saved.ball,
            gems: Vec::new(),
            remaining_gems: 0,
            hint_candidates: BTreeSet::new(),
        };
        state.derive_gems();
        Ok(state)
    }

    /// Snapshot the game for later resumption
    pub fn save(&self) -> SavedGame {
        SavedGame {
            level: self.level.clone(),
            ball: self.ball,
            cells: self.cells.clone(),
        }
    }

    fn derive_gems(&mut self) {
        self.gems = self.cells.positions_of(CellType::Gem);
        self.remaining_gems = self.gems.len();
        self.hint_candidates = self
            .gems
            .iter()
            .copied()
            .filter(|gem| !self.level.stuck_area_gems().contains(gem))
            .collect();
    }

    /// Put cells, ball and gem count back to the level snapshot
    pub fn restart(&mut self) {
        self.cells = self.level.grid().clone();
        self.ball = self.level.ball();
        self.derive_gems();
    }

    /// The level being played
    pub const fn level(&self) -> &Level {
        &self.level
    }

    /// Current cells
    pub const fn grid(&self) -> &Grid {
        &self.cells
    }

    /// Initial cells of the level
    pub const fn initial_grid(&self) -> &Grid {
        self.level.grid()
    }

    /// Current ball position
    pub const fn ball(&self) -> Position {
        self.ball
    }

    /// Remaining gems, row-major
    pub fn gems(&self) -> &[Position] {
        &self.gems
    }

    /// Number of gems still to collect
    pub const fn remaining_gems(&self) -> usize {
        self.remaining_gems
    }

    /// Check if every gem was collected
    pub const fn is_completed(&self) -> bool {
        self.remaining_gems == 0
    }

    /// Trap region of the level
    pub const fn stuck_area(&self) -> &BTreeSet<Position> {
        self.level.stuck_area()
    }

    /// Gems outside the stuck area that hints may target
    pub const fn hint_candidates(&self) -> &BTreeSet<Position> {
        &self.hint_candidates
    }

    /// Check if only stuck-area gems remain, so entering the trap is harmless
    pub fn can_enter_stuck_area(&self) -> bool {
        let stuck_gems = self.level.stuck_area_gems();
        self.gems.iter().all(|gem| stuck_gems.contains(gem))
    }

    /// Gem the next hint should lead to
    ///
    /// The nearest remaining gem by straight-line distance, chosen among all
    /// gems when the stuck area may be entered and among the hint candidates
    /// otherwise. Ties go to the smallest position.
    pub fn hint_target(&self) -> Option<Position> {
        let ball = self.ball;
        let by_distance = move |a: &Position, b: &Position| {
            euclidean_distance(ball, *a)
                .total_cmp(&euclidean_distance(ball, *b))
                .then(a.cmp(b))
        };
        if self.can_enter_stuck_area() {
            self.gems.iter().copied().min_by(by_distance)
        } else {
            self.hint_candidates.iter().copied().min_by(by_distance)
        }
    }

    /// Hint search input for `target` against the live cells
    pub fn hint_request(&self, target: Position) -> HintRequest<'_> {
        HintRequest {
            grid: &self.cells,
            ball: self.ball,
            target,
            stuck_area: self.level.stuck_area(),
            can_enter_stuck_area: self.can_enter_stuck_area(),
        }
    }

    /// Check if every slide from the ball ends on a mine
    pub fn explodes_with_any_move(&self) -> bool {
        Direction::ALL
            .into_iter()
            .all(|direction| !slide(&self.cells, self.ball, direction, false).safe)
    }

    /// Acknowledge that the ball settled, clearing a collected gem under it
    ///
    /// Returns true if the cell changed.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the ball lies outside the grid
    pub fn announce_ball_position(&mut self) -> Result<bool> {
        if self.cells.cell(self.ball)? == CellType::Waiting {
            self.cells.set(self.ball, CellType::Clear)?;
            return Ok(true);
        }
        Ok(false)
    }

    pub(crate) const fn cells_mut(&mut self) -> &mut Grid {
        &mut self.cells
    }

    pub(crate) const fn set_ball(&mut self, ball: Position) {
        self.ball = ball;
    }

    pub(crate) fn collect_gem(&mut self, gem: Position) {
        self.gems.retain(|&remaining| remaining != gem);
        self.hint_candidates.remove(&gem);
        self.remaining_gems = self.remaining_gems.saturating_sub(1);
    }

    pub(crate) fn restore_gem(&mut self, gem: Position) {
        if let Err(index) = self.gems.binary_search(&gem) {
            self.gems.insert(index, gem);
            self.remaining_gems += 1;
        }
        if !self.level.stuck_area_gems().contains(&gem) {
            self.hint_candidates.insert(gem);
        }
    }
}
