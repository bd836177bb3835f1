//! Breadth-first reachability over whole slides
//!
//! Each edge of the search graph is one complete safe slide. Resting
//! positions are the nodes; the cells passed on the way are collected
//! separately so callers can ask whether a gem is ever crossed.

use std::collections::VecDeque;

use crate::algorithm::bitset::PositionSet;
use crate::algorithm::slide::slide;
use crate::spatial::{Direction, Grid, Position};

/// Result of a reachability expansion
#[derive(Debug, Clone)]
pub struct Reachability {
    /// Every cell the ball can pass through or rest on
    ///
    /// `None` when only resting positions were requested.
    pub visited: Option<PositionSet>,
    /// Every position the ball can come to rest on, the start included
    pub resting: PositionSet,
}

impl Reachability {
    /// Check if the ball can pass through or rest on `position`
    ///
    /// Falls back to the resting set when cells were not traced.
    pub fn reaches(&self, position: Position) -> bool {
        self.visited
            .as_ref()
            .map_or_else(|| self.resting.contains(position), |v| v.contains(position))
    }
}

/// Expand every position reachable from `start` by repeated safe slides
///
/// With `stop_only` the traced cells are skipped and only resting positions
/// are reported.
pub fn reachable_set(grid: &Grid, start: Position, stop_only: bool) -> Reachability {
    let mut resting = PositionSet::for_grid(grid);
    let mut visited = (!stop_only).then(|| PositionSet::for_grid(grid));
    let mut frontier = VecDeque::new();

    resting.insert(start);
    if let Some(visited) = visited.as_mut() {
        visited.insert(start);
    }
    frontier.push_back(start);

    while let Some(position) = frontier.pop_front() {
        for direction in Direction::ALL {
            let outcome = slide(grid, position, direction, !stop_only);
            if !outcome.safe || outcome.is_noop(position) {
                continue;
            }
            if let Some(visited) = visited.as_mut() {
                visited.extend(outcome.trace.iter().copied());
            }
            if resting.insert(outcome.destination) {
                frontier.push_back(outcome.destination);
            }
        }
    }

    log::trace!(
        "Reachability from {start}: {} resting positions",
        resting.len()
    );

    Reachability { visited, resting }
}
