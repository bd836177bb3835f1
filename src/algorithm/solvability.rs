//! Completability checks for a candidate stop pattern
//!
//! A level is accepted when every gem can be crossed from the ball start and
//! the resting positions form at most one trap region: a set of positions
//! from which the rest of the playfield can no longer be reached.

use std::collections::BTreeSet;

use crate::algorithm::bitset::PositionSet;
use crate::algorithm::reachability::reachable_set;
use crate::spatial::{Grid, Position};

/// A pattern that passed validation, with its trap region
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidatedPattern {
    /// Resting positions from which return is not guaranteed
    pub stuck_area: BTreeSet<Position>,
    /// Gems that can be crossed from inside the stuck area, sorted
    pub stuck_area_gems: Vec<Position>,
}

/// Find the single trap region among `resting`, or reject the layout
///
/// Visits `resting` in ascending position order. A position that cannot
/// reach every other member joins the stuck area; the first such position is
/// the representative and every later one must still reach it, otherwise the
/// layout holds two independent traps and `None` is returned.
pub fn check_solvability(grid: &Grid, resting: &PositionSet) -> Option<BTreeSet<Position>> {
    let mut stuck_area = BTreeSet::new();
    let mut representative: Option<Position> = None;

    for position in resting.iter() {
        let reach = reachable_set(grid, position, true);
        if resting.is_subset(&reach.resting) {
            continue;
        }
        match representative {
            None => {
                representative = Some(position);
                stuck_area.insert(position);
            }
            Some(rep) if !reach.resting.contains(rep) => {
                log::trace!("Rejected: {position} cannot reach trap representative {rep}");
                return None;
            }
            Some(_) => {
                stuck_area.insert(position);
            }
        }
    }

    Some(stuck_area)
}

/// Gems the ball can cross starting from the smallest stuck position
///
/// Empty when there is no stuck area.
pub fn stuck_area_gems(
    grid: &Grid,
    stuck_area: &BTreeSet<Position>,
    gems: &[Position],
) -> Vec<Position> {
    let Some(&origin) = stuck_area.first() else {
        return Vec::new();
    };
    let reach = reachable_set(grid, origin, false);
    let mut inside: Vec<Position> = gems
        .iter()
        .copied()
        .filter(|&gem| reach.reaches(gem))
        .collect();
    inside.sort_unstable();
    inside
}

/// Validate a grid whose stop cells are already applied
///
/// Rejects when a gem is never crossed from the ball start or when the
/// resting positions contain two independent traps.
pub fn validate_pattern(
    grid: &Grid,
    ball: Position,
    gems: &[Position],
) -> Option<ValidatedPattern> {
    let reach = reachable_set(grid, ball, false);
    if !gems.iter().all(|&gem| reach.reaches(gem)) {
        return None;
    }

    let stuck_area = check_solvability(grid, &reach.resting)?;
    let stuck_area_gems = stuck_area_gems(grid, &stuck_area, gems);

    Some(ValidatedPattern {
        stuck_area,
        stuck_area_gems,
    })
}
