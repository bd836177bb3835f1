//! Stop-cell pattern search
//!
//! The candidates are the `Clear` cells of a laid-out grid in row-major order.
//! A boolean selection vector over them picks the stop cells, and the search
//! walks same-weight selections in descending lexicographic order until a
//! pattern validates, the walk wraps around, or the token is cancelled.

use std::collections::BTreeSet;
use std::time::Duration;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::algorithm::cancellation::CancellationToken;
use crate::algorithm::solvability::validate_pattern;
use crate::io::configuration::stops_count;
use crate::io::error::Result;
use crate::spatial::{CellType, Grid, Position};

/// A validated stop pattern ready to be written into a level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedPattern {
    /// Cells that become stop cells, row-major
    pub stops: Vec<Position>,
    /// Trap region of the resulting level
    pub stuck_area: BTreeSet<Position>,
    /// Gems reachable from inside the trap region
    pub stuck_area_gems: Vec<Position>,
}

impl AcceptedPattern {
    /// Write the stop cells into `grid`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the pattern belongs to a larger grid
    pub fn apply(&self, grid: &mut Grid) -> Result<()> {
        for &stop in &self.stops {
            grid.set(stop, CellType::Stop)?;
        }
        Ok(())
    }
}

/// Evenly spaced selection of `stops` out of `available` candidates
///
/// Picks index `i` when `i % m == m / 2` with `m = available / stops`, and
/// never selects more than `stops`. Used to seed the single-game search.
pub fn even_selection(available: usize, stops: usize) -> Vec<bool> {
    let mut selection = vec![false; available];
    if stops == 0 {
        return selection;
    }
    let spacing = (available / stops).max(1);
    let mut selected = 0;
    for (i, slot) in selection.iter_mut().enumerate() {
        if selected >= stops {
            break;
        }
        if i % spacing == spacing / 2 {
            *slot = true;
            selected += 1;
        }
    }
    selection
}

/// Uniformly shuffled selection of `stops` out of `available` candidates
///
/// Used to seed bulk generation so that successive layouts explore
/// different regions of the permutation space.
pub fn shuffled_selection<R: Rng + ?Sized>(
    available: usize,
    stops: usize,
    rng: &mut R,
) -> Vec<bool> {
    let weight = stops.min(available);
    let mut selection: Vec<bool> = (0..available).map(|i| i < weight).collect();
    selection.shuffle(rng);
    selection
}

/// Step `items` to the previous permutation in lexicographic order
///
/// Returns false when `items` was already the smallest permutation, in which
/// case it is reset to the largest one.
pub fn prev_permutation<T: Ord>(items: &mut [T]) -> bool {
    let len = items.len();
    let Some(pivot) = (1..len)
        .rev()
        .find(|&i| items.get(i - 1) > items.get(i))
        .map(|i| i - 1)
    else {
        items.reverse();
        return false;
    };

    let Some(swap_with) = (pivot + 1..len)
        .rev()
        .find(|&j| items.get(j) < items.get(pivot))
    else {
        return false;
    };

    items.swap(pivot, swap_with);
    if let Some(tail) = items.get_mut(pivot + 1..) {
        tail.reverse();
    }
    true
}

/// Walk stop patterns from `selection` and collect up to `limit` valid ones
///
/// `grid` holds the ball (as a stop cell), walls, mines and gems; its `Clear`
/// cells are the candidates `selection` indexes into. The grid itself is not
/// modified. The walk stops at `limit` accepted patterns, when the
/// permutations wrap around, or when `token` is cancelled.
pub fn search_stop_patterns(
    grid: &Grid,
    ball: Position,
    gems: &[Position],
    mut selection: Vec<bool>,
    limit: usize,
    token: &CancellationToken,
) -> Vec<AcceptedPattern> {
    let candidates = grid.positions_of(CellType::Clear);
    let mut working = grid.clone();
    let mut accepted = Vec::new();
    let mut examined = 0_usize;

    if limit == 0 || selection.len() != candidates.len() {
        return accepted;
    }

    loop {
        if token.is_cancelled() {
            log::debug!("Stop-pattern search cancelled after {examined} patterns");
            break;
        }
        examined += 1;

        let stops: Vec<Position> = candidates
            .iter()
            .zip(&selection)
            .filter_map(|(&position, &chosen)| chosen.then_some(position))
            .collect();

        if apply_cells(&mut working, &stops, CellType::Stop) {
            if let Some(validated) = validate_pattern(&working, ball, gems) {
                log::debug!(
                    "Accepted stop pattern #{} after {examined} candidates (stuck area {})",
                    accepted.len() + 1,
                    validated.stuck_area.len()
                );
                accepted.push(AcceptedPattern {
                    stops: stops.clone(),
                    stuck_area: validated.stuck_area,
                    stuck_area_gems: validated.stuck_area_gems,
                });
            }
            apply_cells(&mut working, &stops, CellType::Clear);
        }

        if accepted.len() >= limit || !prev_permutation(&mut selection) {
            break;
        }
    }

    accepted
}

/// Find one valid stop pattern for an interactive game within `deadline`
///
/// Seeds the walk with an evenly spaced selection. `None` means the caller
/// should fall back to a stored level.
pub fn find_valid_stop_pattern(
    grid: &Grid,
    ball: Position,
    gems: &[Position],
    deadline: Duration,
) -> Option<AcceptedPattern> {
    let available = grid.count_of(CellType::Clear);
    let selection = even_selection(available, stops_count(grid.rows(), grid.cols()));
    let token = CancellationToken::with_timeout(deadline);
    search_stop_patterns(grid, ball, gems, selection, 1, &token)
        .into_iter()
        .next()
}

fn apply_cells(grid: &mut Grid, positions: &[Position], kind: CellType) -> bool {
    positions
        .iter()
        .all(|&position| grid.set(position, kind).is_ok())
}
