//! Wall and mine placement that keeps the open floor connected

use rand::Rng;
use rand::seq::SliceRandom;

use crate::algorithm::bitset::PositionSet;
use crate::io::error::Result;
use crate::spatial::{CellType, Direction, Grid, Position};

/// Plant up to `count` cells of `kind` on shuffled `Clear` cells
///
/// A candidate is kept only if every `Clear` cell stays reachable from the
/// ball through 8-neighbours that are neither walls nor mines; otherwise it is
/// reverted. Stops after `count` placements or when candidates run out, so
/// fewer cells than requested may be placed. Returns the placed positions in
/// placement order.
///
/// # Errors
///
/// Returns `OutOfBounds` if `ball` lies outside the grid
pub fn place_obstacles<R: Rng + ?Sized>(
    grid: &mut Grid,
    ball: Position,
    count: usize,
    kind: CellType,
    rng: &mut R,
) -> Result<Vec<Position>> {
    grid.cell(ball)?;

    let mut candidates: Vec<Position> = grid
        .positions_of(CellType::Clear)
        .into_iter()
        .filter(|&position| position != ball)
        .collect();
    candidates.shuffle(rng);

    let mut placed = Vec::with_capacity(count);
    for candidate in candidates {
        if placed.len() >= count {
            break;
        }
        grid.set(candidate, kind)?;
        if is_fully_connected(grid, ball) {
            placed.push(candidate);
        } else {
            grid.set(candidate, CellType::Clear)?;
        }
    }

    log::debug!(
        "Placed {}/{count} {kind:?} cells on a {}x{} grid",
        placed.len(),
        grid.rows(),
        grid.cols()
    );

    Ok(placed)
}

/// Check that every `Clear` cell can be reached from `start`
///
/// Flood fill over 8-neighbours, passing through any cell that is not a wall
/// or a mine.
pub fn is_fully_connected(grid: &Grid, start: Position) -> bool {
    let mut seen = PositionSet::for_grid(grid);
    let mut stack = vec![start];
    seen.insert(start);
    let mut clear_reached = 0;

    while let Some(position) = stack.pop() {
        if grid.get(position) == Some(CellType::Clear) {
            clear_reached += 1;
        }
        for direction in Direction::ALL {
            let Some(next) = grid.neighbor(position, direction) else {
                continue;
            };
            let passable = grid.get(next).is_some_and(|cell| !cell.is_obstacle());
            if passable && seen.insert(next) {
                stack.push(next);
            }
        }
    }

    clear_reached == grid.count_of(CellType::Clear)
}
