//! Single-slide movement primitive
//!
//! A slide moves the ball one cell at a time until something halts it:
//! the grid edge or a wall halts it on the current cell, a stop cell or a
//! mine halts it on that cell. Everything else is floor.

use crate::spatial::{CellType, Direction, Grid, Position};

/// Where one slide ends and what it passed through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideOutcome {
    /// Resting position of the ball
    pub destination: Position,
    /// False when the slide ended on a mine
    pub safe: bool,
    /// Cells entered during the slide, in order, when tracing was requested
    ///
    /// Always empty for unsafe slides.
    pub trace: Vec<Position>,
}

impl SlideOutcome {
    /// Check if the slide did not move the ball
    pub fn is_noop(&self, start: Position) -> bool {
        self.destination == start
    }
}

/// Slide from `start` in `direction` on `grid`
///
/// Pass the live grid for play-time queries and the initial snapshot for
/// generation-time validation. The start cell itself is never inspected.
pub fn slide(
    grid: &Grid,
    start: Position,
    direction: Direction,
    collect_trace: bool,
) -> SlideOutcome {
    let mut current = start;
    let mut trace = Vec::new();

    while let Some(next) = grid.neighbor(current, direction) {
        match grid.get(next) {
            None | Some(CellType::Wall) => break,
            Some(CellType::Mine) => {
                return SlideOutcome {
                    destination: next,
                    safe: false,
                    trace: Vec::new(),
                };
            }
            Some(CellType::Stop) => {
                if collect_trace {
                    trace.push(next);
                }
                current = next;
                break;
            }
            Some(CellType::Clear | CellType::Gem | CellType::Waiting | CellType::Exploded) => {
                if collect_trace {
                    trace.push(next);
                }
                current = next;
            }
        }
    }

    SlideOutcome {
        destination: current,
        safe: true,
        trace,
    }
}
