//! Play-time ball movement and undo
//!
//! Unlike the slide primitive, a move mutates the live cells as it goes:
//! gems are collected the moment the ball crosses them and a mine explodes
//! under the ball.

use crate::game::state::GameState;
use crate::io::error::Result;
use crate::spatial::{CellType, Direction, Position};

/// Everything a move changed, enough to undo it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementResult {
    /// Direction of the move
    pub direction: Direction,
    /// Ball position before the move
    pub from: Position,
    /// Ball position after the move
    pub destination: Position,
    /// Gems collected on the way, in crossing order
    pub collected: Vec<Position>,
    /// Mine the ball landed on, if any
    pub exploded: Option<Position>,
}

impl MovementResult {
    /// Check if the ball ended on a mine
    pub const fn is_fatal(&self) -> bool {
        self.exploded.is_some()
    }
}

/// Move the ball one slide in `direction`, collecting gems on the way
///
/// Crossed gems become `Waiting` and leave the remaining-gem list. The ball
/// stops before a wall or the edge, on a stop cell, or on a mine, which
/// becomes `Exploded`.
///
/// # Errors
///
/// Returns `OutOfBounds` if the state holds a ball outside its grid
pub fn move_ball(state: &mut GameState, direction: Direction) -> Result<MovementResult> {
    let from = state.ball();
    state.grid().cell(from)?;

    let mut current = from;
    let mut collected = Vec::new();
    let mut exploded = None;

    while let Some(next) = state.grid().neighbor(current, direction) {
        match state.grid().cell(next)? {
            CellType::Wall => break,
            CellType::Mine => {
                state.cells_mut().set(next, CellType::Exploded)?;
                exploded = Some(next);
                current = next;
                break;
            }
            CellType::Stop => {
                current = next;
                break;
            }
            CellType::Gem => {
                state.cells_mut().set(next, CellType::Waiting)?;
                state.collect_gem(next);
                collected.push(next);
                current = next;
            }
            CellType::Clear | CellType::Waiting | CellType::Exploded => {
                current = next;
            }
        }
    }

    state.set_ball(current);

    Ok(MovementResult {
        direction,
        from,
        destination: current,
        collected,
        exploded,
    })
}

/// Revert a move made with [`move_ball`]
///
/// Collected gems become `Gem` cells again and count as remaining, an
/// exploded mine is re-armed, and the ball returns to where it started.
///
/// # Errors
///
/// Returns `OutOfBounds` if the result belongs to a larger grid
pub fn undo(state: &mut GameState, movement: &MovementResult) -> Result<()> {
    for &gem in &movement.collected {
        state.cells_mut().set(gem, CellType::Gem)?;
        state.restore_gem(gem);
    }
    if let Some(mine) = movement.exploded {
        state.cells_mut().set(mine, CellType::Mine)?;
    }
    state.grid().cell(movement.from)?;
    state.set_ball(movement.from);
    Ok(())
}
