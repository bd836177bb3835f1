//! Hint replay across player moves
//!
//! A computed slide sequence is handed out one direction per request while
//! the player follows it. Straying from the sequence drops it.

use crate::algorithm::pathfinder::HintSearch;
use crate::game::state::GameState;
use crate::spatial::{Direction, Position};

/// Tracks the active hint sequence and the player's progress along it
#[derive(Debug, Clone, Default)]
pub struct HintTracker {
    trace: Vec<Direction>,
    next: usize,
    target: Option<Position>,
}

impl HintTracker {
    /// Create a tracker with no active hint
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a hint sequence is being followed
    pub const fn is_active(&self) -> bool {
        self.target.is_some()
    }

    /// Gem the active hint leads to
    pub const fn target(&self) -> Option<Position> {
        self.target
    }

    /// Directions of the active hint the player has not made yet
    pub fn remaining(&self) -> &[Direction] {
        self.trace.get(self.next..).unwrap_or(&[])
    }

    /// Direction the player should slide next
    ///
    /// Continues the active sequence when there is one, otherwise searches a
    /// new sequence toward the state's hint target. `None` means no hint is
    /// available.
    pub fn next_hint(&mut self, state: &GameState, search: &HintSearch) -> Option<Direction> {
        if self.is_active() {
            if let Some(&direction) = self.remaining().first() {
                return Some(direction);
            }
            self.invalidate();
        }

        let target = state.hint_target()?;
        let trace = search.find_hint(&state.hint_request(target))?;
        let first = trace.first().copied()?;

        log::debug!("New hint toward {target}: {} slides", trace.len());
        self.trace = trace;
        self.next = 0;
        self.target = Some(target);
        Some(first)
    }

    /// Follow the player's move, dropping the hint if it deviates
    pub fn check_move(&mut self, direction: Direction) {
        if !self.is_active() {
            return;
        }
        if self.trace.get(self.next) == Some(&direction) {
            self.next += 1;
        } else {
            self.invalidate();
        }
    }

    /// Step back along the sequence, dropping the hint past its start
    pub fn check_undo(&mut self) {
        if !self.is_active() {
            return;
        }
        if self.next == 0 {
            self.invalidate();
        } else {
            self.next -= 1;
        }
    }

    /// Drop the hint once its target gem is collected
    pub fn on_gem_picked(&mut self, gem: Position) {
        if self.target == Some(gem) {
            self.invalidate();
        }
    }

    /// Drop the active hint
    pub fn invalidate(&mut self) {
        self.trace.clear();
        self.next = 0;
        self.target = None;
    }
}
