//! Interactive game session
//!
//! Glues the live state, the move history, hint replay and the presentation
//! sink. All play-time operations run sequentially on the caller's thread.

use crate::algorithm::pathfinder::HintSearch;
use crate::game::hints::HintTracker;
use crate::game::level::Level;
use crate::game::movement::{self, MovementResult};
use crate::game::observer::PresentationSink;
use crate::game::state::{GameState, SavedGame};
use crate::io::error::Result;
use crate::spatial::{Direction, Grid, Position};

/// A game being played, reporting every change to its sink
pub struct Session<S: PresentationSink> {
    state: GameState,
    history: Vec<MovementResult>,
    hints: HintTracker,
    search: HintSearch,
    sink: S,
}

impl<S: PresentationSink> Session<S> {
    /// Start playing `level`
    pub fn new(level: Level, sink: S) -> Self {
        let session = Self {
            state: GameState::new(level),
            history: Vec::new(),
            hints: HintTracker::new(),
            search: HintSearch::default(),
            sink,
        };
        session.announce_reset();
        session
    }

    /// Resume a saved game
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the snapshot is inconsistent
    pub fn resume(saved: SavedGame, sink: S) -> Result<Self> {
        let session = Self {
            state: GameState::from_saved(saved)?,
            history: Vec::new(),
            hints: HintTracker::new(),
            search: HintSearch::default(),
            sink,
        };
        session.announce_reset();
        Ok(session)
    }

    /// Replace the hint search limits
    #[must_use]
    pub const fn with_hint_search(mut self, search: HintSearch) -> Self {
        self.search = search;
        self
    }

    /// Live game state
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// The notification sink
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Active hint replay
    pub const fn hints(&self) -> &HintTracker {
        &self.hints
    }

    /// Snapshot the game
    pub fn save(&self) -> SavedGame {
        self.state.save()
    }

    /// Switch to a new level, dropping history and hints
    pub fn load(&mut self, level: Level) {
        self.state = GameState::new(level);
        self.history.clear();
        self.hints.invalidate();
        self.announce_reset();
    }

    /// Slide the ball in `direction`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the state is corrupt
    pub fn move_ball(&mut self, direction: Direction) -> Result<MovementResult> {
        self.hints.check_move(direction);
        let result = movement::move_ball(&mut self.state, direction)?;

        for &gem in &result.collected {
            self.hints.on_gem_picked(gem);
            self.sink.cells_changed(gem, gem);
        }
        if let Some(mine) = result.exploded {
            self.sink.cells_changed(mine, mine);
        }
        self.sink.ball_moved(result.destination);
        if !result.collected.is_empty() && self.state.is_completed() {
            log::info!("Level completed after {} moves", self.history.len() + 1);
            self.sink.game_completed();
        }

        self.history.push(result.clone());
        Ok(result)
    }

    /// Revert the last move, returning false when there is nothing to undo
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the state is corrupt
    pub fn undo(&mut self) -> Result<bool> {
        let Some(last) = self.history.pop() else {
            return Ok(false);
        };
        movement::undo(&mut self.state, &last)?;
        self.hints.check_undo();

        self.sink.ball_moved(last.from);
        for &gem in &last.collected {
            self.sink.cells_changed(gem, gem);
        }
        if let Some(mine) = last.exploded {
            self.sink.cells_changed(mine, mine);
        }
        Ok(true)
    }

    /// Acknowledge that the ball settled after a move
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the state is corrupt
    pub fn announce_ball_position(&mut self) -> Result<()> {
        if self.state.announce_ball_position()? {
            let ball = self.state.ball();
            self.sink.cells_changed(ball, ball);
        }
        Ok(())
    }

    /// Next hint direction, also reported to the sink
    pub fn hint(&mut self) -> Option<Direction> {
        let direction = self.hints.next_hint(&self.state, &self.search);
        self.sink.hint(direction);
        direction
    }

    /// Restore the level's initial state
    pub fn restart(&mut self) {
        self.state.restart();
        self.history.clear();
        self.hints.invalidate();
        self.announce_reset();
    }

    fn announce_reset(&self) {
        self.sink.reset_begin();
        let grid: &Grid = self.state.grid();
        let last = Position::new(grid.rows().saturating_sub(1), grid.cols().saturating_sub(1));
        self.sink.cells_changed(Position::new(0, 0), last);
        self.sink.reset_end();
        self.sink.ball_moved(self.state.ball());
    }
}
