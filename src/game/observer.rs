//! Presentation notifications
//!
//! The engine reports every visible change through a [`PresentationSink`].
//! Sinks take `&self` and must be shareable across threads because the
//! generation worker notifies from its own thread.

use std::sync::{Mutex, PoisonError};

use crate::spatial::{Direction, Position};

/// Receiver of engine notifications
pub trait PresentationSink: Send + Sync {
    /// A batch of changes that replaces the whole board starts
    fn reset_begin(&self);

    /// The batch started by [`PresentationSink::reset_begin`] is complete
    fn reset_end(&self);

    /// Cells in the row-major range `first..=last` changed
    fn cells_changed(&self, first: Position, last: Position);

    /// The ball now rests at `position`
    fn ball_moved(&self, position: Position);

    /// Next hint direction, `None` when no hint is available
    fn hint(&self, direction: Option<Direction>);

    /// Every gem was collected
    fn game_completed(&self);

    /// Bulk generation finished with `count` games written
    fn generation_completed(&self, count: usize);
}

/// Sink that ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl PresentationSink for NullSink {
    fn reset_begin(&self) {}
    fn reset_end(&self) {}
    fn cells_changed(&self, _first: Position, _last: Position) {}
    fn ball_moved(&self, _position: Position) {}
    fn hint(&self, _direction: Option<Direction>) {}
    fn game_completed(&self) {}
    fn generation_completed(&self, _count: usize) {}
}

/// Sink that logs every notification at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl PresentationSink for LogSink {
    fn reset_begin(&self) {
        log::debug!("reset begin");
    }

    fn reset_end(&self) {
        log::debug!("reset end");
    }

    fn cells_changed(&self, first: Position, last: Position) {
        log::debug!("cells changed {first}..={last}");
    }

    fn ball_moved(&self, position: Position) {
        log::debug!("ball moved to {position}");
    }

    fn hint(&self, direction: Option<Direction>) {
        match direction {
            Some(direction) => log::debug!("hint: {direction}"),
            None => log::debug!("hint: none available"),
        }
    }

    fn game_completed(&self) {
        log::debug!("game completed");
    }

    fn generation_completed(&self, count: usize) {
        log::debug!("generation completed with {count} games");
    }
}

/// A recorded notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkEvent {
    /// [`PresentationSink::reset_begin`]
    ResetBegin,
    /// [`PresentationSink::reset_end`]
    ResetEnd,
    /// [`PresentationSink::cells_changed`]
    CellsChanged(Position, Position),
    /// [`PresentationSink::ball_moved`]
    BallMoved(Position),
    /// [`PresentationSink::hint`]
    Hint(Option<Direction>),
    /// [`PresentationSink::game_completed`]
    GameCompleted,
    /// [`PresentationSink::generation_completed`]
    GenerationCompleted(usize),
}

/// Sink that records notifications for later inspection
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Mutex<Vec<SinkEvent>>,
}

impl EventQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: SinkEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    /// Take every recorded event, oldest first
    pub fn drain(&self) -> Vec<SinkEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl PresentationSink for EventQueue {
    fn reset_begin(&self) {
        self.push(SinkEvent::ResetBegin);
    }

    fn reset_end(&self) {
        self.push(SinkEvent::ResetEnd);
    }

    fn cells_changed(&self, first: Position, last: Position) {
        self.push(SinkEvent::CellsChanged(first, last));
    }

    fn ball_moved(&self, position: Position) {
        self.push(SinkEvent::BallMoved(position));
    }

    fn hint(&self, direction: Option<Direction>) {
        self.push(SinkEvent::Hint(direction));
    }

    fn game_completed(&self) {
        self.push(SinkEvent::GameCompleted);
    }

    fn generation_completed(&self, count: usize) {
        self.push(SinkEvent::GenerationCompleted(count));
    }
}

impl<S: PresentationSink + ?Sized> PresentationSink for std::sync::Arc<S> {
    fn reset_begin(&self) {
        (**self).reset_begin();
    }

    fn reset_end(&self) {
        (**self).reset_end();
    }

    fn cells_changed(&self, first: Position, last: Position) {
        (**self).cells_changed(first, last);
    }

    fn ball_moved(&self, position: Position) {
        (**self).ball_moved(position);
    }

    fn hint(&self, direction: Option<Direction>) {
        (**self).hint(direction);
    }

    fn game_completed(&self) {
        (**self).game_completed();
    }

    fn generation_completed(&self, count: usize) {
        (**self).generation_completed(count);
    }
}
