//! Play-time engine: live state, moves, hints and background generation

/// Hint replay across player moves
pub mod hints;
/// Restorable level snapshot
pub mod level;
/// Ball movement and undo
pub mod movement;
/// Presentation notifications
pub mod observer;
/// Interactive session tying state, hints and notifications together
pub mod session;
/// Live game context and saved-game snapshots
pub mod state;
/// Background generation thread
pub mod worker;

pub use level::Level;
pub use session::Session;
pub use state::{GameState, SavedGame};
