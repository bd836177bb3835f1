//! Sliding-ball puzzle engine
//!
//! A ball slides across a grid until an edge, a wall or a stop halts it,
//! collecting gems on the way and exploding on mines. Levels are generated
//! so that every gem can be collected without trapping the ball, and a
//! parallel breadth-first search supplies move hints during play.

#![forbid(unsafe_code)]

/// Slide physics, reachability, level generation and hint search
pub mod algorithm;
/// Levels, live game state, move handling and the generation worker
pub mod game;
/// Input/output operations, configuration and error handling
pub mod io;
/// Angular and distance helpers for grid positions
pub mod math;
/// Grid, cell, direction and position types
pub mod spatial;

pub use io::error::{GameError, Result};
