//! Spatial data structures for the puzzle board
//!
//! This module contains the board model:
//! - Positions and compass directions
//! - Cell kinds and their persisted codes
//! - The bounds-checked cell matrix

/// Cell kinds
pub mod cell;
/// The eight slide directions
pub mod direction;
/// Cell matrix with bounds-checked access
pub mod grid;
/// Row and column coordinates
pub mod position;

pub use cell::CellType;
pub use direction::Direction;
pub use grid::Grid;
pub use position::Position;
