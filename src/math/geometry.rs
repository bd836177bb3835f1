//! Planar geometry on grid coordinates
//!
//! Rows grow downward, so bearings negate the row delta to keep angles
//! counter-clockwise from "right" like the compass directions.

use crate::spatial::Position;

/// Bearing from `from` to `to` in degrees, normalized to `[0, 360)`
///
/// Identical positions yield 0.
pub fn bearing_degrees(from: Position, to: Position) -> f64 {
    let drow = to.row as f64 - from.row as f64;
    let dcol = to.col as f64 - from.col as f64;
    (-drow).atan2(dcol).to_degrees().rem_euclid(360.0)
}

/// Smallest angle between two bearings in degrees, in `[0, 180]`
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let difference = (a - b).rem_euclid(360.0);
    difference.min(360.0 - difference)
}

/// Straight-line distance between two cells
pub fn euclidean_distance(a: Position, b: Position) -> f64 {
    let drow = a.row as f64 - b.row as f64;
    let dcol = a.col as f64 - b.col as f64;
    drow.hypot(dcol)
}
